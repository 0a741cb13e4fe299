//! Trailer selection.

use watchme_api::tmdb::Video;

const YOUTUBE: &str = "YouTube";
const TRAILER: &str = "Trailer";

/// Picks the trailer to offer for a movie.
///
/// Prefers the first official YouTube trailer, then the first YouTube trailer
/// of any kind. Other sites and video types are never chosen.
#[must_use]
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    let mut trailers = videos
        .iter()
        .filter(|v| v.video_type == TRAILER && v.site == YOUTUBE);
    trailers
        .clone()
        .find(|v| v.official)
        .or_else(|| trailers.next())
}

/// Browser URL for a YouTube video key.
#[must_use]
pub fn watch_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}
