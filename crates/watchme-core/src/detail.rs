//! Movie detail fetcher: metadata, videos and cast for one movie.

use watchme_api::tmdb::{CastMember, MovieDetails, TmdbApi, Video};

use crate::sequence::{RequestSeq, Sequencer};
use crate::trailer::select_trailer;

/// Number of cast members kept from the credits response.
pub const MAX_CAST: usize = 12;

/// Holds the detail view data of the open movie.
///
/// The three slices load independently. A failed request is logged and
/// leaves only its own slice empty; only the metadata request drives
/// [`is_loading`](Self::is_loading).
#[derive(Debug, Default)]
pub struct DetailFetcher {
    movie_id: Option<u64>,
    details: Option<MovieDetails>,
    videos: Vec<Video>,
    cast: Vec<CastMember>,
    loading: bool,
    seq: Sequencer,
}

/// Requests for one opened movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    seq: RequestSeq,
    movie_id: u64,
}

#[derive(Debug, Clone)]
enum DetailPart {
    Details(Option<MovieDetails>),
    Videos(Vec<Video>),
    Cast(Vec<CastMember>),
}

/// Outcome of one of the three detail requests.
#[derive(Debug, Clone)]
pub struct DetailResponse {
    seq: RequestSeq,
    movie_id: u64,
    part: DetailPart,
}

impl DetailResponse {
    /// Movie this response belongs to.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }

    const fn new(request: DetailRequest, part: DetailPart) -> Self {
        Self {
            seq: request.seq,
            movie_id: request.movie_id,
            part,
        }
    }
}

impl DetailRequest {
    /// Movie being fetched.
    #[must_use]
    pub const fn movie_id(&self) -> u64 {
        self.movie_id
    }

    /// Fetches extended metadata.
    pub async fn details<A: TmdbApi>(self, api: &A) -> DetailResponse {
        let details = match api.movie_details(self.movie_id).await {
            Ok(details) => Some(details),
            Err(err) => {
                tracing::warn!(
                    movie_id = self.movie_id,
                    error = format!("{err:#}"),
                    "failed to fetch movie details"
                );
                None
            }
        };
        DetailResponse::new(self, DetailPart::Details(details))
    }

    /// Fetches promotional videos.
    pub async fn videos<A: TmdbApi>(self, api: &A) -> DetailResponse {
        let videos = match api.movie_videos(self.movie_id).await {
            Ok(videos) => videos.results,
            Err(err) => {
                tracing::warn!(
                    movie_id = self.movie_id,
                    error = format!("{err:#}"),
                    "failed to fetch movie videos"
                );
                Vec::new()
            }
        };
        DetailResponse::new(self, DetailPart::Videos(videos))
    }

    /// Fetches the cast, truncated to [`MAX_CAST`].
    pub async fn credits<A: TmdbApi>(self, api: &A) -> DetailResponse {
        let cast = match api.movie_credits(self.movie_id).await {
            Ok(credits) => {
                let mut cast = credits.cast;
                cast.truncate(MAX_CAST);
                cast
            }
            Err(err) => {
                tracing::warn!(
                    movie_id = self.movie_id,
                    error = format!("{err:#}"),
                    "failed to fetch movie credits"
                );
                Vec::new()
            }
        };
        DetailResponse::new(self, DetailPart::Cast(cast))
    }

    /// Runs all three requests concurrently.
    pub async fn run_all<A: TmdbApi>(self, api: &A) -> [DetailResponse; 3] {
        let (details, videos, credits) =
            tokio::join!(self.details(api), self.videos(api), self.credits(api));
        [details, videos, credits]
    }
}

impl DetailFetcher {
    /// Creates a fetcher with no movie open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `movie_id`, dropping everything held for the previous movie.
    pub fn open(&mut self, movie_id: u64) -> DetailRequest {
        self.clear();
        self.movie_id = Some(movie_id);
        self.loading = true;
        let seq = self.seq.next();
        tracing::debug!(movie_id, seq = seq.get(), "movie detail opened");
        DetailRequest { seq, movie_id }
    }

    /// Applies a response. Returns `false` if it was stale and dropped.
    pub fn apply(&mut self, response: DetailResponse) -> bool {
        if !self.seq.is_current(response.seq) {
            tracing::debug!(
                movie_id = response.movie_id,
                seq = response.seq.get(),
                "dropping stale detail response"
            );
            return false;
        }
        match response.part {
            DetailPart::Details(details) => {
                self.details = details;
                self.loading = false;
            }
            DetailPart::Videos(videos) => self.videos = videos,
            DetailPart::Cast(cast) => self.cast = cast,
        }
        true
    }

    /// Opens `movie_id` and waits for all three requests.
    pub async fn load<A: TmdbApi>(&mut self, api: &A, movie_id: u64) {
        let request = self.open(movie_id);
        for response in request.run_all(api).await {
            self.apply(response);
        }
    }

    /// Closes the detail view; responses still in flight are dropped.
    pub fn close(&mut self) {
        self.clear();
        self.seq.invalidate();
    }

    fn clear(&mut self) {
        self.movie_id = None;
        self.details = None;
        self.videos.clear();
        self.cast.clear();
        self.loading = false;
    }

    /// Open movie, if any.
    #[must_use]
    pub const fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// Extended metadata, once loaded.
    #[must_use]
    pub const fn details(&self) -> Option<&MovieDetails> {
        self.details.as_ref()
    }

    /// Promotional videos.
    #[must_use]
    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    /// Cast, at most [`MAX_CAST`] entries.
    #[must_use]
    pub fn cast(&self) -> &[CastMember] {
        &self.cast
    }

    /// Whether the metadata request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Trailer chosen from the loaded videos.
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        select_trailer(&self.videos)
    }
}
