//! TMDB API response types and search parameters.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default value.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Movie lists (movie/{category}, search/movie) ---

/// Paged list response shared by `movie/{category}` and `search/movie`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    /// Current page number.
    pub page: u32,
    /// Movies on this page.
    pub results: Vec<MovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// Lightweight movie record returned by list and search endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default, deserialize_with = "null_to_default")]
    pub original_title: String,
    /// Original language (ISO 639-1).
    #[serde(default, deserialize_with = "null_to_default")]
    pub original_language: String,
    /// Overview text (may be empty).
    #[serde(default, deserialize_with = "null_to_default")]
    pub overview: String,
    /// Poster image path token.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path token.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, empty when unknown).
    #[serde(default, deserialize_with = "null_to_default")]
    pub release_date: String,
    /// Vote average on a 0-10 scale.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Genre IDs (list endpoints only).
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
}

// --- Movie details (movie/{id}) ---

/// Response from `movie/{id}`: summary fields plus extended metadata.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieDetails {
    /// Fields shared with [`MovieSummary`].
    #[serde(flatten)]
    pub summary: MovieSummary,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Production companies.
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Spoken languages.
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Budget in USD.
    #[serde(default)]
    pub budget: Option<u64>,
    /// Revenue in USD.
    #[serde(default)]
    pub revenue: Option<u64>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
    /// Logo image path token.
    #[serde(default)]
    pub logo_path: Option<String>,
}

/// Spoken language entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpokenLanguage {
    /// ISO 639-1 code.
    pub iso_639_1: String,
    /// Language name.
    pub name: String,
}

// --- Videos (movie/{id}/videos) ---

/// Response from `movie/{id}/videos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieVideos {
    /// TMDB movie ID.
    #[serde(default)]
    pub id: u64,
    /// Video records.
    #[serde(default)]
    pub results: Vec<Video>,
}

/// A promotional video record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// TMDB video ID.
    pub id: String,
    /// Provider key (e.g. the YouTube video ID).
    pub key: String,
    /// Video name.
    pub name: String,
    /// Provider name (e.g., "YouTube").
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether the video is an official release.
    #[serde(default)]
    pub official: bool,
}

// --- Credits (movie/{id}/credits) ---

/// Response from `movie/{id}/credits`. Crew is not retained.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieCredits {
    /// TMDB movie ID.
    #[serde(default)]
    pub id: u64,
    /// Cast in billing order.
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// A credited cast member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Actor name.
    pub name: String,
    /// Character name.
    #[serde(default, deserialize_with = "null_to_default")]
    pub character: String,
    /// Profile image path token.
    #[serde(default)]
    pub profile_path: Option<String>,
    /// Billing order.
    #[serde(default)]
    pub order: u32,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            include_adult: false,
        }
    }
}
