//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints
//! (category lists, search, details, videos, credits).

mod api;
mod category;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
pub use category::{MovieCategory, ParseCategoryError};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_LANGUAGE, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{TmdbErrorKind, TmdbStatusError, classify_error};
pub use types::{
    CastMember, Genre, MovieCredits, MovieDetails, MoviePage, MovieSummary, MovieVideos,
    ProductionCompany, SearchMovieParams, SpokenLanguage, TmdbErrorResponse, Video,
};
