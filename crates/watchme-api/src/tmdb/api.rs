//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::category::MovieCategory;
use super::types::{MovieCredits, MovieDetails, MoviePage, MovieVideos, SearchMovieParams};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implement `TmdbApi` so the futures can be spawned onto the runtime.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of a movie category list (`movie/{category}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not
    /// successful, or JSON parsing fails.
    async fn movie_list(&self, category: MovieCategory, page: u32) -> Result<MoviePage>;

    /// Searches for movies (`search/movie`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not
    /// successful, or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MoviePage>;

    /// Fetches extended movie metadata (`movie/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not
    /// successful, or JSON parsing fails.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails>;

    /// Fetches promotional videos (`movie/{id}/videos`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not
    /// successful, or JSON parsing fails.
    async fn movie_videos(&self, movie_id: u64) -> Result<MovieVideos>;

    /// Fetches the credited cast (`movie/{id}/credits`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not
    /// successful, or JSON parsing fails.
    async fn movie_credits(&self, movie_id: u64) -> Result<MovieCredits>;
}
