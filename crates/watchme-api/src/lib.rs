//! API client library for watchme.
//!
//! Provides the TMDB API client and image URL resolution.

/// Image URL resolution for TMDB path tokens.
pub mod image;

/// TMDB API client.
pub mod tmdb;
