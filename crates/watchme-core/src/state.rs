//! Load state for list-shaped fetches.

use watchme_api::tmdb::MovieSummary;

use crate::error::FetchError;

/// Lifecycle of a single fetched value.
///
/// A failed fetch carries no value, so "error with stale movies" cannot be
/// represented.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet, or explicitly cleared.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Ready(T),
    /// The last request failed.
    Failed(FetchError),
}

impl<T> LoadState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The error of the last request, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The loaded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// What a movie list area should render. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    /// Spinner.
    Loading,
    /// Error banner.
    Error(&'a FetchError),
    /// "No movies found".
    Empty,
    /// Movie grid.
    Movies(&'a [MovieSummary]),
}

impl<'a> ListView<'a> {
    /// Derives the view for a movie list state.
    #[must_use]
    pub fn of(state: &'a LoadState<Vec<MovieSummary>>) -> Self {
        match state {
            LoadState::Loading => Self::Loading,
            LoadState::Failed(err) => Self::Error(err),
            LoadState::Ready(movies) if !movies.is_empty() => Self::Movies(movies),
            LoadState::Ready(_) | LoadState::Idle => Self::Empty,
        }
    }
}
