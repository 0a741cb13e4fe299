//! User-facing fetch errors.

use watchme_api::tmdb::{TmdbErrorKind, classify_error};

/// A failed list or search fetch, as shown to the user.
///
/// Always renders a non-empty message; `detail` keeps the underlying cause
/// for logs and a secondary line in the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.message())]
pub struct FetchError {
    /// Failure category.
    pub kind: TmdbErrorKind,
    /// Underlying error text, if any.
    pub detail: Option<String>,
}

impl FetchError {
    /// Creates an error of the given kind.
    #[must_use]
    pub const fn new(kind: TmdbErrorKind, detail: Option<String>) -> Self {
        Self { kind, detail }
    }

    /// Builds a `FetchError` from a client error, keeping the full context chain.
    #[must_use]
    pub fn from_client(err: &anyhow::Error) -> Self {
        Self {
            kind: classify_error(err),
            detail: Some(format!("{err:#}")),
        }
    }

    /// Human-readable message for the error kind.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self.kind {
            TmdbErrorKind::Transport | TmdbErrorKind::Status => "Error fetching movies",
            TmdbErrorKind::Decode => "Unexpected response from the movie service",
        }
    }
}
