//! Error classification for TMDB client failures.

use reqwest::StatusCode;

/// Non-success HTTP status returned by the TMDB API.
#[derive(Debug, Clone, thiserror::Error)]
#[error("TMDB API error (HTTP {status}): {message}")]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbStatusError {
    /// HTTP status code.
    pub status: StatusCode,
    /// TMDB `status_message`, or the raw body when it is not a TMDB error object.
    pub message: String,
}

/// Coarse failure category of a TMDB request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbErrorKind {
    /// Connection, TLS, timeout or other transport failure.
    Transport,
    /// The server answered with a non-success status.
    Status,
    /// The body could not be decoded into the expected shape.
    Decode,
}

/// Classifies an error returned by [`super::TmdbClient`].
///
/// Walks the `anyhow` context chain looking for the root cause type.
/// Anything unrecognised is treated as a transport failure.
#[must_use]
pub fn classify_error(err: &anyhow::Error) -> TmdbErrorKind {
    for cause in err.chain() {
        if cause.downcast_ref::<TmdbStatusError>().is_some() {
            return TmdbErrorKind::Status;
        }
        if cause.downcast_ref::<serde_json::Error>().is_some() {
            return TmdbErrorKind::Decode;
        }
        if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
            if e.is_decode() {
                return TmdbErrorKind::Decode;
            }
            if let Some(status) = e.status()
                && !status.is_success()
            {
                return TmdbErrorKind::Status;
            }
            return TmdbErrorKind::Transport;
        }
    }
    TmdbErrorKind::Transport
}
