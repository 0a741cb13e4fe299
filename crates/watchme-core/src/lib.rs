//! Fetch lifecycle for watchme.
//!
//! Each fetcher owns one slice of view state (movie list, search results,
//! movie detail) and moves it through begin → run → apply. Requests carry a
//! sequence number so that a response which arrives after a newer request
//! has started is dropped instead of overwriting fresher state.

/// Detail fetcher (metadata, videos and cast).
pub mod detail;
/// Presentation helpers (rating, dates, runtime, money).
pub mod display;
/// User-facing fetch errors.
pub mod error;
/// Category list fetcher.
pub mod list;
/// Free-text search fetcher.
pub mod search;
/// Request sequencing.
pub mod sequence;
/// Load state shared by list and search.
pub mod state;
/// Trailer selection policy.
pub mod trailer;

#[cfg(test)]
mod mock;

pub use detail::{DetailFetcher, DetailRequest, DetailResponse, MAX_CAST};
pub use error::FetchError;
pub use list::{ListFetcher, ListRequest, ListResponse};
pub use search::{SearchFetcher, SearchRequest, SearchResponse};
pub use sequence::{RequestSeq, Sequencer};
pub use state::{ListView, LoadState};
pub use trailer::{select_trailer, watch_url};
