//! Free-text movie search.

use watchme_api::tmdb::{MovieSummary, SearchMovieParams, TmdbApi};

use crate::error::FetchError;
use crate::list::dedupe_by_id;
use crate::sequence::{RequestSeq, Sequencer};
use crate::state::{ListView, LoadState};

/// Searches movies by title and holds the result.
///
/// A blank query never reaches the network: it clears the results and
/// supersedes any search still in flight.
#[derive(Debug, Default)]
pub struct SearchFetcher {
    query: String,
    state: LoadState<Vec<MovieSummary>>,
    seq: Sequencer,
}

/// An issued search, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    seq: RequestSeq,
    query: String,
}

/// Outcome of a [`SearchRequest`].
#[derive(Debug, Clone)]
pub struct SearchResponse {
    seq: RequestSeq,
    result: Result<Vec<MovieSummary>, FetchError>,
}

impl SearchRequest {
    /// Trimmed query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Performs the single network request.
    pub async fn run<A: TmdbApi>(self, api: &A) -> SearchResponse {
        let params = SearchMovieParams::new(self.query.as_str());
        let result = match api.search_movie(&params).await {
            Ok(page) => Ok(page.results),
            Err(err) => {
                tracing::warn!(
                    query = %self.query,
                    error = format!("{err:#}"),
                    "movie search failed"
                );
                Err(FetchError::from_client(&err))
            }
        };
        SearchResponse {
            seq: self.seq,
            result,
        }
    }
}

impl SearchFetcher {
    /// Creates an idle fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a search for `query`.
    ///
    /// Returns `None` for a blank query; the result list is cleared and the
    /// error slot is left as it was.
    pub fn begin(&mut self, query: &str) -> Option<SearchRequest> {
        let query = query.trim();
        if query.is_empty() {
            self.query.clear();
            self.seq.invalidate();
            self.state = match std::mem::take(&mut self.state) {
                LoadState::Failed(err) => LoadState::Failed(err),
                _ => LoadState::Idle,
            };
            return None;
        }

        query.clone_into(&mut self.query);
        self.state = LoadState::Loading;
        let seq = self.seq.next();
        tracing::debug!(query, seq = seq.get(), "movie search requested");
        Some(SearchRequest {
            seq,
            query: self.query.clone(),
        })
    }

    /// Applies a response. Returns `false` if it was stale and dropped.
    pub fn apply(&mut self, response: SearchResponse) -> bool {
        if !self.seq.is_current(response.seq) {
            tracing::debug!(seq = response.seq.get(), "dropping stale search response");
            return false;
        }
        self.state = match response.result {
            Ok(movies) => LoadState::Ready(dedupe_by_id(movies)),
            Err(err) => LoadState::Failed(err),
        };
        true
    }

    /// Runs a search to completion. A blank query makes no request.
    pub async fn load<A: TmdbApi>(&mut self, api: &A, query: &str) {
        if let Some(request) = self.begin(query) {
            let response = request.run(api).await;
            self.apply(response);
        }
    }

    /// Last non-blank query, or empty after a blank one.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matching movies (empty unless the last search succeeded).
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        self.state.value().map_or(&[], Vec::as_slice)
    }

    /// Whether a search is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Error of the last search, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.state.error()
    }

    /// What the results area should render.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        ListView::of(&self.state)
    }
}
