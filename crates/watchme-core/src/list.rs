//! Category list fetcher.

use std::collections::HashSet;

use watchme_api::tmdb::{MovieCategory, MovieSummary, TmdbApi};

use crate::error::FetchError;
use crate::sequence::{RequestSeq, Sequencer};
use crate::state::{ListView, LoadState};

/// Only the first page of a category is ever requested.
const FIRST_PAGE: u32 = 1;

/// Drops later entries whose id was already seen, keeping list order.
pub(crate) fn dedupe_by_id(movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut seen = HashSet::with_capacity(movies.len());
    movies.into_iter().filter(|m| seen.insert(m.id)).collect()
}

/// Fetches page 1 of a movie category and holds the result.
#[derive(Debug, Default)]
pub struct ListFetcher {
    category: Option<MovieCategory>,
    state: LoadState<Vec<MovieSummary>>,
    seq: Sequencer,
}

/// An issued category request, ready to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequest {
    seq: RequestSeq,
    category: MovieCategory,
}

/// Outcome of a [`ListRequest`].
#[derive(Debug, Clone)]
pub struct ListResponse {
    seq: RequestSeq,
    category: MovieCategory,
    result: Result<Vec<MovieSummary>, FetchError>,
}

impl ListRequest {
    /// Requested category.
    #[must_use]
    pub const fn category(&self) -> MovieCategory {
        self.category
    }

    /// Sequence number of this request.
    #[must_use]
    pub const fn seq(&self) -> RequestSeq {
        self.seq
    }

    /// Performs the single network request.
    pub async fn run<A: TmdbApi>(self, api: &A) -> ListResponse {
        let result = match api.movie_list(self.category, FIRST_PAGE).await {
            Ok(page) => Ok(page.results),
            Err(err) => {
                tracing::warn!(
                    category = %self.category,
                    error = format!("{err:#}"),
                    "failed to fetch movie list"
                );
                Err(FetchError::from_client(&err))
            }
        };
        ListResponse {
            seq: self.seq,
            category: self.category,
            result,
        }
    }
}

impl ListResponse {
    /// Category the response belongs to.
    #[must_use]
    pub const fn category(&self) -> MovieCategory {
        self.category
    }
}

impl ListFetcher {
    /// Creates an idle fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a category: enters the loading state, clears any previous
    /// error and returns the request to run.
    pub fn begin(&mut self, category: MovieCategory) -> ListRequest {
        self.category = Some(category);
        self.state = LoadState::Loading;
        let seq = self.seq.next();
        tracing::debug!(%category, seq = seq.get(), "movie list requested");
        ListRequest { seq, category }
    }

    /// Applies a response. Returns `false` if it was stale and dropped.
    pub fn apply(&mut self, response: ListResponse) -> bool {
        if !self.seq.is_current(response.seq) {
            tracing::debug!(
                category = %response.category,
                seq = response.seq.get(),
                "dropping stale movie list response"
            );
            return false;
        }
        self.state = match response.result {
            Ok(movies) => LoadState::Ready(dedupe_by_id(movies)),
            Err(err) => LoadState::Failed(err),
        };
        true
    }

    /// Selects a category and waits for its result.
    pub async fn load<A: TmdbApi>(&mut self, api: &A, category: MovieCategory) {
        let request = self.begin(category);
        let response = request.run(api).await;
        self.apply(response);
    }

    /// Currently selected category.
    #[must_use]
    pub const fn category(&self) -> Option<MovieCategory> {
        self.category
    }

    /// Loaded movies (empty unless the last fetch succeeded).
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        self.state.value().map_or(&[], Vec::as_slice)
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Error of the last fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.state.error()
    }

    /// What the list area should render.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        ListView::of(&self.state)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::mock::{MockTmdbApi, movie};

    #[tokio::test]
    async fn test_each_category_issues_one_request() {
        for category in MovieCategory::ALL {
            // Arrange
            let api = MockTmdbApi::with_movies(vec![movie(603, "Matrix")]);
            let mut fetcher = ListFetcher::new();

            // Act
            fetcher.load(&api, category).await;

            // Assert
            assert_eq!(api.calls(), vec![format!("movie/{category}?page=1")]);
            assert!(!fetcher.is_loading());
            assert!(fetcher.error().is_none());
            assert_eq!(fetcher.movies().len(), 1);
            assert!(matches!(fetcher.view(), ListView::Movies(_)));
        }
    }

    #[tokio::test]
    async fn test_empty_result_is_not_found_view() {
        // Arrange
        let api = MockTmdbApi::with_movies(Vec::new());
        let mut fetcher = ListFetcher::new();

        // Act
        fetcher.load(&api, MovieCategory::Upcoming).await;

        // Assert
        assert_eq!(fetcher.view(), ListView::Empty);
        assert!(!fetcher.is_loading());
    }

    #[tokio::test]
    async fn test_http_error_ends_in_error_state() {
        // Arrange
        let api = MockTmdbApi {
            fail_list: true,
            ..MockTmdbApi::with_movies(vec![movie(603, "Matrix")])
        };
        let mut fetcher = ListFetcher::new();

        // Act
        fetcher.load(&api, MovieCategory::Popular).await;

        // Assert
        assert!(!fetcher.is_loading());
        assert!(fetcher.movies().is_empty());
        let err = fetcher.error().unwrap();
        assert!(!err.to_string().is_empty());
        assert!(matches!(fetcher.view(), ListView::Error(_)));
    }

    #[tokio::test]
    async fn test_begin_clears_previous_error() {
        // Arrange
        let api = MockTmdbApi {
            fail_list: true,
            ..MockTmdbApi::default()
        };
        let mut fetcher = ListFetcher::new();
        fetcher.load(&api, MovieCategory::Popular).await;

        // Act
        let request = fetcher.begin(MovieCategory::TopRated);

        // Assert
        assert_eq!(request.category(), MovieCategory::TopRated);
        assert!(fetcher.is_loading());
        assert!(fetcher.error().is_none());
        assert_eq!(fetcher.view(), ListView::Loading);
    }

    #[tokio::test]
    async fn test_stale_response_is_dropped() {
        // Arrange
        let api = MockTmdbApi::with_movies(vec![movie(603, "Matrix")]);
        let mut fetcher = ListFetcher::new();
        let popular = fetcher.begin(MovieCategory::Popular);
        let top_rated = fetcher.begin(MovieCategory::TopRated);
        let popular_response = popular.run(&api).await;
        let top_rated_response = top_rated.run(&api).await;

        // Act: the newer request resolves first, the older one afterwards
        let applied_new = fetcher.apply(top_rated_response);
        let applied_old = fetcher.apply(popular_response);

        // Assert
        assert!(applied_new);
        assert!(!applied_old);
        assert_eq!(fetcher.category(), Some(MovieCategory::TopRated));
        assert_eq!(fetcher.movies().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_does_not_end_loading() {
        // Arrange
        let api = MockTmdbApi::with_movies(vec![movie(603, "Matrix")]);
        let mut fetcher = ListFetcher::new();
        let old = fetcher.begin(MovieCategory::Popular);
        let _current = fetcher.begin(MovieCategory::NowPlaying);

        // Act
        let response = old.run(&api).await;
        fetcher.apply(response);

        // Assert
        assert!(fetcher.is_loading());
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_dropped() {
        // Arrange
        let api = MockTmdbApi::with_movies(vec![
            movie(603, "Matrix"),
            movie(238, "O Poderoso Chefão"),
            movie(603, "Matrix (dup)"),
        ]);
        let mut fetcher = ListFetcher::new();

        // Act
        fetcher.load(&api, MovieCategory::Popular).await;

        // Assert
        let movies = fetcher.movies();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "Matrix");
        assert_eq!(movies[1].id, 238);
    }
}
