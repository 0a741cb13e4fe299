//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::category::MovieCategory;
use super::error::TmdbStatusError;
use super::types::{
    MovieCredits, MovieDetails, MoviePage, MovieVideos, SearchMovieParams, TmdbErrorResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// How requests are authenticated.
#[derive(Clone)]
enum Credentials {
    /// v3 API key sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token sent as `Authorization: Bearer`.
    BearerToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::BearerToken(_) => f.write_str("BearerToken(<redacted>)"),
        }
    }
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key or bearer token.
    credentials: Credentials,
    /// Value of the `language` query parameter.
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_token: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_token: None,
            user_agent: None,
            language: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the v3 API key, sent as the `api_key` query parameter.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets a v4 bearer token. Takes precedence over the API key.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the response language (default: `pt-BR`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets a per-request timeout. No timeout by default.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - neither `api_key` nor `api_token` is set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let credentials = match (self.api_token, self.api_key) {
            (Some(token), _) => Credentials::BearerToken(token),
            (None, Some(key)) => Credentials::ApiKey(key),
            (None, None) => anyhow::bail!("api_key or api_token is required"),
        };
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let mut builder = Client::builder().user_agent(&user_agent).gzip(true);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credentials,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the configured response language.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Sends a GET request with credentials, language and extra query params.
    ///
    /// Non-success statuses become [`TmdbStatusError`]; no retries are made.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut request = self
            .http_client
            .get(url)
            .query(&[("language", self.language.as_str())])
            .query(query);
        request = match &self.credentials {
            Credentials::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
            Credentials::BearerToken(token) => request.bearer_auth(token),
        };
        let request = request
            .build()
            .with_context(|| format!("failed to build request: {path}"))?;

        tracing::debug!(?query, language = %self.language, "TMDB API request");

        let result = self.http_client.execute(request).await;
        let response = result.with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(body, |e| {
                format!("code={}, message={}", e.status_code, e.status_message)
            });
            return Err(TmdbStatusError { status, message })
                .with_context(|| format!("request failed: {path}"));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(category = %category))]
    async fn movie_list(&self, category: MovieCategory, page: u32) -> Result<MoviePage> {
        let path = format!("movie/{}", category.as_str());
        let query = [("page", page.to_string())];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MoviePage> {
        let query = [
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
            ("include_adult", params.include_adult.to_string()),
        ];

        self.get_json("search/movie", &query).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        let path = format!("movie/{movie_id}");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_videos(&self, movie_id: u64) -> Result<MovieVideos> {
        let path = format!("movie/{movie_id}/videos");
        self.get_json(&path, &[]).await
    }

    #[instrument(skip_all, fields(movie_id = movie_id))]
    async fn movie_credits(&self, movie_id: u64) -> Result<MovieCredits> {
        let path = format!("movie/{movie_id}/credits");
        self.get_json(&path, &[]).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;
    use crate::tmdb::error::{TmdbErrorKind, classify_error};

    /// Builds a client pointed at the wiremock server.
    fn mock_client(server: &wiremock::MockServer) -> TmdbClient {
        let base_url = format!("{}/3/", server.uri());
        TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_credentials() {
        // Arrange & Act
        let result = TmdbClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("api_key or api_token is required")
        );
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = TmdbClient::builder().api_key("test-key").build();

        // Assert
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_defaults() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(client.language(), "pt-BR");
        assert!(matches!(client.credentials, Credentials::ApiKey(_)));
    }

    #[test]
    fn test_builder_token_takes_precedence() {
        // Arrange & Act
        let client = TmdbClient::builder()
            .api_key("test-key")
            .api_token("test-token")
            .user_agent("test/0.0.0")
            .language("en-US")
            .build()
            .unwrap();

        // Assert
        assert!(matches!(client.credentials, Credentials::BearerToken(_)));
        assert_eq!(client.language(), "en-US");
        assert!(!format!("{client:?}").contains("test-token"));
    }

    #[test]
    fn test_parse_movie_list_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        // Act
        let page: MoviePage = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 3);
        let first = &page.results[0];
        assert_eq!(first.id, 603);
        assert_eq!(first.title, "Matrix");
        assert_eq!(first.genre_ids, vec![28, 878]);
        assert!(page.results[2].poster_path.is_none());
    }

    #[test]
    fn test_parse_movie_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_details_603.json");

        // Act
        let details: MovieDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.summary.id, 603);
        assert_eq!(details.runtime, Some(136));
        assert_eq!(details.genres.len(), 2);
        assert_eq!(details.genres[0].name, "Ação");
        assert_eq!(details.budget, Some(63_000_000));
        assert_eq!(details.spoken_languages[0].iso_639_1, "en");
        assert!(details.summary.genre_ids.is_empty());
    }

    #[test]
    fn test_parse_movie_videos_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_videos_603.json");

        // Act
        let videos: MovieVideos = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(videos.id, 603);
        assert_eq!(videos.results.len(), 3);
        assert_eq!(videos.results[1].video_type, "Trailer");
        assert!(videos.results[1].official);
    }

    #[test]
    fn test_parse_movie_credits_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_credits_603.json");

        // Act
        let credits: MovieCredits = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(credits.cast.len(), 14);
        assert_eq!(credits.cast[0].name, "Keanu Reeves");
        assert_eq!(credits.cast[0].character, "Neo");
        assert!(credits.cast[13].profile_path.is_none());
    }

    #[test]
    fn test_parse_null_strings_as_empty() {
        // Arrange
        let json = r#"{"id":1,"title":"X","overview":null,"release_date":null,"poster_path":null}"#;

        // Act
        let movie: crate::tmdb::MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.overview.is_empty());
        assert!(movie.release_date.is_empty());
        assert!(movie.poster_path.is_none());
    }

    #[tokio::test]
    async fn test_movie_list_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/movie/top_rated"))
            .and(wiremock::matchers::query_param("page", "1"))
            .and(wiremock::matchers::query_param("language", "pt-BR"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let page = client
            .movie_list(MovieCategory::TopRated, 1)
            .await
            .unwrap();

        // Assert
        assert_eq!(page.results.len(), 3);
    }

    #[tokio::test]
    async fn test_search_movie_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/3/search/movie"))
            .and(wiremock::matchers::query_param("query", "o poderoso chefão"))
            .and(wiremock::matchers::query_param("include_adult", "false"))
            .and(wiremock::matchers::query_param("page", "1"))
            .and(wiremock::matchers::query_param_is_missing("primary_release_year"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);
        let params = SearchMovieParams::new("o poderoso chefão");

        // Act
        let page = client.search_movie(&params).await.unwrap();

        // Assert
        assert!(!page.results.is_empty());
    }

    #[tokio::test]
    async fn test_movie_details_videos_credits_via_http() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        for (path, body) in [
            (
                "/3/movie/603",
                include_str!("../../../../fixtures/tmdb/movie_details_603.json"),
            ),
            (
                "/3/movie/603/videos",
                include_str!("../../../../fixtures/tmdb/movie_videos_603.json"),
            ),
            (
                "/3/movie/603/credits",
                include_str!("../../../../fixtures/tmdb/movie_credits_603.json"),
            ),
        ] {
            wiremock::Mock::given(wiremock::matchers::method("GET"))
                .and(wiremock::matchers::path(path))
                .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client = mock_client(&mock_server);

        // Act
        let details = client.movie_details(603).await.unwrap();
        let videos = client.movie_videos(603).await.unwrap();
        let credits = client.movie_credits(603).await.unwrap();

        // Assert
        assert_eq!(details.summary.title, "Matrix");
        assert_eq!(videos.results.len(), 3);
        assert_eq!(credits.cast.len(), 14);
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let json_body = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer my-secret-token",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base_url = format!("{}/3/", mock_server.uri());
        let client = TmdbClient::builder()
            .base_url(base_url.parse().unwrap())
            .api_token("my-secret-token")
            .user_agent("test/0.0.0")
            .build()
            .unwrap();

        // Act & Assert (mock expect(1) verifies Authorization header)
        client
            .movie_list(MovieCategory::Popular, 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_http_error_returns_status_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        let error_body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401).set_body_string(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result = client.movie_list(MovieCategory::Upcoming, 1).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(classify_error(&err), TmdbErrorKind::Status);
        let message = format!("{err:#}");
        assert!(message.contains("TMDB API error"));
        assert!(message.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429).set_body_string("slow down"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result = client.movie_list(MovieCategory::Popular, 1).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(classify_error(&err), TmdbErrorKind::Status);
        assert!(format!("{err:#}").contains("slow down"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(r#"{"results":"#))
            .mount(&mock_server)
            .await;

        let client = mock_client(&mock_server);

        // Act
        let result = client.movie_details(603).await;

        // Assert
        assert_eq!(classify_error(&result.unwrap_err()), TmdbErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // Arrange
        let client = TmdbClient::builder()
            .base_url("http://127.0.0.1:9/3/".parse().unwrap())
            .api_key("test-key")
            .user_agent("test/0.0.0")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        // Act
        let result = client.movie_videos(603).await;

        // Assert
        assert_eq!(
            classify_error(&result.unwrap_err()),
            TmdbErrorKind::Transport
        );
    }
}
