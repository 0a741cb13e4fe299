//! In-memory `TmdbApi` for fetcher tests.

use std::sync::Mutex;

use anyhow::{Result, bail};
use watchme_api::tmdb::{
    CastMember, MovieCategory, MovieCredits, MovieDetails, MoviePage, MovieSummary, MovieVideos,
    SearchMovieParams, TmdbApi, Video,
};

/// Canned responses plus a log of the requests made.
#[derive(Debug, Default)]
pub struct MockTmdbApi {
    pub movies: Vec<MovieSummary>,
    pub videos: Vec<Video>,
    pub cast: Vec<CastMember>,
    pub fail_list: bool,
    pub fail_search: bool,
    pub fail_details: bool,
    pub fail_videos: bool,
    pub fail_credits: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockTmdbApi {
    pub fn with_movies(movies: Vec<MovieSummary>) -> Self {
        Self {
            movies,
            ..Self::default()
        }
    }

    /// Requests made so far, in order.
    #[allow(clippy::unwrap_used)]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    #[allow(clippy::unwrap_used)]
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn page(&self) -> MoviePage {
        MoviePage {
            page: 1,
            results: self.movies.clone(),
            total_pages: 1,
            total_results: u32::try_from(self.movies.len()).unwrap_or(u32::MAX),
        }
    }
}

pub fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_owned(),
        original_title: title.to_owned(),
        vote_average: 7.2,
        release_date: String::from("1999-03-31"),
        ..MovieSummary::default()
    }
}

pub fn video(key: &str, video_type: &str, official: bool) -> Video {
    Video {
        id: format!("v-{key}"),
        key: key.to_owned(),
        name: format!("{video_type} {key}"),
        site: String::from("YouTube"),
        video_type: video_type.to_owned(),
        official,
    }
}

pub fn cast_member(order: u32) -> CastMember {
    CastMember {
        id: u64::from(order) + 1000,
        name: format!("Actor {order}"),
        character: format!("Role {order}"),
        profile_path: None,
        order,
    }
}

impl TmdbApi for MockTmdbApi {
    async fn movie_list(&self, category: MovieCategory, page: u32) -> Result<MoviePage> {
        self.record(format!("movie/{category}?page={page}"));
        if self.fail_list {
            bail!("TMDB API error (HTTP 500): internal error");
        }
        Ok(self.page())
    }

    async fn search_movie(&self, params: &SearchMovieParams) -> Result<MoviePage> {
        self.record(format!("search/movie?query={}", params.query));
        if self.fail_search {
            bail!("TMDB API error (HTTP 503): service unavailable");
        }
        Ok(self.page())
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        self.record(format!("movie/{movie_id}"));
        if self.fail_details {
            bail!("TMDB API error (HTTP 404): not found");
        }
        let summary = self
            .movies
            .iter()
            .find(|m| m.id == movie_id)
            .cloned()
            .unwrap_or_else(|| movie(movie_id, "Unknown"));
        Ok(MovieDetails {
            summary,
            runtime: Some(136),
            ..MovieDetails::default()
        })
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<MovieVideos> {
        self.record(format!("movie/{movie_id}/videos"));
        if self.fail_videos {
            bail!("connection reset");
        }
        Ok(MovieVideos {
            id: movie_id,
            results: self.videos.clone(),
        })
    }

    async fn movie_credits(&self, movie_id: u64) -> Result<MovieCredits> {
        self.record(format!("movie/{movie_id}/credits"));
        if self.fail_credits {
            bail!("connection reset");
        }
        Ok(MovieCredits {
            id: movie_id,
            cast: self.cast.clone(),
        })
    }
}
