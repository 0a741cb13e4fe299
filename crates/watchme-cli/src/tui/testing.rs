//! In-memory `TmdbApi` for browser tests.

use anyhow::{Result, bail};
use watchme_api::image::ImageResolver;
use watchme_api::tmdb::{
    CastMember, Genre, MovieCategory, MovieCredits, MovieDetails, MoviePage, MovieSummary,
    MovieVideos, SearchMovieParams, TmdbApi, Video,
};
use watchme_core::display::DisplayLocale;

use super::state::BrowserState;

/// Serves one movie (603) with a trailer and one cast member.
#[derive(Debug, Default)]
pub struct StubTmdbApi {
    /// Makes `movie/{id}` fail with a server error.
    pub fail_details: bool,
}

/// The single movie every list and search returns.
pub fn matrix() -> MovieSummary {
    MovieSummary {
        id: 603,
        title: String::from("Matrix"),
        overview: String::from("Um hacker descobre a verdade sobre a realidade."),
        release_date: String::from("1999-03-31"),
        vote_average: 8.2,
        ..MovieSummary::default()
    }
}

fn page(results: Vec<MovieSummary>) -> MoviePage {
    MoviePage {
        page: 1,
        results,
        total_pages: 1,
        total_results: 1,
    }
}

impl TmdbApi for StubTmdbApi {
    async fn movie_list(&self, _category: MovieCategory, _page: u32) -> Result<MoviePage> {
        Ok(page(vec![matrix()]))
    }

    async fn search_movie(&self, _params: &SearchMovieParams) -> Result<MoviePage> {
        Ok(page(vec![matrix()]))
    }

    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        if self.fail_details {
            bail!("TMDB API error for movie/{movie_id}: HTTP 500 Internal Server Error");
        }
        Ok(MovieDetails {
            summary: matrix(),
            runtime: Some(136),
            genres: vec![Genre {
                id: 28,
                name: String::from("Ação"),
            }],
            budget: Some(63_000_000),
            tagline: Some(String::from("Bem-vindo ao mundo real.")),
            ..MovieDetails::default()
        })
    }

    async fn movie_videos(&self, movie_id: u64) -> Result<MovieVideos> {
        Ok(MovieVideos {
            id: movie_id,
            results: vec![Video {
                id: String::from("v1"),
                key: String::from("vKQi3bBA1y8"),
                name: String::from("Official Trailer"),
                site: String::from("YouTube"),
                video_type: String::from("Trailer"),
                official: true,
            }],
        })
    }

    async fn movie_credits(&self, movie_id: u64) -> Result<MovieCredits> {
        Ok(MovieCredits {
            id: movie_id,
            cast: vec![CastMember {
                id: 6384,
                name: String::from("Keanu Reeves"),
                character: String::from("Neo"),
                profile_path: None,
                order: 0,
            }],
        })
    }
}

/// Browser state with the popular list loaded and the cursor on its first row.
pub async fn loaded_state(api: &StubTmdbApi) -> BrowserState {
    let mut state = BrowserState::new(DisplayLocale::PtBr, ImageResolver::default());
    state.list.load(api, MovieCategory::Popular).await;
    state.reset_cursor();
    state
}

/// Opens the movie under the cursor and applies all three detail responses.
pub async fn open_loaded_detail(state: &mut BrowserState, api: &StubTmdbApi) {
    if let Some(request) = state.open_detail() {
        for response in request.run_all(api).await {
            state.detail.apply(response);
        }
    }
}
