//! Browser state: fetchers, cursor and UI modes.

use ratatui::widgets::TableState;
use watchme_api::image::ImageResolver;
use watchme_api::tmdb::{MovieCategory, MovieSummary};
use watchme_core::display::DisplayLocale;
use watchme_core::{DetailFetcher, DetailRequest, ListFetcher, ListView, SearchFetcher};

/// Which result set the movie table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// The active category.
    Category,
    /// Search results.
    Search,
}

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// Tabs of the detail overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    /// Synopsis, money and production info.
    #[default]
    Overview,
    /// Credited cast.
    Cast,
    /// Promotional videos.
    Videos,
}

impl DetailTab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Overview, Self::Cast, Self::Videos];

    /// Tab label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Cast => "Cast",
            Self::Videos => "Videos",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Cast => 1,
            Self::Videos => 2,
        }
    }

    /// Tab to the right, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Overview => Self::Cast,
            Self::Cast => Self::Videos,
            Self::Videos => Self::Overview,
        }
    }

    /// Tab to the left, wrapping around.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Videos,
            Self::Cast => Self::Overview,
            Self::Videos => Self::Cast,
        }
    }
}

/// State for the movie browser TUI.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct BrowserState {
    /// Category list fetcher.
    pub list: ListFetcher,
    /// Search fetcher.
    pub search: SearchFetcher,
    /// Detail fetcher; a movie is open while `detail.movie_id()` is set.
    pub detail: DetailFetcher,
    /// Table row the detail overlay was opened from.
    pub detail_movie: Option<MovieSummary>,
    /// Result set shown in the table.
    pub source: ListSource,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search text being edited.
    pub search_input: String,
    /// Table state for the movie list (handles selection and scroll).
    pub table_state: TableState,
    /// Active detail tab.
    pub tab: DetailTab,
    /// Vertical scroll of the detail tab body.
    pub detail_scroll: u16,
    /// Date and number formatting.
    pub locale: DisplayLocale,
    /// Poster and profile URL builder.
    pub images: ImageResolver,
}

impl BrowserState {
    /// Creates an empty browser state.
    #[must_use]
    pub fn new(locale: DisplayLocale, images: ImageResolver) -> Self {
        Self {
            list: ListFetcher::new(),
            search: SearchFetcher::new(),
            detail: DetailFetcher::new(),
            detail_movie: None,
            source: ListSource::Category,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            table_state: TableState::default(),
            tab: DetailTab::Overview,
            detail_scroll: 0,
            locale,
            images,
        }
    }

    /// Active category (defaults to popular before the first selection).
    #[must_use]
    pub fn category(&self) -> MovieCategory {
        self.list.category().unwrap_or_default()
    }

    /// What the table area should render.
    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        match self.source {
            ListSource::Category => self.list.view(),
            ListSource::Search => self.search.view(),
        }
    }

    /// Movies in the shown result set.
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        match self.source {
            ListSource::Category => self.list.movies(),
            ListSource::Search => self.search.movies(),
        }
    }

    /// Returns the cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// Movie under the cursor.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.movies().get(self.cursor())
    }

    /// Whether the detail overlay is shown.
    #[must_use]
    pub const fn detail_open(&self) -> bool {
        self.detail.movie_id().is_some()
    }

    /// Opens the detail overlay for the movie under the cursor.
    pub fn open_detail(&mut self) -> Option<DetailRequest> {
        let movie = self.selected_movie()?.clone();
        let request = self.detail.open(movie.id);
        self.detail_movie = Some(movie);
        self.set_tab(DetailTab::Overview);
        Some(request)
    }

    /// Closes the detail overlay.
    pub fn close_detail(&mut self) {
        self.detail.close();
        self.detail_movie = None;
    }

    /// Summary shown in the overlay header.
    ///
    /// Prefers the loaded metadata and falls back to the table row, so title,
    /// date and rating stay visible when the metadata request fails.
    #[must_use]
    pub fn detail_summary(&self) -> Option<&MovieSummary> {
        self.detail
            .details()
            .map(|details| &details.summary)
            .or(self.detail_movie.as_ref())
    }

    /// Puts the cursor on the first movie, or clears it when there is none.
    pub fn reset_cursor(&mut self) {
        if self.movies().is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    /// Moves cursor up.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_up(&mut self) {
        let current = self.cursor();
        if current > 0 {
            self.table_state.select(Some(current - 1));
        }
    }

    /// Moves cursor down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let current = self.cursor();
        if current + 1 < self.movies().len() {
            self.table_state.select(Some(current + 1));
        }
    }

    /// Switches the detail overlay to `tab`, scrolled to the top.
    pub const fn set_tab(&mut self, tab: DetailTab) {
        self.tab = tab;
        self.detail_scroll = 0;
    }

    /// Scrolls the detail body up one line.
    pub const fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    /// Scrolls the detail body down one line.
    pub const fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }
}
