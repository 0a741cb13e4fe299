//! Movie list categories exposed by TMDB.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed movie-list partitions (`movie/{category}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    /// `movie/popular`
    #[default]
    Popular,
    /// `movie/top_rated`
    TopRated,
    /// `movie/upcoming`
    Upcoming,
    /// `movie/now_playing`
    NowPlaying,
}

/// Error returned when parsing an unknown category tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown movie category `{0}` (expected popular, top_rated, upcoming or now_playing)")]
pub struct ParseCategoryError(String);

impl MovieCategory {
    /// All categories in sidebar order.
    pub const ALL: [Self; 4] = [Self::Popular, Self::TopRated, Self::NowPlaying, Self::Upcoming];

    /// API path tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
            Self::Upcoming => "upcoming",
            Self::NowPlaying => "now_playing",
        }
    }

    /// Heading shown above the movie list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Popular => "Popular Movies",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Coming Soon",
            Self::NowPlaying => "Now Playing",
        }
    }

    /// Short label for the sidebar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
            Self::NowPlaying => "Now Playing",
        }
    }

    /// Next category in sidebar order (wraps).
    #[must_use]
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::ALL
            .get(idx.saturating_add(1))
            .copied()
            .unwrap_or(Self::Popular)
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub fn position(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovieCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "popular" => Ok(Self::Popular),
            "top_rated" => Ok(Self::TopRated),
            "upcoming" => Ok(Self::Upcoming),
            "now_playing" => Ok(Self::NowPlaying),
            _ => Err(ParseCategoryError(String::from(s))),
        }
    }
}
