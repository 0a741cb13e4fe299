//! TUI rendering logic for the movie browser.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Row, Table, Tabs, Wrap};
use watchme_api::tmdb::{MovieCategory, MovieDetails, MovieSummary};
use watchme_core::ListView;
use watchme_core::display::{
    DateStyle, format_money, format_rating, format_release_date, format_runtime,
};

use super::state::{BrowserState, DetailTab, InputMode, ListSource};

/// Videos listed on the Videos tab.
const MAX_VIDEOS: usize = 5;

/// Draws the browser UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &mut BrowserState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Min(5),    // main content
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], state);

    let pane_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(30)])
        .split(chunks[1]);

    draw_categories(frame, pane_chunks[0], state);
    draw_movies(frame, pane_chunks[1], state);
    draw_footer(frame, chunks[2], state);

    if state.detail_open() {
        draw_detail(frame, centered(frame.area(), 80, 80), state);
    }
}

/// Draws the search input.
fn draw_header(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let style = if state.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(state.search_input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "));
    frame.render_widget(search, area);
}

/// Draws the category sidebar.
fn draw_categories(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let active = (state.source == ListSource::Category).then(|| state.category());
    let items: Vec<ListItem> = MovieCategory::ALL
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let style = if Some(*category) == active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", i.saturating_add(1), category.label())).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Categories "));
    frame.render_widget(list, area);
}

/// Draws the movie table, or the loading / error / empty message in its place.
fn draw_movies(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let title = match state.source {
        ListSource::Category => format!(" {} ", state.category().title()),
        ListSource::Search => format!(" Search: \"{}\" ", state.search.query()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    let rows: Vec<Row> = match state.view() {
        ListView::Loading => {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
            return;
        }
        ListView::Error(err) => {
            let mut lines = vec![Line::styled(
                err.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )];
            if let Some(detail) = &err.detail {
                lines.push(Line::styled(
                    detail.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }
        ListView::Empty => {
            frame.render_widget(Paragraph::new("No movies found").block(block), area);
            return;
        }
        ListView::Movies(movies) => movies
            .iter()
            .map(|m| {
                Row::new(vec![
                    m.title.clone(),
                    format_release_date(&m.release_date, DateStyle::Short, state.locale)
                        .unwrap_or_else(|| String::from("-")),
                    format!("\u{2605} {}", format_rating(m.vote_average)),
                ])
            })
            .collect(),
    };

    let header = Row::new(vec!["Title", "Release", "Rating"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let widths = [
        Constraint::Min(30),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws the detail overlay.
///
/// Title, date, rating and synopsis come from the movie summary; runtime,
/// genres, tagline and the money/production facts only appear once the
/// metadata request has succeeded. Cast and videos render on their own.
#[allow(clippy::indexing_slicing)]
fn draw_detail(frame: &mut Frame, area: Rect, state: &BrowserState) {
    frame.render_widget(Clear, area);

    let Some(summary) = state.detail_summary() else {
        return;
    };
    let details = state.detail.details();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", summary.title))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header lines
            Constraint::Length(1), // tabs
            Constraint::Min(3),    // tab body
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(header_lines(summary, details, state)).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.title()))
        .select(state.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[1]);

    let body = match state.tab {
        DetailTab::Overview => overview_lines(summary, details, state),
        DetailTab::Cast => cast_lines(state),
        DetailTab::Videos => video_lines(state),
    };
    let body = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0));
    frame.render_widget(body, chunks[2]);
}

/// Title, facts line, genres, tagline, poster and trailer hint.
fn header_lines<'a>(
    summary: &'a MovieSummary,
    details: Option<&'a MovieDetails>,
    state: &BrowserState,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    let mut title = vec![Span::styled(
        summary.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !summary.original_title.is_empty() && summary.original_title != summary.title {
        title.push(Span::raw(format!(" ({})", summary.original_title)));
    }
    lines.push(Line::from(title));

    let facts: Vec<String> = [
        format_release_date(&summary.release_date, DateStyle::Long, state.locale),
        details.and_then(|d| format_runtime(d.runtime)),
        Some(format!("\u{2605} {} / 5", format_rating(summary.vote_average))),
    ]
    .into_iter()
    .flatten()
    .collect();
    lines.push(Line::from(facts.join("  \u{00b7}  ")));

    if let Some(details) = details {
        if !details.genres.is_empty() {
            let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
            lines.push(Line::styled(genres.join(", "), Style::default().fg(Color::Green)));
        }
        if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
            lines.push(Line::styled(
                tagline,
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }
    } else if state.detail.is_loading() {
        lines.push(Line::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let poster = state
        .images
        .resolve(summary.poster_path.as_deref())
        .url()
        .map_or_else(|| String::from("(no poster)"), String::from);
    lines.push(Line::styled(
        format!("Poster: {poster}"),
        Style::default().fg(Color::DarkGray),
    ));

    if state.detail.trailer().is_some() {
        lines.push(Line::styled(
            "t: watch trailer",
            Style::default().fg(Color::Magenta),
        ));
    }
    lines
}

/// Synopsis plus money and production facts.
fn overview_lines<'a>(
    summary: &'a MovieSummary,
    details: Option<&'a MovieDetails>,
    state: &BrowserState,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    if summary.overview.is_empty() {
        lines.push(Line::styled(
            "No synopsis available.",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        lines.push(Line::from(summary.overview.as_str()));
    }

    let Some(details) = details else {
        return lines;
    };
    lines.push(Line::default());

    if let Some(budget) = format_money(details.budget, state.locale) {
        lines.push(Line::from(format!("Budget: {budget}")));
    }
    if let Some(revenue) = format_money(details.revenue, state.locale) {
        lines.push(Line::from(format!("Revenue: {revenue}")));
    }
    if !details.production_companies.is_empty() {
        let names: Vec<&str> = details
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        lines.push(Line::from(format!("Production: {}", names.join(", "))));
    }
    if !details.spoken_languages.is_empty() {
        let names: Vec<&str> = details
            .spoken_languages
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        lines.push(Line::from(format!("Languages: {}", names.join(", "))));
    }
    lines
}

fn cast_lines(state: &BrowserState) -> Vec<Line<'_>> {
    let cast = state.detail.cast();
    if cast.is_empty() {
        return vec![Line::styled(
            "No cast information.",
            Style::default().fg(Color::DarkGray),
        )];
    }
    cast.iter()
        .map(|member| {
            let mut spans = vec![Span::styled(
                member.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if !member.character.is_empty() {
                spans.push(Span::raw(format!(" as {}", member.character)));
            }
            let profile = state.images.resolve(member.profile_path.as_deref());
            if let Some(url) = profile.url() {
                spans.push(Span::styled(
                    format!("  {url}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect()
}

fn video_lines(state: &BrowserState) -> Vec<Line<'_>> {
    let videos = state.detail.videos();
    if videos.is_empty() {
        return vec![Line::styled(
            "No videos.",
            Style::default().fg(Color::DarkGray),
        )];
    }
    videos
        .iter()
        .take(MAX_VIDEOS)
        .map(|v| {
            let official = if v.official { " \u{2713}" } else { "" };
            Line::from(format!(
                "[{}] {} ({}){official}",
                v.video_type, v.name, v.site
            ))
        })
        .collect()
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help_text = match state.input_mode {
        InputMode::Search => Line::from("Type to search | Esc: cancel | Enter: search"),
        InputMode::Normal if state.detail_open() => Line::from(vec![Span::raw(
            "\u{2190}\u{2192}: tab  \u{2191}\u{2193}/j/k: scroll  t: trailer  Esc/q: close",
        )]),
        InputMode::Normal => Line::from(vec![Span::raw(
            "1-4/Tab: category  \u{2191}\u{2193}/j/k: move  Enter: details  /: search  q: quit",
        )]),
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Returns a rect of `percent_x` x `percent_y` centered in `area`.
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
