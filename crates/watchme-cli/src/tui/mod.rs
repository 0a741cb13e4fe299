//! Movie browser TUI.
//!
//! Uses `ratatui` + `crossterm` for rendering. Network requests run as
//! spawned tasks and report back over a channel, so input stays responsive
//! while fetches are in flight.

/// Browser state types.
pub mod state;
#[cfg(test)]
mod testing;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use watchme_api::tmdb::{MovieCategory, TmdbApi};
use watchme_core::{
    DetailRequest, DetailResponse, ListRequest, ListResponse, SearchRequest, SearchResponse,
    watch_url,
};

use self::state::{BrowserState, InputMode, ListSource};

/// A fetch result delivered back to the event loop.
#[derive(Debug)]
enum Message {
    List(ListResponse),
    Search(SearchResponse),
    Detail(DetailResponse),
}

/// Side effect requested by a key press.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    FetchList(ListRequest),
    FetchSearch(SearchRequest),
    FetchDetail(DetailRequest),
    OpenUrl(String),
}

/// Runs the browser until the user quits. Returns the last active category.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing or event reading fails.
pub async fn run_browser<A>(
    api: Arc<A>,
    mut state: BrowserState,
    category: MovieCategory,
) -> Result<MovieCategory>
where
    A: TmdbApi + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend).context("failed to create terminal") {
        Ok(mut terminal) => run_event_loop(&mut terminal, &api, &mut state, category).await,
        Err(err) => Err(err),
    };

    // Cleanup (always attempt even if event loop failed)
    let cleanup = restore_terminal();
    if let (Err(_), Err(err)) = (&result, &cleanup) {
        tracing::error!(error = format!("{err:#}"), "failed to restore terminal");
    }

    result.and(cleanup).map(|()| state.category())
}

/// Leaves raw mode and the alternate screen. Both steps run even if the
/// first one fails.
fn restore_terminal() -> Result<()> {
    let raw_mode = disable_raw_mode().context("failed to disable raw mode");
    let screen = crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen");
    combine_cleanup(raw_mode, screen)
}

/// Merges the outcomes of two cleanup steps, keeping both messages.
fn combine_cleanup(first: Result<()>, second: Result<()>) -> Result<()> {
    match (first, second) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
        (Err(first), Err(second)) => Err(second.context(format!("{first:#}"))),
    }
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: &Arc<A>,
    state: &mut BrowserState,
    category: MovieCategory,
) -> Result<()>
where
    A: TmdbApi + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();

    let request = state.list.begin(category);
    dispatch(Command::FetchList(request), api, &tx);

    loop {
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = handle_key(state, key) {
                        if command == Command::Quit {
                            return Ok(());
                        }
                        dispatch(command, api, &tx);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err).context("failed to read terminal event"),
                None => return Ok(()),
            },
            Some(message) = rx.recv() => apply_message(state, message),
        }
    }
}

/// Spawns the network work behind a command.
fn dispatch<A>(command: Command, api: &Arc<A>, tx: &mpsc::UnboundedSender<Message>)
where
    A: TmdbApi + Sync + 'static,
{
    match command {
        Command::Quit => {}
        Command::FetchList(request) => {
            let (api, tx) = (Arc::clone(api), tx.clone());
            tokio::spawn(async move {
                let response = request.run(api.as_ref()).await;
                let _ = tx.send(Message::List(response));
            });
        }
        Command::FetchSearch(request) => {
            let (api, tx) = (Arc::clone(api), tx.clone());
            tokio::spawn(async move {
                let response = request.run(api.as_ref()).await;
                let _ = tx.send(Message::Search(response));
            });
        }
        Command::FetchDetail(request) => {
            let (details_api, details_tx) = (Arc::clone(api), tx.clone());
            tokio::spawn(async move {
                let response = request.details(details_api.as_ref()).await;
                let _ = details_tx.send(Message::Detail(response));
            });
            let (videos_api, videos_tx) = (Arc::clone(api), tx.clone());
            tokio::spawn(async move {
                let response = request.videos(videos_api.as_ref()).await;
                let _ = videos_tx.send(Message::Detail(response));
            });
            let (credits_api, credits_tx) = (Arc::clone(api), tx.clone());
            tokio::spawn(async move {
                let response = request.credits(credits_api.as_ref()).await;
                let _ = credits_tx.send(Message::Detail(response));
            });
        }
        Command::OpenUrl(url) => {
            if let Err(err) = open::that(&url) {
                tracing::warn!(url = %url, error = %err, "failed to open browser");
            }
        }
    }
}

/// Applies a fetch result to the state.
fn apply_message(state: &mut BrowserState, message: Message) {
    match message {
        Message::List(response) => {
            if state.list.apply(response) && state.source == ListSource::Category {
                state.reset_cursor();
            }
        }
        Message::Search(response) => {
            if state.search.apply(response) && state.source == ListSource::Search {
                state.reset_cursor();
            }
        }
        Message::Detail(response) => {
            state.detail.apply(response);
        }
    }
}

/// Routes a key press to the active mode.
fn handle_key(state: &mut BrowserState, key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match state.input_mode {
        InputMode::Search => handle_search_input(state, key.code),
        InputMode::Normal if state.detail_open() => handle_detail_input(state, key.code),
        InputMode::Normal => handle_list_input(state, key.code),
    }
}

/// Handles key input while typing a search.
fn handle_search_input(state: &mut BrowserState, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Esc => {
            state.input_mode = InputMode::Normal;
            None
        }
        KeyCode::Enter => {
            state.input_mode = InputMode::Normal;
            let request = state.search.begin(&state.search_input);
            state.source = if request.is_some() {
                ListSource::Search
            } else {
                ListSource::Category
            };
            state.reset_cursor();
            request.map(Command::FetchSearch)
        }
        KeyCode::Backspace => {
            state.search_input.pop();
            None
        }
        KeyCode::Char(c) => {
            state.search_input.push(c);
            None
        }
        _ => None,
    }
}

/// Handles key input on the movie list.
fn handle_list_input(state: &mut BrowserState, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())?;
            let category = MovieCategory::ALL.get(index.checked_sub(1)?).copied()?;
            Some(select_category(state, category))
        }
        KeyCode::Tab => {
            let next = state.category().next();
            Some(select_category(state, next))
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            None
        }
        KeyCode::Char('/') => {
            state.input_mode = InputMode::Search;
            None
        }
        KeyCode::Esc if state.source == ListSource::Search => {
            state.source = ListSource::Category;
            state.reset_cursor();
            None
        }
        KeyCode::Enter => state.open_detail().map(Command::FetchDetail),
        _ => None,
    }
}

/// Handles key input while the detail overlay is open.
fn handle_detail_input(state: &mut BrowserState, key: KeyCode) -> Option<Command> {
    match key {
        KeyCode::Esc | KeyCode::Char('q') => state.close_detail(),
        KeyCode::Right | KeyCode::Char('l') => state.set_tab(state.tab.next()),
        KeyCode::Left | KeyCode::Char('h') => state.set_tab(state.tab.prev()),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_up(),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_down(),
        KeyCode::Char('t') => {
            let trailer = state.detail.trailer()?;
            return Some(Command::OpenUrl(watch_url(&trailer.key)));
        }
        _ => {}
    }
    None
}

/// Switches the table to `category` and starts its fetch.
fn select_category(state: &mut BrowserState, category: MovieCategory) -> Command {
    state.source = ListSource::Category;
    let request = state.list.begin(category);
    state.table_state.select(None);
    Command::FetchList(request)
}
