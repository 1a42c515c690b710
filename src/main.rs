//! Terminal shim and entry point.
//!
//! This module provides the thin integration layer between the postdeck
//! library and the terminal. It owns the crossterm setup, the event loop, the
//! fetch worker handle, and the translation from raw key presses to library
//! events.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │   Terminal Main Thread   │
//! │  ┌───────────────────┐   │
//! │  │  AppState (lib)   │   │  ← UI state, event handling
//! │  └───────────────────┘   │
//! │          │               │
//! │          │ mpsc channels │
//! │          ▼               │
//! │  ┌───────────────────┐   │
//! │  │   Fetch Worker    │   │  ← HTTP requests
//! │  │  (worker thread)  │   │  ← tokio runtime
//! │  └───────────────────┘   │
//! └──────────────────────────┘
//! ```
//!
//! # Event Loop
//!
//! Each iteration:
//! 1. Drain completed worker responses and apply them as events
//! 2. Poll the terminal for input with a short timeout
//! 3. Translate key presses to library events (mode dependent)
//! 4. Execute returned actions (worker posts, quit)
//! 5. Re-render when any handled event reported visible changes
//! 6. After rendering, emit `LoadMore` if the selection sits on the last
//!    visible row (the terminal equivalent of a scroll sentinel)
//!
//! # Keybindings
//!
//! In normal mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `Enter`: Open comments overlay for the selected post
//! - `o`: Open the detail page for the selected post
//! - `/`: Enter search mode
//! - `q` / `Ctrl+c`: Quit
//!
//! In search mode (typing):
//! - Characters/`Backspace`: Edit the filter query
//! - `Enter`: Move focus to the filtered results
//! - `Esc`: Exit search and clear the query
//!
//! In search mode (navigating):
//! - `j`/`k`: Move through filtered results
//! - `Enter`: Open comments overlay
//! - `o`: Open detail page
//! - `/`: Return to the search input
//! - `Esc`: Exit search and clear the query
//!
//! On the detail page:
//! - `Esc`/`b`: Back to the list
//! - `q`: Quit
//!
//! With the comments overlay open:
//! - `j`/`k`: Scroll comments
//! - `Esc`: Close the overlay

#![allow(clippy::multiple_crate_versions)]

use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::event::{Event as TermEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute};

use postdeck::worker::{self, WorkerHandle};
use postdeck::{handle_event, Action, Config, Event, HttpPostSource, InputMode, Route, SearchFocus};

/// How long the input poll waits before checking the worker channel again.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Restores the terminal on drop so panics and early returns never leave raw
/// mode armed.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> postdeck::Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn main() -> postdeck::Result<()> {
    let config = Config::from_env();
    let _log_guard = postdeck::observability::init_tracing(&config);

    let span = tracing::debug_span!("startup");
    let _guard = span.entered();
    tracing::debug!(base_url = %config.base_url, "starting postdeck");

    let mut state = postdeck::initialize(&config);
    let source = HttpPostSource::new(config.base_url.clone());
    let worker = worker::spawn(Box::new(source))?;
    drop(_guard);

    let _terminal = TerminalGuard::enter()?;

    let mut app = App {
        state: &mut state,
        worker: &worker,
        running: true,
    };
    app.dispatch(&Event::Start)?;
    app.render()?;

    while app.running {
        let mut dirty = false;

        while let Some(response) = app.worker.try_recv() {
            dirty |= app.dispatch(&Event::WorkerResponse(response))?;
        }

        if crossterm::event::poll(POLL_INTERVAL)? {
            match crossterm::event::read()? {
                TermEvent::Key(key) => {
                    if let Some(event) = app.map_key_event(&key) {
                        dirty |= app.dispatch(&event)?;
                    }
                }
                TermEvent::Resize(..) => dirty = true,
                _ => {}
            }
        }

        if dirty && app.running {
            app.render()?;
        }
    }

    Ok(())
}

/// Event loop state: the library state plus the worker handle.
struct App<'a> {
    state: &'a mut postdeck::AppState,
    worker: &'a WorkerHandle,
    running: bool,
}

impl App<'_> {
    /// Feeds one event through the library handler and executes its actions.
    ///
    /// Returns whether the event requested a re-render. Handler errors are
    /// logged and swallowed so a single bad event never tears down the loop.
    fn dispatch(&mut self, event: &Event) -> postdeck::Result<bool> {
        match handle_event(self.state, event) {
            Ok((should_render, actions)) => {
                for action in actions {
                    self.execute_action(action)?;
                }
                Ok(should_render)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                Ok(false)
            }
        }
    }

    /// Executes an action returned from event handling.
    fn execute_action(&mut self, action: Action) -> postdeck::Result<()> {
        match action {
            Action::Quit => {
                tracing::debug!("quit requested");
                self.running = false;
            }
            Action::PostToWorker(request) => {
                self.worker.post(request)?;
            }
        }
        Ok(())
    }

    /// Clears the screen, renders the current state, and fires the load-more
    /// sensor when the selection sits on the last filtered row.
    ///
    /// The sensor re-fires after every render while the last row stays
    /// selected, mirroring how a scroll sentinel keeps reporting visibility
    /// until new rows push it away.
    fn render(&mut self) -> postdeck::Result<()> {
        let (cols, rows) = crossterm::terminal::size()?;
        let mut out = stdout();
        execute!(out, Clear(ClearType::All))?;
        postdeck::ui::render(self.state, rows as usize, cols as usize);
        out.flush()?;

        if self.state.sentinel_visible() {
            let requested = self.dispatch(&Event::LoadMore)?;
            // LoadMore never renders by itself; the page response will.
            debug_assert!(!requested);
        }
        Ok(())
    }

    /// Maps keyboard events to application events, depending on the current
    /// input mode, route, and overlay.
    fn map_key_event(&self, key: &KeyEvent) -> Option<Event> {
        tracing::trace!(code = ?key.code, "key event");

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Event::Quit);
        }

        if matches!(self.state.route, Route::Detail { .. }) {
            return Some(match key.code {
                KeyCode::Esc | KeyCode::Char('b') => Event::BackToList,
                KeyCode::Char('q') => Event::Quit,
                _ => return None,
            });
        }

        if self.state.overlay.is_some() {
            return Some(match key.code {
                KeyCode::Esc => Event::CloseOverlay,
                KeyCode::Down | KeyCode::Char('j') => Event::KeyDown,
                KeyCode::Up | KeyCode::Char('k') => Event::KeyUp,
                KeyCode::Char('q') => Event::Quit,
                _ => return None,
            });
        }

        Some(match key.code {
            KeyCode::Down => Event::KeyDown,
            KeyCode::Up => Event::KeyUp,
            KeyCode::Esc => match self.state.input_mode {
                InputMode::Search(_) => Event::ExitSearch,
                InputMode::Normal => Event::Escape,
            },
            KeyCode::Enter => match self.state.input_mode {
                InputMode::Search(SearchFocus::Typing) => Event::FocusResults,
                _ => Event::OpenComments,
            },
            KeyCode::Char('/') => match self.state.input_mode {
                InputMode::Normal => Event::SearchMode,
                InputMode::Search(_) => Event::FocusSearchBar,
            },
            KeyCode::Backspace => Event::Backspace,
            KeyCode::Char(c) => match self.state.input_mode {
                InputMode::Search(SearchFocus::Typing) => Event::Char(c),
                _ => match c {
                    'j' => Event::KeyDown,
                    'k' => Event::KeyUp,
                    'q' => Event::Quit,
                    'o' => Event::OpenDetail,
                    _ => return None,
                },
            },
            _ => return None,
        })
    }
}
