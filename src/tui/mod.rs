// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (input, ticks, finished background work)
// - Layered key dispatch into the app

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod traits;
pub mod ui;

use crate::clipboard::ClipboardWriter;
use crate::config::Config;
use crate::generator::Generator;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, OutcomeSenders};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use scroll::FocusablePanel;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use traits::Scrollable;

/// Outcome channel depth; at most one generation and a few copies are ever pending
const OUTCOME_CHANNEL_SIZE: usize = 16;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(
    config: Config,
    log_buffer: LogBuffer,
    generator: Arc<dyn Generator>,
    clipboard: Arc<dyn ClipboardWriter>,
) -> Result<()> {
    let (generation_tx, mut generation_rx) = mpsc::channel(OUTCOME_CHANNEL_SIZE);
    let (copy_tx, mut copy_rx) = mpsc::channel(OUTCOME_CHANNEL_SIZE);

    let mut app = App::new(
        &config,
        log_buffer,
        generator,
        clipboard,
        OutcomeSenders {
            generation: generation_tx,
            copy: copy_tx,
        },
    );

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let tick_rate = Duration::from_millis(config.tick_rate_ms.max(1));
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        tick_rate,
        &mut generation_rx,
        &mut copy_rx,
    )
    .await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on four sources at once:
/// 1. Keyboard and mouse input
/// 2. Timer ticks (spinner, copied indicator and toast expiry)
/// 3. Finished generator calls
/// 4. Finished clipboard writes
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
    generation_rx: &mut mpsc::Receiver<crate::chat::GenerationOutcome>,
    copy_rx: &mut mpsc::Receiver<crate::chat::CopyOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick_rate);

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Short poll keeps the other branches responsive
            input = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            } => match input {
                Some(Event::Key(key_event)) => handle_key_event(app, key_event),
                Some(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                _ => {}
            },

            _ = tick_interval.tick() => {
                app.tick(Instant::now());
            }

            Some(outcome) = generation_rx.recv() => {
                app.apply_generation(outcome);
            }

            Some(outcome) = copy_rx.recv() => {
                app.apply_copy(outcome, Instant::now());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → Focus actions → Component
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    let key = key_event.code;

    match key_event.kind {
        KeyEventKind::Press => {
            // Layer 1: global keys (work regardless of focus)
            if handle_global_keys(app, &key_event) {
                return;
            }

            // Layer 2: actions owned by the focused panel
            if handle_focus_actions(app, &key_event) {
                return;
            }

            // Typed text goes straight to the prompt; debouncing it would eat
            // doubled letters
            if !app.is_focused(FocusablePanel::Prompt) && !app.handle_key_press(key) {
                return;
            }

            // Layer 3: the focused component
            app.dispatch_to_focused(key_event);
        }
        KeyEventKind::Release => {
            app.handle_key_release(key);
        }
        _ => {}
    }
}

/// Handle global keys - returns true if handled
/// Uses InputHandler for debounce (StateChange behavior = trigger once per press)
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('l') if ctrl => {
            if app.handle_key_press(key) {
                app.toggle_logs();
            }
            true
        }
        // Copy the selected code block from anywhere
        KeyCode::Char('y') if ctrl => {
            if app.handle_key_press(key) {
                app.request_copy();
            }
            true
        }
        KeyCode::Tab => {
            if app.handle_key_press(key) {
                app.focus_next();
            }
            true
        }
        KeyCode::BackTab => {
            if app.handle_key_press(key) {
                app.focus_prev();
            }
            true
        }
        KeyCode::Esc => {
            app.focus_prompt();
            true
        }
        _ => false,
    }
}

/// Enter submits from the prompt; y/c copy from the response panel
fn handle_focus_actions(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;

    match (app.focused, key) {
        (FocusablePanel::Prompt, KeyCode::Enter) => {
            if app.handle_key_press(key) {
                app.submit();
            }
            true
        }
        (FocusablePanel::Response, KeyCode::Char('y') | KeyCode::Char('c'))
            if key_event.modifiers.is_empty() =>
        {
            if app.handle_key_press(key) {
                app.request_copy();
            }
            true
        }
        _ => false,
    }
}

/// Mouse wheel scrolls the logs panel when focused, otherwise the response
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let target: &mut dyn Scrollable = if app.is_focused(FocusablePanel::Logs) {
        &mut app.logs_panel
    } else {
        &mut app.response_panel
    };

    match mouse_event.kind {
        MouseEventKind::ScrollUp => target.scroll_up(),
        MouseEventKind::ScrollDown => target.scroll_down(),
        _ => {}
    }
}
