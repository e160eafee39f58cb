//! TUI main loop.
//!
//! # Overview
//!
//! Entry point for the interactive interface. Handles terminal setup
//! (raw mode, alternate screen, hidden cursor), the event loop, and
//! cleanup on exit, including on panic.
//!
//! # Event Loop
//!
//! Each iteration:
//! 1. Check the external shutdown flag and the app's quit state
//! 2. Render the current state
//! 3. Poll for a key event with a timeout and apply the resulting action
//! 4. Tick the analysis engine so in-flight work can complete
//! 5. Limit the frame rate to ~60 FPS
//!
//! The engine tick is what gives the scheduler its non-blocking shape:
//! an analysis started by the user completes on a later frame, after its
//! latency floor, while the loop keeps rendering and accepting input.

use std::io::{self, Stdout};
use std::panic;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::{Action, App, AppMode};
use super::events::{resolve, EventHandler};
use super::ui::render;
use crate::collection::FileDescriptor;

/// Frame rate limit: 60 FPS = ~16.67ms per frame.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Event poll timeout: matches the frame duration for responsive updates.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(#[from] super::events::EventError),
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Type alias for the terminal backend.
type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive TUI until the user quits or shutdown is signaled.
///
/// # Arguments
///
/// * `app` - The application state, typically preloaded with descriptors
/// * `shutdown_flag` - Optional flag for external shutdown (Ctrl+C handler)
///
/// # Terminal Restoration
///
/// The terminal is always restored to its original state, even on error
/// or panic.
///
/// # Errors
///
/// Returns [`TuiError::Io`] for terminal I/O errors and
/// [`TuiError::Event`] for event handling errors.
pub fn run_tui(app: &mut App, shutdown_flag: Option<Arc<AtomicBool>>) -> TuiResult<()> {
    // Restore the terminal before any panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(app, shutdown_flag);

    let _ = panic::take_hook();

    result
}

/// Inner loop, separated so cleanup in `run_tui` stays in one place.
fn run_tui_inner(app: &mut App, shutdown_flag: Option<Arc<AtomicBool>>) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;
    let event_handler = EventHandler::new();
    let mut last_render = Instant::now();

    loop {
        if let Some(ref flag) = shutdown_flag {
            if flag.load(Ordering::SeqCst) {
                log::info!("Shutdown signal received, exiting TUI");
                break;
            }
        }

        if app.should_quit() {
            log::debug!("App requested quit");
            break;
        }

        terminal.draw(|frame| render(frame, app))?;

        if let Some(key) = event_handler.poll(POLL_TIMEOUT)? {
            if let Some(action) = resolve(app.mode(), &key) {
                handle_action(app, action);
            }
        }

        // Let a pending analysis complete once its floor has elapsed
        app.tick(Instant::now());

        let elapsed = last_render.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        last_render = Instant::now();
    }

    restore_terminal()?;

    log::info!("TUI exited normally");
    Ok(())
}

/// Handle a user action.
///
/// Most actions are plain state updates applied by [`App::handle_action`];
/// confirming the add-file prompt additionally needs filesystem access to
/// build the descriptor, which is done here so the app state stays pure.
fn handle_action(app: &mut App, action: Action) {
    let now = Instant::now();
    let was_handled = app.handle_action(action, now);

    if action == Action::Confirm && app.mode() == AppMode::AddingFile {
        let path_text = app.take_input();
        if path_text.trim().is_empty() {
            app.set_mode(AppMode::Selecting);
            return;
        }

        match descriptor_from_path(Path::new(path_text.trim())) {
            Ok(descriptor) => {
                app.submit_files(vec![descriptor]);
                app.set_mode(AppMode::Selecting);
            }
            Err(e) => {
                app.set_mode(AppMode::Selecting);
                app.set_notice(format!("Cannot add file: {}", e));
            }
        }
    } else if !was_handled {
        log::trace!("Action not handled: {:?}", action);
    }
}

/// Build a descriptor from a filesystem path.
///
/// This is collaborator-side glue: only here does the application touch
/// the filesystem, and only to read metadata. The analysis engine itself
/// never opens files.
pub fn descriptor_from_path(path: &Path) -> anyhow::Result<FileDescriptor> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    if !metadata.is_file() {
        anyhow::bail!("{}: not a regular file", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| anyhow::anyhow!("{}: path has no file name", path.display()))?;

    Ok(FileDescriptor::new(name, metadata.len()))
}

/// Set up the terminal for TUI mode.
fn setup_terminal() -> TuiResult<Terminal> {
    log::debug!("Setting up terminal for TUI");

    terminal::enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    log::debug!("Terminal setup complete");
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    log::debug!("Restoring terminal");

    let _ = terminal::disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);

    Ok(())
}
