//! TUI event handling with crossterm.
//!
//! # Overview
//!
//! Polls the terminal for key events and translates them to [`Action`]s.
//! The mapping is mode-aware: the add-file prompt consumes printable
//! characters as input, while list mode uses them as shortcuts
//! (vim-style and arrow keys both work).

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{Action, AppMode};

/// Error type for event handling.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// I/O error while polling or reading terminal events.
    #[error("event I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Polls crossterm for key events.
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    /// Create a new event handler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Poll for the next key press within `timeout`.
    ///
    /// Returns `Ok(None)` when the timeout elapses without input or the
    /// event is not a key press (resize events are handled implicitly by
    /// rendering every frame).
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Io`] if the terminal backend fails.
    pub fn poll(&self, timeout: Duration) -> Result<Option<KeyEvent>, EventError> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
            _ => Ok(None),
        }
    }
}

/// Translate a key press into an action for the given mode.
#[must_use]
pub fn resolve(mode: AppMode, key: &KeyEvent) -> Option<Action> {
    // Ctrl+C always quits, regardless of mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match mode {
        AppMode::AddingFile => match key.code {
            KeyCode::Enter => Some(Action::Confirm),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            _ => None,
        },
        AppMode::Selecting => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NavigateDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::NavigateUp),
            KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => {
                Some(Action::RemoveSelected)
            }
            KeyCode::Char('a') | KeyCode::Enter => Some(Action::Analyze),
            KeyCode::Char('o') => Some(Action::OpenAddFile),
            _ => None,
        },
        AppMode::Analyzing => match key.code {
            // Analysis cannot be cancelled; only quitting is allowed
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        AppMode::Quitting => None,
    }
}
