//! TUI application state management.
//!
//! # Overview
//!
//! The `App` struct is the central state container for the interactive
//! session and the boundary the UI renders from. It owns:
//! - The [`Collection`] of submitted file descriptors
//! - The analysis [`Engine`] (scheduler state and latest result)
//! - Navigation state (selected index, scroll offset)
//! - The current mode, notices, and the add-file input buffer
//!
//! # Architecture
//!
//! State transitions are explicit through method calls; the struct is
//! accessed only from the main thread (terminal operations are not
//! thread-safe). All timing flows in as `Instant` arguments, so every
//! transition is unit-testable without a terminal or a clock.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use dupelens::collection::FileDescriptor;
//! use dupelens::tui::app::{App, AppMode};
//!
//! let mut app = App::new();
//! app.submit_files(vec![
//!     FileDescriptor::new("report.pdf", 1024),
//!     FileDescriptor::new("report_v2.pdf", 2048),
//! ]);
//!
//! app.request_analysis(Instant::now());
//! assert_eq!(app.mode(), AppMode::Analyzing);
//! ```

use std::time::Instant;

use crate::collection::{Collection, FileDescriptor};
use crate::engine::{Engine, EngineState, RequestOutcome};
use crate::similarity::AnalysisResult;
use crate::tui::theme::Theme;

/// Application mode/state.
///
/// Modes control what is displayed and which actions are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Browsing the file list - main navigation mode
    #[default]
    Selecting,
    /// Analysis in flight - shows the busy indicator
    Analyzing,
    /// Typing a path to add to the collection
    AddingFile,
    /// Application is quitting
    Quitting,
}

impl AppMode {
    /// Check if the application is in a navigable state.
    #[must_use]
    pub fn is_navigable(&self) -> bool {
        matches!(self, Self::Selecting)
    }

    /// Check if the application is done (quitting).
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Quitting)
    }
}

/// User action triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Navigate up in the file list
    NavigateUp,
    /// Navigate down in the file list
    NavigateDown,
    /// Remove the selected file from the collection
    RemoveSelected,
    /// Start the duplicate analysis
    Analyze,
    /// Open the add-file prompt
    OpenAddFile,
    /// Append a character to the add-file input
    InputChar(char),
    /// Delete the last character of the add-file input
    InputBackspace,
    /// Confirm the current prompt
    Confirm,
    /// Cancel the current prompt or dismiss a notice
    Cancel,
    /// Quit the application
    Quit,
}

/// TUI application state.
///
/// # Thread Safety
///
/// NOT thread-safe; access only from the main thread.
#[derive(Debug)]
pub struct App {
    /// Current application mode
    mode: AppMode,
    /// The user's file collection
    collection: Collection,
    /// Analysis scheduler and latest result
    engine: Engine,
    /// Currently selected file index
    selected: usize,
    /// Scroll offset for the file list
    scroll: usize,
    /// User-facing notice (validation failures, stat errors)
    notice: Option<String>,
    /// Input buffer for the add-file prompt
    input: String,
    /// Color palette
    theme: Theme,
    /// Number of visible list rows (updated by the UI for scrolling)
    visible_rows: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an app with an empty collection and the default theme.
    #[must_use]
    pub fn new() -> Self {
        Self::with_theme(Theme::default())
    }

    /// Create an app with a specific theme.
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            mode: AppMode::Selecting,
            collection: Collection::new(),
            engine: Engine::new(),
            selected: 0,
            scroll: 0,
            notice: None,
            input: String::new(),
            theme,
            visible_rows: 20, // Default, updated by the UI
        }
    }

    // ==================== Mode Management ====================

    /// Get the current application mode.
    #[must_use]
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// Set the application mode.
    pub fn set_mode(&mut self, mode: AppMode) {
        log::debug!("Mode transition: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    /// Check if the application should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.mode.is_done()
    }

    // ==================== Collection Boundary ====================

    /// Append descriptors to the collection.
    ///
    /// Invalidates any published result: results are tied to the exact
    /// collection they were computed over.
    pub fn submit_files(&mut self, files: Vec<FileDescriptor>) {
        if files.is_empty() {
            return;
        }
        self.collection.add(files);
        self.engine.invalidate_result();
    }

    /// Remove the descriptor at `index` (silent no-op when out of range).
    pub fn remove_at(&mut self, index: usize) {
        if self.collection.remove_at(index) {
            self.engine.invalidate_result();
            self.clamp_selection();
        }
    }

    /// Remove the currently selected descriptor.
    pub fn remove_selected(&mut self) {
        self.remove_at(self.selected);
    }

    /// Ordered view of the collection for rendering.
    #[must_use]
    pub fn collection_snapshot(&self) -> &[FileDescriptor] {
        self.collection.files()
    }

    /// Number of files currently in the collection.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.collection.len()
    }

    // ==================== Analysis Boundary ====================

    /// Observable scheduler state.
    #[must_use]
    pub fn scheduler_state(&self) -> EngineState {
        self.engine.state()
    }

    /// The latest published analysis result, if any.
    #[must_use]
    pub fn latest_result(&self) -> Option<&AnalysisResult> {
        self.engine.latest_result()
    }

    /// Request an analysis over the current collection.
    ///
    /// Transitions to `Analyzing` synchronously on success so the busy
    /// indicator is visible before any work happens. Validation failures
    /// surface as a user notice and leave the scheduler idle; a request
    /// while already running is ignored.
    pub fn request_analysis(&mut self, now: Instant) {
        match self.engine.request_analysis(self.collection.snapshot(), now) {
            Ok(RequestOutcome::Started) => {
                self.notice = None;
                self.set_mode(AppMode::Analyzing);
            }
            Ok(RequestOutcome::AlreadyRunning) => {}
            Err(e) => {
                self.set_notice(e.to_string());
            }
        }
    }

    /// Advance the engine; called once per frame by the event loop.
    ///
    /// When an in-flight analysis completes, returns to `Selecting` so the
    /// result panel is shown.
    pub fn tick(&mut self, now: Instant) {
        if self.engine.tick(self.collection.len(), now).is_some()
            && self.mode == AppMode::Analyzing
        {
            self.set_mode(AppMode::Selecting);
        }
    }

    // ==================== Navigation ====================

    /// Currently selected file index.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Scroll offset for the file list.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Move the selection down one entry.
    pub fn next(&mut self) {
        if !self.mode.is_navigable() {
            return;
        }
        if self.selected + 1 < self.collection.len() {
            self.selected += 1;
            self.adjust_scroll();
        }
    }

    /// Move the selection up one entry.
    pub fn previous(&mut self) {
        if !self.mode.is_navigable() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
            self.adjust_scroll();
        }
    }

    /// Tell the app how many list rows the UI can show.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.adjust_scroll();
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.collection.len() && !self.collection.is_empty() {
            self.selected = self.collection.len() - 1;
        }
        if self.collection.is_empty() {
            self.selected = 0;
        }
        self.adjust_scroll();
    }

    fn adjust_scroll(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.visible_rows {
            self.scroll = self.selected + 1 - self.visible_rows;
        }
    }

    // ==================== Notices & Input ====================

    /// Get the current notice (if any).
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Set a notice to display.
    pub fn set_notice(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("Notice: {}", message);
        self.notice = Some(message);
    }

    /// Clear the notice.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Current add-file input buffer.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Take the add-file input, clearing the buffer.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Get the color theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    // ==================== Action Handling ====================

    /// Handle a user action and update state accordingly.
    ///
    /// `Confirm` in `AddingFile` mode is not resolved here: turning the
    /// typed path into a descriptor requires filesystem access, which is
    /// the event loop's job. Returns true if the action was handled.
    pub fn handle_action(&mut self, action: Action, now: Instant) -> bool {
        log::trace!("Handling action: {:?} in mode {:?}", action, self.mode);

        match action {
            Action::NavigateUp => {
                self.previous();
                true
            }
            Action::NavigateDown => {
                self.next();
                true
            }
            Action::RemoveSelected => {
                if self.mode == AppMode::Selecting {
                    self.remove_selected();
                    true
                } else {
                    false
                }
            }
            Action::Analyze => {
                if self.mode == AppMode::Selecting {
                    self.request_analysis(now);
                    true
                } else {
                    false
                }
            }
            Action::OpenAddFile => {
                if self.mode == AppMode::Selecting {
                    self.input.clear();
                    self.set_mode(AppMode::AddingFile);
                    true
                } else {
                    false
                }
            }
            Action::InputChar(c) => {
                if self.mode == AppMode::AddingFile {
                    self.input.push(c);
                    true
                } else {
                    false
                }
            }
            Action::InputBackspace => {
                if self.mode == AppMode::AddingFile {
                    self.input.pop();
                    true
                } else {
                    false
                }
            }
            Action::Confirm => {
                // AddingFile confirmation is completed by the event loop
                true
            }
            Action::Cancel => {
                match self.mode {
                    AppMode::AddingFile => {
                        self.input.clear();
                        self.set_mode(AppMode::Selecting);
                    }
                    _ => {
                        self.clear_notice();
                    }
                }
                true
            }
            Action::Quit => {
                self.set_mode(AppMode::Quitting);
                true
            }
        }
    }
}
