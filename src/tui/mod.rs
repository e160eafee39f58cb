//! Terminal User Interface module.
//!
//! Interactive interface for building the file collection and reviewing
//! analysis results, using ratatui with the crossterm backend.
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Key events are captured from the terminal (crossterm)
//! 2. Events are translated to Actions ([`events`])
//! 3. Actions modify the App state ([`app`])
//! 4. The UI renders from the current App state ([`ui`])
//!
//! The main loop ([`run`]) additionally ticks the analysis engine every
//! frame, which is how a requested analysis completes without ever
//! blocking rendering or input.

pub mod app;
pub mod events;
pub mod run;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use app::{Action, App, AppMode};
pub use events::{EventError, EventHandler};
pub use run::{descriptor_from_path, run_tui, TuiError};
pub use theme::Theme;
pub use ui::{format_size, render, truncate_string};
