//! dupelens - Smart Duplicate Finder
//!
//! Scores every pair of user-submitted files for name similarity and
//! reports likely duplicates through an interactive TUI. The analysis is
//! metadata-only: file content is never read or hashed.

pub mod cli;
pub mod collection;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod signal;
pub mod similarity;
pub mod tui;

use anyhow::Context;

use cli::Cli;
use collection::FileDescriptor;
use config::Config;
use error::ExitCode;
use similarity::AnalysisResult;
use tui::{descriptor_from_path, run_tui, App, Theme};

/// Run the application with parsed CLI arguments.
///
/// Initializes logging, resolves the theme, preloads descriptors for the
/// files given on the command line, and runs the TUI session. The exit
/// code reflects the final analysis result.
///
/// # Errors
///
/// Returns an error if a preload path cannot be stat'ed or the terminal
/// cannot be set up.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load();
    if let Some(theme_arg) = cli.theme {
        if theme_arg != config.theme {
            config.theme = theme_arg;
            if let Err(e) = config.save() {
                log::warn!("Could not save config: {}", e);
            }
        }
    }

    let theme = if cli.no_color {
        Theme::plain()
    } else {
        Theme::from_arg(config.theme)
    };

    let descriptors: Vec<FileDescriptor> = cli
        .files
        .iter()
        .map(|path| {
            descriptor_from_path(path)
                .with_context(|| format!("failed to read metadata for {}", path.display()))
        })
        .collect::<anyhow::Result<_>>()?;

    let handler = signal::install_handler().context("failed to install Ctrl+C handler")?;

    let mut app = App::with_theme(theme);
    app.submit_files(descriptors);

    run_tui(&mut app, Some(handler.get_flag())).context("TUI session failed")?;

    if handler.is_shutdown_requested() {
        return Ok(ExitCode::Interrupted);
    }

    Ok(match app.latest_result() {
        Some(AnalysisResult::DuplicatesFound(_)) => ExitCode::Success,
        Some(AnalysisResult::NoDuplicates) | None => ExitCode::NoDuplicates,
    })
}
