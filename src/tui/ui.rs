//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! Renders the interactive interface:
//! - Header with title, file count, and scheduler state
//! - File list with names and sizes
//! - Result panel (duplicate pairs or the all-clear message)
//! - Footer with available commands
//! - Modal dialogs for notices and the add-file prompt

use bytesize::ByteSize;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::app::{App, AppMode};
use crate::similarity::AnalysisResult;

/// Maximum characters of a file name shown in the list before truncation.
const NAME_DISPLAY_LEN: usize = 25;

/// Render the TUI based on current application state.
///
/// # Arguments
///
/// * `frame` - The ratatui frame to render to
/// * `app` - The application state to render
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.notice().is_some() {
        render_notice_dialog(frame, app, area);
    }
    if app.mode() == AppMode::AddingFile {
        render_add_file_dialog(frame, app, area);
    }
}

/// Render the header with title and collection stats.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.mode() {
        AppMode::Analyzing => "dupelens - Smart Duplicate Finder [Scanning...]",
        AppMode::AddingFile => "dupelens - Smart Duplicate Finder [Add File]",
        AppMode::Quitting => "dupelens - Goodbye!",
        AppMode::Selecting => "dupelens - Smart Duplicate Finder",
    };

    let stats = if app.file_count() > 0 {
        format!(" | {} files selected", app.file_count())
    } else {
        String::new()
    };

    let header = Paragraph::new(format!("{}{}", title, stats))
        .style(
            Style::default()
                .fg(app.theme().primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme().primary)),
        );

    frame.render_widget(header, area);
}

/// Render the file list and, below it, the busy indicator or result panel.
fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    let show_panel = app.mode() == AppMode::Analyzing || app.latest_result().is_some();
    let chunks = if show_panel {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(9)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3)])
            .split(area)
    };

    render_file_list(frame, app, chunks[0]);
    if show_panel {
        render_result_panel(frame, app, chunks[1]);
    }
}

/// Render the scrollable file list.
fn render_file_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible_rows = area.height.saturating_sub(2) as usize;
    app.set_visible_rows(visible_rows);

    let theme = *app.theme();
    let selected = app.selected();
    let scroll = app.scroll();

    let items: Vec<ListItem> = app
        .collection_snapshot()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_rows)
        .map(|(index, file)| {
            let marker = if index == selected && app.mode().is_navigable() {
                "> "
            } else {
                "  "
            };
            let line = Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(theme.secondary)),
                Span::styled(
                    format!(
                        "{:<width$}",
                        truncate_string(&file.name, NAME_DISPLAY_LEN),
                        width = NAME_DISPLAY_LEN
                    ),
                    Style::default().fg(theme.normal),
                ),
                Span::styled(
                    format!("  {}", format_size(file.size_bytes)),
                    Style::default().fg(theme.dim),
                ),
            ]);
            let item = ListItem::new(line);
            if index == selected && app.mode().is_navigable() {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let title = if app.file_count() == 0 {
        " No files selected - press 'o' to add ".to_string()
    } else {
        format!(" {} Files Selected ", app.file_count())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(theme.dim)),
    );

    frame.render_widget(list, area);
}

/// Render the busy indicator or the analysis result.
fn render_result_panel(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme();

    if app.mode() == AppMode::Analyzing {
        let busy = Paragraph::new("Scanning files...")
            .style(Style::default().fg(theme.secondary))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Analysis ")
                    .border_style(Style::default().fg(theme.secondary)),
            );
        frame.render_widget(busy, area);
        return;
    }

    let Some(result) = app.latest_result() else {
        return;
    };

    match result {
        AnalysisResult::NoDuplicates => {
            let message = Paragraph::new("No duplicates found! All files unique.")
                .style(Style::default().fg(theme.success))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(" No Duplicates ")
                        .border_style(Style::default().fg(theme.success)),
                );
            frame.render_widget(message, area);
        }
        AnalysisResult::DuplicatesFound(pairs) => {
            let files = app.collection_snapshot();
            let items: Vec<ListItem> = pairs
                .iter()
                .map(|pair| {
                    let name_a = files
                        .get(pair.index_a)
                        .map_or("?", |f| f.name.as_str());
                    let name_b = files
                        .get(pair.index_b)
                        .map_or("?", |f| f.name.as_str());
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!(
                                "{} <-> {}",
                                truncate_string(name_a, 20),
                                truncate_string(name_b, 20)
                            ),
                            Style::default().fg(theme.danger),
                        ),
                        Span::styled(
                            format!("  Similarity: {}%", pair.score),
                            Style::default().fg(theme.normal),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Duplicates Found ({} pairs) ", pairs.len()))
                    .border_style(Style::default().fg(theme.danger)),
            );
            frame.render_widget(list, area);
        }
    }
}

/// Render the footer with available commands.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.mode() {
        AppMode::Selecting => {
            "j/k navigate | o add file | x remove | Enter analyze | q quit"
        }
        AppMode::Analyzing => "analyzing... | q quit",
        AppMode::AddingFile => "type a path | Enter add | Esc cancel",
        AppMode::Quitting => "",
    };

    let footer = Paragraph::new(hints)
        .style(Style::default().fg(app.theme().dim))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Render the notice dialog over the main view.
fn render_notice_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = app.notice() else { return };

    let dialog_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, dialog_area);

    let dialog = Paragraph::new(notice)
        .style(Style::default().fg(app.theme().danger))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Notice (Esc to dismiss) ")
                .border_style(Style::default().fg(app.theme().danger)),
        );

    frame.render_widget(dialog, dialog_area);
}

/// Render the add-file prompt dialog.
fn render_add_file_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let dialog_area = centered_rect(60, 20, area);
    frame.render_widget(Clear, dialog_area);

    let prompt = Paragraph::new(format!("> {}", app.input()))
        .style(Style::default().fg(app.theme().normal))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add file by path ")
                .border_style(Style::default().fg(app.theme().secondary)),
        );

    frame.render_widget(prompt, dialog_area);
}

/// Create a centered rectangle with given percentage of parent.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

/// Format a byte count as a human-readable size.
pub fn format_size(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Truncate a string with ellipsis if it exceeds max length.
///
/// Operates on characters, not bytes, so multi-byte names are safe.
///
/// # Examples
///
/// ```
/// use dupelens::tui::ui::truncate_string;
///
/// assert_eq!(truncate_string("hello", 10), "hello");
/// assert_eq!(truncate_string("hello world", 8), "hello...");
/// ```
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let prefix: String = s.chars().take(max_len - 3).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_short_unchanged() {
        assert_eq!(truncate_string("short.txt", 25), "short.txt");
    }

    #[test]
    fn test_truncate_string_adds_ellipsis() {
        assert_eq!(
            truncate_string("a_very_long_file_name_indeed.pdf", 10),
            "a_very_..."
        );
    }

    #[test]
    fn test_truncate_string_tiny_max() {
        assert_eq!(truncate_string("abcdef", 2), "..");
    }

    #[test]
    fn test_truncate_string_multibyte_safe() {
        // Must not panic on a char boundary
        let truncated = truncate_string("résumé_finale_version.pdf", 10);
        assert_eq!(truncated.chars().count(), 10);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert!(format_size(12 * 1024).contains("12"));
    }
}
