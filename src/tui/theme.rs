//! TUI theming support.
//!
//! The `Theme` struct defines the color palette for the TUI. It supports
//! light and dark palettes, a plain palette for `--no-color`, and
//! automatic detection from the terminal environment.

use ratatui::style::Color;

use crate::cli::ThemeArg;

/// A collection of colors used for TUI components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub danger: Color,
    pub success: Color,
    pub dim: Color,
    pub normal: Color,
}

impl Theme {
    /// High-contrast dark theme (default).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::DarkGray,
            normal: Color::White,
        }
    }

    /// High-contrast light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::Gray,
            normal: Color::Black,
        }
    }

    /// Colorless theme for `--no-color` and NO_COLOR environments.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            primary: Color::Reset,
            secondary: Color::Reset,
            danger: Color::Reset,
            success: Color::Reset,
            dim: Color::Reset,
            normal: Color::Reset,
        }
    }

    /// Detect the terminal theme, defaulting to dark.
    #[must_use]
    pub fn auto() -> Self {
        if is_light_terminal() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Resolve a CLI/config theme argument into a palette.
    #[must_use]
    pub fn from_arg(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Auto => Self::auto(),
            ThemeArg::Dark => Self::dark(),
            ThemeArg::Light => Self::light(),
        }
    }
}

/// Simple heuristic to detect if the terminal is light-themed.
///
/// COLORFGBG is set by some terminals (rxvt, xterm, konsole) in "fg;bg"
/// form; background indices 7 and above (except dark gray 8) are treated
/// as light.
fn is_light_terminal() -> bool {
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u32>() {
                return bg_num >= 7 && bg_num != 8;
            }
        }
    }
    false
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::dark());
    }

    #[test]
    fn test_from_arg_fixed_palettes() {
        assert_eq!(Theme::from_arg(ThemeArg::Dark), Theme::dark());
        assert_eq!(Theme::from_arg(ThemeArg::Light), Theme::light());
    }

    #[test]
    fn test_plain_has_no_colors() {
        let theme = Theme::plain();
        assert_eq!(theme.primary, Color::Reset);
        assert_eq!(theme.danger, Color::Reset);
    }
}
