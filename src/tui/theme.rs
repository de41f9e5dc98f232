// Theme support for the chat TUI
//
// Two built-in palettes: "matrix" (green on black, the default look) and
// "plain", which sticks to the terminal's ANSI colors.

use crate::logging::LogLevel;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub status_bar: Color,
    pub border: Color,
    pub highlight: Color,
    pub border_type: BorderType,

    // ─── Panel Identity Colors (used when focused) ───────────
    pub panel_prompt: Color,
    pub panel_response: Color,
    pub panel_logs: Color,

    // ─── Response Content ────────────────────────────────────
    pub code_block: Color,
    pub code_border: Color,
    pub copied: Color,

    // ─── Notifications ───────────────────────────────────────
    pub success: Color,
    pub error: Color,

    // ─── Log Levels ──────────────────────────────────────────
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Theme {
    /// Load theme by name; unknown names fall back to matrix
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "plain" => Self::plain(),
            "matrix" => Self::matrix(),
            other => {
                tracing::warn!(theme = other, "Unknown theme, using matrix");
                Self::matrix()
            }
        }
    }

    /// Green phosphor on black
    pub fn matrix() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::Rgb(0x00, 0xff, 0x41), // phosphor green
            muted: Color::Rgb(0x00, 0x8f, 0x11),      // dim green
            title: Color::Rgb(0x00, 0xff, 0x41),
            status_bar: Color::Rgb(0x00, 0x8f, 0x11),
            border: Color::Rgb(0x00, 0x5f, 0x0b),
            highlight: Color::Rgb(0xb6, 0xff, 0xb0), // pale green
            border_type: BorderType::Rounded,
            panel_prompt: Color::Rgb(0x00, 0xff, 0x41),
            panel_response: Color::Rgb(0xb6, 0xff, 0xb0),
            panel_logs: Color::Rgb(0x00, 0x8f, 0x11),
            code_block: Color::Rgb(0xb6, 0xff, 0xb0),
            code_border: Color::Rgb(0x00, 0x8f, 0x11),
            copied: Color::Rgb(0xff, 0xff, 0xff),
            success: Color::Rgb(0x00, 0xff, 0x41),
            error: Color::Rgb(0xff, 0x33, 0x33),
            log_warn: Color::Rgb(0xd7, 0xff, 0x00),
            log_info: Color::Rgb(0x00, 0xff, 0x41),
            log_debug: Color::Rgb(0x00, 0x5f, 0x0b),
        }
    }

    /// Uses the terminal's ANSI palette
    pub fn plain() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            title: Color::Cyan,
            status_bar: Color::Gray,
            border: Color::Gray,
            highlight: Color::Yellow,
            border_type: BorderType::Plain,
            panel_prompt: Color::Cyan,
            panel_response: Color::Magenta,
            panel_logs: Color::DarkGray,
            code_block: Color::Yellow,
            code_border: Color::DarkGray,
            copied: Color::Green,
            success: Color::Green,
            error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    /// Base style: theme foreground on theme background
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Color for a log level in the logs panel
    pub fn log_level_style(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Error => self.error_style(),
            LogLevel::Warn => Style::default().fg(self.log_warn),
            LogLevel::Info => Style::default().fg(self.log_info),
            LogLevel::Debug | LogLevel::Trace => Style::default().fg(self.log_debug),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_is_case_insensitive() {
        assert_eq!(Theme::by_name("PLAIN").foreground, Theme::plain().foreground);
        assert_eq!(Theme::by_name("Matrix").foreground, Theme::matrix().foreground);
    }

    #[test]
    fn test_unknown_theme_falls_back_to_matrix() {
        assert_eq!(Theme::by_name("solarized").foreground, Theme::matrix().foreground);
    }
}
