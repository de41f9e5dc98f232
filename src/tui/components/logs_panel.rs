//! Logs panel component
//!
//! Shows the in-memory tracing buffer with color-coded levels. Follows new
//! entries until the user scrolls up; End resumes following.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::LogEntry;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext, Scrollable};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(), // Auto-follow by default
        }
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// One display line per entry, tagged with the emitting module
fn format_log_entry(entry: &LogEntry) -> String {
    let module = entry.target.rsplit("::").next().unwrap_or_default();
    format!(
        "[{}] {:5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        module,
        entry.message
    )
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let entries = ctx.log_buffer.get_all();

        self.scroll
            .update_dimensions(entries.len(), area.height.saturating_sub(2) as usize);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(theme.log_level_style(entry.level))
            })
            .collect();

        let border_color = if focused {
            theme.panel_logs
        } else {
            theme.border
        };

        let title = if self.scroll.auto_follow {
            " System Logs ".to_string()
        } else {
            format!(" System Logs [{}/{}] ", end, entries.len())
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Minimal, border_color);
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// End also resumes following new entries
    fn scroll_to_bottom(&mut self) {
        self.scroll.auto_follow = true;
        self.scroll.scroll_to_bottom();
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown => self.page_down(),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> &'static str {
        "↑↓:scroll  End:follow  Ctrl+L:hide  Esc:prompt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use chrono::Local;

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            timestamp: Local::now(),
            level: LogLevel::Warn,
            target: "scenario_chat::chat".to_string(),
            message: "Dropping stale response seq=1".to_string(),
        };
        let line = format_log_entry(&entry);
        assert!(line.contains("WARN "));
        assert!(line.ends_with("chat: Dropping stale response seq=1"));
    }

    #[test]
    fn test_end_resumes_following() {
        let mut panel = LogsPanel::new();
        panel.scroll.update_dimensions(50, 10);

        panel.handle_key(KeyEvent::from(KeyCode::Up));
        assert!(!panel.scroll.auto_follow);

        panel.handle_key(KeyEvent::from(KeyCode::End));
        assert!(panel.scroll.auto_follow);
        assert_eq!(panel.scroll.offset(), 40);
    }
}
