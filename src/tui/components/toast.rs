//! Toast notifications
//!
//! Non-blocking overlays that auto-dismiss. They stack upward from the
//! bottom-right corner, newest at the bottom, on top of all other content.
//! `ToastStack` is the TUI's `Notifier`: everything the chat core reports
//! ends up here.

use crate::chat::{Notice, NoticeLevel, Notifier};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Oldest toasts are dropped beyond this many
const MAX_TOASTS: usize = 4;

/// Title line + description line + borders
const TOAST_HEIGHT: u16 = 4;

/// A notice on screen, with its expiry
#[derive(Debug, Clone)]
pub struct Toast {
    pub notice: Notice,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(notice: Notice, created_at: Instant) -> Self {
        Self {
            notice,
            created_at,
            duration: TOAST_DURATION,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let accent = match self.notice.level {
            NoticeLevel::Success => theme.success,
            NoticeLevel::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(vec![
            Line::from(Span::styled(
                self.notice.title.as_str(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.notice.description.as_str(),
                Style::default().fg(theme.foreground),
            )),
        ])
        .block(block);

        // Clear first so the toast sits on top
        f.render_widget(Clear, area);
        f.render_widget(text, area);
    }

    /// Width needed to show the longer of title and description
    fn content_width(&self) -> u16 {
        let widest = self
            .notice
            .title
            .width()
            .max(self.notice.description.width());
        u16::try_from(widest).unwrap_or(u16::MAX).saturating_add(4)
    }
}

/// Active toasts, oldest first
#[derive(Debug, Default)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(&mut self, notice: Notice, now: Instant) {
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast::new(notice, now));
    }

    /// Drop expired toasts; returns true if any were removed
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Render all toasts stacked in the bottom-right of `area`
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let mut bottom = area.bottom().saturating_sub(1);

        // Newest at the bottom, older ones pushed upward
        for toast in self.iter().rev() {
            if bottom < area.y + TOAST_HEIGHT {
                break;
            }
            let width = toast.content_width().min(area.width.saturating_sub(4));
            let x = area.right().saturating_sub(width + 2);
            let y = bottom - TOAST_HEIGHT;

            toast.render(f, Rect::new(x, y, width, TOAST_HEIGHT), theme);
            bottom = y;
        }
    }
}

impl Notifier for ToastStack {
    fn notify(&mut self, notice: Notice) {
        tracing::debug!(title = %notice.title, description = %notice.description, "Toast");
        self.push_at(notice, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_toasts_expire_after_duration() {
        let t0 = Instant::now();
        let mut stack = ToastStack::new();
        stack.push_at(Notice::success("Code copied to clipboard!"), t0);
        stack.push_at(Notice::error("Failed to copy code."), t0 + Duration::from_secs(1));

        assert!(!stack.prune(t0 + Duration::from_millis(2999)));
        assert_eq!(stack.iter().count(), 2);

        // First one expires, second still has a second left
        assert!(stack.prune(t0 + TOAST_DURATION));
        let remaining: Vec<_> = stack.iter().map(|t| t.notice.level).collect();
        assert_eq!(remaining, vec![NoticeLevel::Error]);

        assert!(stack.prune(t0 + Duration::from_secs(4)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_stack_is_bounded() {
        let t0 = Instant::now();
        let mut stack = ToastStack::new();
        for i in 0..MAX_TOASTS + 2 {
            stack.push_at(Notice::error(format!("notice {}", i)), t0);
        }

        let descriptions: Vec<_> = stack.iter().map(|t| t.notice.description.clone()).collect();
        assert_eq!(descriptions.len(), MAX_TOASTS);
        assert_eq!(descriptions[0], "notice 2");
    }

    #[test]
    fn test_notify_pushes_toast() {
        let mut stack = ToastStack::new();
        stack.notify(Notice::error("Please enter a question."));

        let toast = stack.iter().next().map(|t| t.notice.clone());
        assert_eq!(toast, Some(Notice::error("Please enter a question.")));
    }

    #[test]
    fn test_render_shows_title_and_description() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut stack = ToastStack::new();
        stack.push_at(Notice::success("Code copied to clipboard!"), Instant::now());

        terminal
            .draw(|f| stack.render(f, f.area(), &Theme::plain()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Success"));
        assert!(text.contains("Code copied to clipboard!"));
    }
}
