//! Prompt bar: the question input and the Ask button
//!
//! The bar owns the edit buffer and cursor. App mirrors the buffer into
//! `ChatState` after every edit, so the chat core always sees what is typed.

use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Button width: "Loading… ◐" plus borders and padding
const BUTTON_WIDTH: u16 = 14;

pub struct PromptBar {
    input: String,
    /// Byte offset into `input`, always on a char boundary
    cursor: usize,
}

impl PromptBar {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            cursor: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.input
    }

    fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.input.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    fn delete(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.input.drain(self.cursor..next);
        }
    }

    fn cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    fn cursor_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.input[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.input[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Byte offset of the first visible char so the cursor fits in `width` columns
    fn scroll_start(&self, width: usize) -> usize {
        let before = &self.input[..self.cursor];
        if width == 0 || before.width() < width {
            return 0;
        }

        // Walk back from the cursor until the window is full
        let mut used = 0;
        let mut start = self.cursor;
        for (i, c) in before.char_indices().rev() {
            used += c.width().unwrap_or(0);
            if used >= width {
                break;
            }
            start = i;
        }
        start
    }
}

impl Default for PromptBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PromptBar {
    fn id(&self) -> ComponentId {
        ComponentId::Prompt
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());
        let loading = ctx.chat.is_loading();

        let [input_area, button_area] =
            Layout::horizontal([Constraint::Min(10), Constraint::Length(BUTTON_WIDTH)]).areas(area);

        let border_color = if focused {
            theme.panel_prompt
        } else {
            theme.border
        };

        let inner_width = input_area.width.saturating_sub(2) as usize;
        let start = self.scroll_start(inner_width);
        let visible = &self.input[start..];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(" Question ");

        let input = if self.input.is_empty() {
            Paragraph::new(Span::styled(
                "Type a question and press Enter",
                Style::default().fg(theme.muted),
            ))
        } else {
            Paragraph::new(Span::styled(visible, Style::default().fg(theme.foreground)))
        };
        f.render_widget(input.block(block), input_area);

        if focused {
            let offset = self.input[start..self.cursor].width() as u16;
            f.set_cursor_position((input_area.x + 1 + offset, input_area.y + 1));
        }

        // Submit control: disabled while a request is in flight
        let (label, style) = if loading {
            (
                format!("Loading… {}", ctx.spinner_char()),
                Style::default().fg(theme.muted),
            )
        } else {
            (
                "Ask".to_string(),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let button = Paragraph::new(Span::styled(label, style))
            .centered()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(style),
            );
        f.render_widget(button, button_area);
    }
}

impl Interactive for PromptBar {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.input.len(),
            KeyCode::Char(c) if !ctrl && !alt => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.len(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> &'static str {
        "Enter:ask  Tab:response  Ctrl+U:clear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(bar: &mut PromptBar, code: KeyCode) -> Handled {
        bar.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(bar: &mut PromptBar, s: &str) {
        for c in s.chars() {
            press(bar, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut bar = PromptBar::new();
        type_str(&mut bar, "hello");
        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.text(), "hell");
    }

    #[test]
    fn test_editing_respects_multibyte_chars() {
        let mut bar = PromptBar::new();
        type_str(&mut bar, "añb");
        press(&mut bar, KeyCode::Left);
        press(&mut bar, KeyCode::Backspace);
        assert_eq!(bar.text(), "ab");

        press(&mut bar, KeyCode::Home);
        press(&mut bar, KeyCode::Delete);
        assert_eq!(bar.text(), "b");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut bar = PromptBar::new();
        type_str(&mut bar, "ac");
        press(&mut bar, KeyCode::Left);
        type_str(&mut bar, "b");
        assert_eq!(bar.text(), "abc");
    }

    #[test]
    fn test_ctrl_u_clears_and_enter_bubbles_up() {
        let mut bar = PromptBar::new();
        type_str(&mut bar, "question");
        bar.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(bar.text(), "");

        assert_eq!(press(&mut bar, KeyCode::Enter), Handled::No);
    }

    #[test]
    fn test_scroll_start_keeps_cursor_visible() {
        let mut bar = PromptBar::new();
        type_str(&mut bar, "abcdefghij");

        // 10 chars in a 5-column window: cursor at the end needs 4 chars + cursor cell
        let start = bar.scroll_start(5);
        assert_eq!(&bar.text()[start..], "ghij");

        press(&mut bar, KeyCode::Home);
        assert_eq!(bar.scroll_start(5), 0);
    }
}
