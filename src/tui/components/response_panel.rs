//! Response panel
//!
//! Renders the response slot: a placeholder, an error line, or the segmented
//! response with prose verbatim and code blocks boxed. Code blocks are the
//! selectable items; the selected one shows the copy label.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::chat::segment::{code_indices, segment_response};
use crate::chat::{ChatState, ResponseState, Segment};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const PLACEHOLDER: &str = "No response yet. Ask something...";
pub const COPIED_LABEL: &str = "✔ Copied";
pub const COPY_LABEL: &str = "y: copy";

/// Columns between tab stops when expanding `\t` for display
const TAB_WIDTH: usize = 4;

/// Display lines plus where each code block landed
#[derive(Debug, Default)]
pub(crate) struct ResponseLayout {
    pub lines: Vec<Line<'static>>,
    /// `(segment_index, first_line, end_line)` per code block, in order
    pub blocks: Vec<(usize, usize, usize)>,
}

/// How the copy label should be drawn for this frame
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CopyMarks {
    /// Segment index of the selected code block
    pub selected: Option<usize>,
    /// Segment index whose copy confirmation is live
    pub copied: Option<usize>,
    /// Panel has focus (label shows on the selection)
    pub focused: bool,
}

impl CopyMarks {
    fn label_for(&self, index: usize) -> Option<&'static str> {
        let copied = self.copied == Some(index);
        let selected = self.selected == Some(index);
        match (copied, selected && self.focused) {
            (true, _) => Some(COPIED_LABEL),
            (false, true) => Some(COPY_LABEL),
            (false, false) => None,
        }
    }
}

pub struct ResponsePanel {
    scroll: ScrollState,
    /// Position in `code_blocks` of the selected block
    selected: Option<usize>,
    /// Segment indices of the code blocks in the current response
    code_blocks: Vec<usize>,
    /// Scroll the selection into view on the next render
    reveal_selection: bool,
}

impl ResponsePanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
            selected: None,
            code_blocks: Vec::new(),
            reveal_selection: false,
        }
    }

    /// Reset scroll and selection for a new response slot
    ///
    /// The first code block (if any) becomes the selection.
    pub fn on_response_changed(&mut self, chat: &ChatState) {
        self.code_blocks = match chat.response() {
            ResponseState::Ready(text) => code_indices(text),
            _ => Vec::new(),
        };
        self.selected = if self.code_blocks.is_empty() {
            None
        } else {
            Some(0)
        };
        self.reveal_selection = false;
        self.scroll.reset();
    }

    /// Segment index of the selected code block
    pub fn selected_segment(&self) -> Option<usize> {
        self.selected.and_then(|i| self.code_blocks.get(i).copied())
    }

    pub fn code_block_count(&self) -> usize {
        self.code_blocks.len()
    }
}

impl Default for ResponsePanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay out the response slot for a given content width
pub(crate) fn layout_response(
    state: &ResponseState,
    width: usize,
    marks: CopyMarks,
    theme: &Theme,
) -> ResponseLayout {
    let mut layout = ResponseLayout::default();

    match state {
        // An empty string renders like no response at all
        ResponseState::Empty | ResponseState::Loading => push_placeholder(&mut layout, theme),
        ResponseState::Ready(text) if text.is_empty() => push_placeholder(&mut layout, theme),
        ResponseState::Failed(message) => {
            let style = theme.error_style();
            for line in format!("Error: {}", message).split('\n') {
                for row in wrap_line(&sanitize_line(line), width) {
                    layout.lines.push(Line::from(Span::styled(row, style)));
                }
            }
        }
        ResponseState::Ready(text) => {
            let mut block_number = 0;
            for segment in segment_response(text) {
                if segment.is_code() {
                    block_number += 1;
                    push_code_block(&mut layout, &segment, block_number, width, marks, theme);
                } else {
                    push_text(&mut layout, &segment, width, theme);
                }
            }
        }
    }

    layout
}

fn push_placeholder(layout: &mut ResponseLayout, theme: &Theme) {
    layout.lines.push(Line::from(Span::styled(
        PLACEHOLDER,
        Style::default()
            .fg(theme.muted)
            .add_modifier(Modifier::ITALIC),
    )));
}

/// Prose: verbatim, one display row per wrapped piece of each source line
fn push_text(layout: &mut ResponseLayout, segment: &Segment, width: usize, theme: &Theme) {
    let style = Style::default().fg(theme.foreground);
    for line in segment.display_text().split('\n') {
        for row in wrap_line(&sanitize_line(line), width) {
            layout.lines.push(Line::from(Span::styled(row, style)));
        }
    }
}

/// Code: a box with the 1-based block number, and the copy label when marked
///
/// ```text
/// ╭─ [1] ────────── ✔ Copied ─╮
/// │ print(1)
/// ╰───────────────────────────╯
/// ```
fn push_code_block(
    layout: &mut ResponseLayout,
    segment: &Segment,
    block_number: usize,
    width: usize,
    marks: CopyMarks,
    theme: &Theme,
) {
    let selected = marks.selected == Some(segment.index) && marks.focused;
    let border = Style::default().fg(if selected {
        theme.highlight
    } else {
        theme.code_border
    });
    let code = Style::default().fg(theme.code_block);
    let label_style = if marks.copied == Some(segment.index) {
        Style::default().fg(theme.copied).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.highlight)
    };

    let first = layout.lines.len();
    let box_width = width.max(8);

    // Header: ╭─ [n] ───── label ─╮
    let tag = format!("╭─ [{}] ", block_number);
    let label = marks.label_for(segment.index);
    let label_width = label.map(|l| l.width() + 2).unwrap_or(0);
    let fill = box_width
        .saturating_sub(tag.width() + label_width + 2)
        .max(1);
    let mut header = vec![
        Span::styled(tag, border),
        Span::styled("─".repeat(fill), border),
    ];
    if let Some(label) = label {
        header.push(Span::styled(format!(" {} ", label), label_style));
    }
    header.push(Span::styled("─╮", border));
    layout.lines.push(Line::from(header));

    let inner = box_width.saturating_sub(2);
    for line in segment.display_text().split('\n') {
        for row in wrap_line(&sanitize_line(line), inner) {
            layout.lines.push(Line::from(vec![
                Span::styled("│ ", border),
                Span::styled(row, code),
            ]));
        }
    }

    layout.lines.push(Line::from(Span::styled(
        format!("╰{}╯", "─".repeat(box_width.saturating_sub(2))),
        border,
    )));

    layout
        .blocks
        .push((segment.index, first, layout.lines.len()));
}

/// Make one source line safe to put in terminal cells
///
/// Expands tabs to the next tab stop and drops:
/// - Carriage return, backspace and delete
/// - ANSI escape sequences (`\x1b[...`)
/// - Any other control character
///
/// Display only; copying uses the response text untouched.
pub(crate) fn sanitize_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut column = 0;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\t' => {
                let pad = TAB_WIDTH - column % TAB_WIDTH;
                result.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\x1b' => {
                // ESC [ <params> <letter>
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            c if c.is_control() => {}
            c => {
                result.push(c);
                column += c.width().unwrap_or(0);
            }
        }
    }

    result
}

/// Wrap one source line to `width` display columns, keeping whitespace
///
/// Breaks after the last space that fits, or mid-word when a word is wider
/// than the line. An empty line stays one empty row.
pub(crate) fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            match current.rfind(' ') {
                Some(pos) if pos + 1 < current.len() => {
                    let rest = current.split_off(pos + 1);
                    rows.push(std::mem::take(&mut current));
                    current_width = rest.width();
                    current = rest;
                }
                _ => {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
            }
        }
        current.push(c);
        current_width += w;
    }

    rows.push(current);
    rows
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait Implementations
// ═══════════════════════════════════════════════════════════════════════════

impl Component for ResponsePanel {
    fn id(&self) -> ComponentId {
        ComponentId::Response
    }

    fn render(&mut self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.id());

        let marks = CopyMarks {
            selected: self.selected_segment(),
            copied: ctx.chat.copied_index(ctx.now),
            focused,
        };

        // Borders plus one column for the scrollbar
        let width = area.width.saturating_sub(3) as usize;
        let viewport = area.height.saturating_sub(2) as usize;
        let layout = layout_response(ctx.chat.response(), width, marks, theme);

        self.scroll.update_dimensions(layout.lines.len(), viewport);
        if self.reveal_selection {
            if let Some(&(_, start, end)) = self.selected.and_then(|i| layout.blocks.get(i)) {
                self.scroll.ensure_visible(start, end);
            }
            self.reveal_selection = false;
        }

        let (start, end) = self.scroll.visible_range();
        let visible: Vec<Line> = layout.lines[start..end].to_vec();

        let title = match self.code_block_count() {
            0 => " Response ".to_string(),
            1 => " Response · 1 code block ".to_string(),
            n => format!(" Response · {} code blocks ", n),
        };

        let border_color = if focused {
            theme.panel_response
        } else {
            theme.border
        };

        let paragraph = Paragraph::new(visible).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(paragraph, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Arrows, border_color);
    }
}

impl Scrollable for ResponsePanel {
    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for ResponsePanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        self.selected = Some(index.min(self.code_blocks.len().saturating_sub(1)));
        self.reveal_selection = true;
    }

    fn item_count(&self) -> usize {
        self.code_blocks.len()
    }
}

impl Interactive for ResponsePanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        let has_blocks = !self.code_blocks.is_empty();

        match key.code {
            // Up/down move between code blocks; plain prose just scrolls
            KeyCode::Up | KeyCode::Char('k') if has_blocks => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') if has_blocks => self.select_next(),
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
        "↑↓/jk:code block  y/c:copy  PgUp/PgDn:scroll  Esc:prompt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Notice;

    fn text_of(layout: &ResponseLayout) -> Vec<String> {
        layout
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn ready(text: &str) -> ResponseState {
        ResponseState::Ready(text.to_string())
    }

    #[test]
    fn test_placeholder_for_empty_loading_and_blank() {
        let theme = Theme::plain();
        for state in [ResponseState::Empty, ResponseState::Loading, ready("")] {
            let layout = layout_response(&state, 40, CopyMarks::default(), &theme);
            assert_eq!(text_of(&layout), vec![PLACEHOLDER.to_string()]);
            assert!(layout.blocks.is_empty());
        }
    }

    #[test]
    fn test_failed_shows_error_prefix() {
        let state = ResponseState::Failed("request timed out".to_string());
        let layout = layout_response(&state, 40, CopyMarks::default(), &Theme::plain());
        assert_eq!(text_of(&layout), vec!["Error: request timed out".to_string()]);
    }

    #[test]
    fn test_text_verbatim_and_code_boxed() {
        let state = ready("Use this:\n```print(1)```\nDone");
        let layout = layout_response(&state, 30, CopyMarks::default(), &Theme::plain());
        let lines = text_of(&layout);

        assert_eq!(lines[0], "Use this:");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("╭─ [1] "));
        assert_eq!(lines[3], "│ print(1)");
        assert!(lines[4].starts_with('╰'));
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Done");

        assert_eq!(layout.blocks, vec![(1, 2, 5)]);
    }

    #[test]
    fn test_copy_label_follows_focus_and_copied() {
        let state = ready("a```x```b```y```c");
        let theme = Theme::plain();

        // Focused selection on block 1, nothing copied
        let marks = CopyMarks {
            selected: Some(1),
            copied: None,
            focused: true,
        };
        let lines = text_of(&layout_response(&state, 40, marks, &theme));
        let headers: Vec<_> = lines.iter().filter(|l| l.starts_with('╭')).collect();
        assert!(headers[0].contains(COPY_LABEL));
        assert!(!headers[1].contains(COPY_LABEL));

        // Block 3 copied: label shows even without focus
        let marks = CopyMarks {
            selected: Some(1),
            copied: Some(3),
            focused: false,
        };
        let lines = text_of(&layout_response(&state, 40, marks, &theme));
        let headers: Vec<_> = lines.iter().filter(|l| l.starts_with('╭')).collect();
        assert!(!headers[0].contains(COPY_LABEL));
        assert!(headers[1].contains(COPIED_LABEL));
    }

    #[test]
    fn test_code_blocks_numbered_in_order() {
        // Code segments sit at indices 1 and 3, but headers count blocks
        let state = ready("a```x```b```y```c");
        let lines = text_of(&layout_response(&state, 40, CopyMarks::default(), &Theme::plain()));
        let headers: Vec<_> = lines.iter().filter(|l| l.starts_with('╭')).collect();
        assert!(headers[0].starts_with("╭─ [1] "));
        assert!(headers[1].starts_with("╭─ [2] "));
    }

    #[test]
    fn test_sanitize_line_expands_tabs_and_drops_controls() {
        assert_eq!(sanitize_line("\tfmt.Println(1)"), "    fmt.Println(1)");
        assert_eq!(sanitize_line("ab\tc"), "ab  c");
        assert_eq!(sanitize_line("done\r"), "done");
        assert_eq!(sanitize_line("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(sanitize_line("bell\x07 back\x08"), "bell back");
    }

    #[test]
    fn test_tab_indented_code_renders_as_spaces() {
        let text = "Go:\n```\nfunc main() {\n\tfmt.Println(1)\n}\n```\n\tindented prose";
        let layout = layout_response(&ready(text), 40, CopyMarks::default(), &Theme::plain());
        let lines = text_of(&layout);

        assert!(lines.iter().all(|l| !l.contains('\t')));
        assert!(lines.contains(&"│     fmt.Println(1)".to_string()));
        assert!(lines.contains(&"    indented prose".to_string()));
    }

    #[test]
    fn test_wrap_line_prefers_spaces() {
        assert_eq!(wrap_line("hello world", 8), vec!["hello ", "world"]);
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("", 5), vec![""]);
        assert_eq!(wrap_line("  indented", 20), vec!["  indented"]);
    }

    #[test]
    fn test_wrap_line_counts_wide_chars() {
        // Each CJK char is two columns
        assert_eq!(wrap_line("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_selection_moves_between_code_blocks() {
        let mut chat = ChatState::new();
        let mut notices: Vec<Notice> = Vec::new();
        chat.set_question("q");
        let ticket = chat.begin_submit(&mut notices).unwrap();
        chat.complete_submit(ticket.seq, Ok("a```x```b```y```c".to_string()), &mut notices);

        let mut panel = ResponsePanel::new();
        panel.on_response_changed(&chat);
        assert_eq!(panel.code_block_count(), 2);
        assert_eq!(panel.selected_segment(), Some(1));

        panel.handle_key(KeyEvent::from(KeyCode::Down));
        assert_eq!(panel.selected_segment(), Some(3));

        // Clamped at the last block
        panel.handle_key(KeyEvent::from(KeyCode::Char('j')));
        assert_eq!(panel.selected_segment(), Some(3));

        panel.handle_key(KeyEvent::from(KeyCode::Char('k')));
        assert_eq!(panel.selected_segment(), Some(1));

        assert_eq!(panel.handle_key(KeyEvent::from(KeyCode::Esc)), Handled::No);
    }

    #[test]
    fn test_no_selection_without_code() {
        let mut chat = ChatState::new();
        let mut notices: Vec<Notice> = Vec::new();
        chat.set_question("q");
        let ticket = chat.begin_submit(&mut notices).unwrap();
        chat.complete_submit(ticket.seq, Ok("just prose".to_string()), &mut notices);

        let mut panel = ResponsePanel::new();
        panel.on_response_changed(&chat);
        assert_eq!(panel.selected_segment(), None);

        // Up/Down still consumed (they scroll)
        assert_eq!(panel.handle_key(KeyEvent::from(KeyCode::Down)), Handled::Yes);
    }
}
