// Status bar component
//
// Key hints: the focused panel's own hints below the rule, global keys set
// into the rule on the right. Narrow terminals only get the panel's hints.

use crate::tui::layout::Breakpoint;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const GLOBAL_HINTS: &str = " Tab:focus  Ctrl+Y:copy  Ctrl+L:logs  Ctrl+C:quit ";

/// Render the status bar with key hints for the focused panel
pub fn render(f: &mut Frame, area: Rect, ctx: &RenderContext, focus_hint: &str) {
    let theme = ctx.theme;
    let bp = Breakpoint::from_width(area.width);

    let mut block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border));

    if bp.shows_global_hints() {
        block = block.title_top(Line::from(GLOBAL_HINTS).right_aligned());
    }

    let status = Paragraph::new(format!(" {}", focus_hint))
        .style(Style::default().fg(theme.status_bar))
        .block(block);

    f.render_widget(status, area);
}
