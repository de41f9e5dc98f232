// Title bar component
//
// App name, a busy indicator while a request is in flight, and the flow
// being called (hidden on narrow terminals).

use crate::tui::layout::Breakpoint;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
///
/// `target` describes where questions go, e.g. "flow devilkingsScenario".
pub fn render(f: &mut Frame, area: Rect, ctx: &RenderContext, target: &str) {
    let theme = ctx.theme;

    let busy = if ctx.chat.is_loading() {
        format!(" {} waiting for response", ctx.spinner_char())
    } else {
        String::new()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.title));

    if Breakpoint::from_width(area.width).shows_target() {
        block = block.title_top(Line::from(format!(" {} ", target)).right_aligned());
    }

    let title = Paragraph::new(format!(" ⛧ Scenario Chat{}", busy))
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
        .block(block);

    f.render_widget(title, area);
}
