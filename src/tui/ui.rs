// UI rendering
//
// One frame: title, prompt, response, optional logs, status bar, with toasts
// drawn last over everything above the status bar.

use super::app::App;
use super::components::{status_bar, title_bar};
use super::traits::{Component, ComponentId, RenderContext};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Block,
    Frame,
};
use std::time::Instant;

/// Minimum height of the logs panel when shown
const MIN_LOGS_HEIGHT: u16 = 5;

/// Main UI render function, called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    f.render_widget(Block::default().style(app.theme.base_style()), f.area());

    let logs_height = logs_height(f.area(), app.show_logs);
    let [title_area, prompt_area, response_area, logs_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(logs_height),
        Constraint::Length(2),
    ])
    .areas(f.area());

    let focus_hint = app.focus_hint();

    // Panels are borrowed mutably while the context borrows disjoint fields
    let ctx = RenderContext {
        theme: &app.theme,
        focus: ComponentId::from(app.focused),
        animation_frame: app.animation_frame,
        chat: &app.chat,
        log_buffer: &app.log_buffer,
        now: Instant::now(),
    };

    title_bar::render(f, title_area, &ctx, &app.target);
    app.prompt.render(f, prompt_area, &ctx);
    app.response_panel.render(f, response_area, &ctx);
    if app.show_logs {
        app.logs_panel.render(f, logs_area, &ctx);
    }
    status_bar::render(f, status_area, &ctx, focus_hint);

    let overlay = Rect {
        height: f.area().height.saturating_sub(status_area.height),
        ..f.area()
    };
    app.toasts.render(f, overlay, &app.theme);
}

fn logs_height(area: Rect, show_logs: bool) -> u16 {
    if show_logs {
        (area.height / 3).max(MIN_LOGS_HEIGHT)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::controller::fakes::{FakeClipboard, FakeGenerator};
    use crate::chat::GenerationOutcome;
    use crate::config::Config;
    use crate::logging::LogBuffer;
    use crate::tui::app::OutcomeSenders;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn test_app() -> App {
        let (generation, _) = mpsc::channel(1);
        let (copy, _) = mpsc::channel(1);
        App::new(
            &Config::default(),
            LogBuffer::new(),
            Arc::new(FakeGenerator::ok("unused")),
            Arc::new(FakeClipboard::default()),
            OutcomeSenders { generation, copy },
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_initial_frame_shows_placeholder_and_ask() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("No response yet. Ask something..."));
        assert!(text.contains("Ask"));
        assert!(text.contains("Scenario Chat"));
        assert!(!text.contains("System Logs"));
    }

    #[test]
    fn test_tabs_in_response_render_as_spaces() {
        let mut app = test_app();
        app.chat.set_question("go?");
        let ticket = app.chat.begin_submit(&mut app.toasts).unwrap();
        app.apply_generation(GenerationOutcome {
            seq: ticket.seq,
            result: Ok(
                "Go:\n```\nfunc main() {\n\tfmt.Println(1)\n}\n```\n\tindented prose".to_string(),
            ),
        });
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(!text.contains('\t'));
        assert!(text.contains("│     fmt.Println(1)"));
        assert!(text.contains("    indented prose"));
        // Copy still gets the code as sent
        assert_eq!(app.chat.code_text(1), Some("func main() {\n\tfmt.Println(1)\n}"));
    }

    #[test]
    fn test_logs_panel_appears_when_toggled() {
        let mut app = test_app();
        app.toggle_logs();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert!(screen_text(&terminal).contains("System Logs"));
    }

    #[test]
    fn test_logs_height() {
        let area = Rect::new(0, 0, 80, 12);
        assert_eq!(logs_height(area, false), 0);
        assert_eq!(logs_height(area, true), MIN_LOGS_HEIGHT);
        assert_eq!(logs_height(Rect::new(0, 0, 80, 60), true), 20);
    }
}
