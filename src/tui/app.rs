// TUI application state
//
// App owns the chat state and the panels, spawns generator and clipboard work,
// and applies their outcomes when they come back over the channels. All
// mutation happens on the UI task, so nothing here needs a lock.

use super::components::{LogsPanel, PromptBar, ResponsePanel, ToastStack};
use super::input::InputHandler;
use super::scroll::FocusablePanel;
use super::theme::Theme;
use super::traits::{Handled, Interactive};
use crate::chat::controller::{spawn_copy, spawn_generation};
use crate::chat::{ChatState, CopyOutcome, GenerationOutcome};
use crate::clipboard::ClipboardWriter;
use crate::config::Config;
use crate::generator::Generator;
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Where finished background work is sent
pub struct OutcomeSenders {
    pub generation: mpsc::Sender<GenerationOutcome>,
    pub copy: mpsc::Sender<CopyOutcome>,
}

/// Main application state for the TUI
pub struct App {
    pub chat: ChatState,

    // Panels (each owns its own scroll/edit state)
    pub prompt: PromptBar,
    pub response_panel: ResponsePanel,
    pub logs_panel: LogsPanel,

    /// Notification sink handed to the chat core
    pub toasts: ToastStack,

    pub theme: Theme,
    pub focused: FocusablePanel,
    pub show_logs: bool,
    pub log_buffer: LogBuffer,

    pub should_quit: bool,

    /// Advanced every tick; drives the spinner
    pub animation_frame: usize,

    /// Title bar label, e.g. "flow devilkingsScenario"
    pub target: String,

    input_handler: InputHandler,
    generator: Arc<dyn Generator>,
    clipboard: Arc<dyn ClipboardWriter>,
    senders: OutcomeSenders,
}

impl App {
    pub fn new(
        config: &Config,
        log_buffer: LogBuffer,
        generator: Arc<dyn Generator>,
        clipboard: Arc<dyn ClipboardWriter>,
        senders: OutcomeSenders,
    ) -> Self {
        let target = if config.demo_mode {
            "demo mode".to_string()
        } else {
            format!("flow {}", config.generator.flow)
        };

        Self {
            chat: ChatState::new(),
            prompt: PromptBar::new(),
            response_panel: ResponsePanel::new(),
            logs_panel: LogsPanel::new(),
            toasts: ToastStack::new(),
            theme: Theme::by_name(&config.theme),
            focused: FocusablePanel::default(),
            show_logs: false,
            log_buffer,
            should_quit: false,
            animation_frame: 0,
            target,
            input_handler: InputHandler::default(),
            generator,
            clipboard,
            senders,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Input plumbing
    // ─────────────────────────────────────────────────────────────

    /// Debounced key press; false means the press should be ignored
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    pub fn is_focused(&self, panel: FocusablePanel) -> bool {
        self.focused == panel
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next(self.show_logs);
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev(self.show_logs);
    }

    pub fn focus_prompt(&mut self) {
        self.focused = FocusablePanel::Prompt;
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
        if !self.show_logs && self.is_focused(FocusablePanel::Logs) {
            self.focus_prompt();
        }
    }

    /// Route a key to the focused panel
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focused {
            FocusablePanel::Prompt => {
                let handled = self.prompt.handle_key(key);
                if handled == Handled::Yes {
                    // Question tracks every keystroke
                    self.chat.set_question(self.prompt.text());
                }
                handled
            }
            FocusablePanel::Response => self.response_panel.handle_key(key),
            FocusablePanel::Logs => self.logs_panel.handle_key(key),
        }
    }

    /// Status bar hints for the focused panel
    pub fn focus_hint(&self) -> &'static str {
        match self.focused {
            FocusablePanel::Prompt => self.prompt.focus_hint(),
            FocusablePanel::Response => self.response_panel.focus_hint(),
            FocusablePanel::Logs => self.logs_panel.focus_hint(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Chat actions
    // ─────────────────────────────────────────────────────────────

    /// Submit the current question
    ///
    /// Does nothing while a request is in flight. An empty question only
    /// raises a toast.
    pub fn submit(&mut self) {
        self.chat.set_question(self.prompt.text());

        let Ok(ticket) = self.chat.begin_submit(&mut self.toasts) else {
            return;
        };

        // Response slot was just cleared
        self.response_panel.on_response_changed(&self.chat);

        spawn_generation(
            Arc::clone(&self.generator),
            ticket,
            self.senders.generation.clone(),
        );
    }

    /// Apply a finished generator call
    pub fn apply_generation(&mut self, outcome: GenerationOutcome) {
        if self
            .chat
            .complete_submit(outcome.seq, outcome.result, &mut self.toasts)
        {
            self.response_panel.on_response_changed(&self.chat);
        }
    }

    /// Copy the selected code block, if there is one
    pub fn request_copy(&mut self) {
        let Some(index) = self.response_panel.selected_segment() else {
            tracing::debug!("Copy requested with no code block selected");
            return;
        };
        let Some(text) = self.chat.code_text(index) else {
            return;
        };

        spawn_copy(
            Arc::clone(&self.clipboard),
            index,
            text.to_string(),
            self.senders.copy.clone(),
        );
    }

    /// Apply a finished clipboard write
    pub fn apply_copy(&mut self, outcome: CopyOutcome, now: Instant) {
        self.chat
            .record_copy(outcome.index, outcome.result, now, &mut self.toasts);
    }

    /// Periodic tick: spinner, copy indicator and toast expiry
    pub fn tick(&mut self, now: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.chat.expire_copied(now);
        self.toasts.prune(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::controller::fakes::{FakeClipboard, FakeGenerator};
    use crate::chat::{NoticeLevel, ResponseState};
    use crate::generator::GenerateError;
    use std::time::Duration;

    struct Harness {
        app: App,
        generation_rx: mpsc::Receiver<GenerationOutcome>,
        copy_rx: mpsc::Receiver<CopyOutcome>,
        generator: Arc<FakeGenerator>,
        clipboard: Arc<FakeClipboard>,
    }

    fn harness(generator: FakeGenerator, clipboard: FakeClipboard) -> Harness {
        let (generation_tx, generation_rx) = mpsc::channel(4);
        let (copy_tx, copy_rx) = mpsc::channel(4);
        let generator = Arc::new(generator);
        let clipboard = Arc::new(clipboard);

        let app = App::new(
            &Config::default(),
            LogBuffer::new(),
            generator.clone(),
            clipboard.clone(),
            OutcomeSenders {
                generation: generation_tx,
                copy: copy_tx,
            },
        );

        Harness {
            app,
            generation_rx,
            copy_rx,
            generator,
            clipboard,
        }
    }

    fn type_question(app: &mut App, text: &str) {
        for c in text.chars() {
            app.dispatch_to_focused(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    fn toast_descriptions(app: &App) -> Vec<String> {
        app.toasts
            .iter()
            .map(|t| t.notice.description.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_question_only_toasts() {
        let mut h = harness(FakeGenerator::ok("unused"), FakeClipboard::default());
        type_question(&mut h.app, "   ");

        h.app.submit();

        assert_eq!(toast_descriptions(&h.app), vec!["Please enter a question."]);
        assert_eq!(h.app.chat.response(), &ResponseState::Empty);
        assert!(!h.app.chat.is_loading());
        assert_eq!(h.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_round_trip_selects_first_code_block() {
        let mut h = harness(
            FakeGenerator::ok("Use this:\n```print(1)```\nDone"),
            FakeClipboard::default(),
        );
        type_question(&mut h.app, "  how?  ");
        assert_eq!(h.app.chat.question(), "  how?  ");

        h.app.submit();
        assert!(h.app.chat.is_loading());
        assert_eq!(h.app.chat.response(), &ResponseState::Loading);

        let outcome = h.generation_rx.recv().await.unwrap();
        h.app.apply_generation(outcome);

        assert!(!h.app.chat.is_loading());
        assert_eq!(
            h.app.chat.response(),
            &ResponseState::Ready("Use this:\n```print(1)```\nDone".to_string())
        );
        assert_eq!(h.app.response_panel.selected_segment(), Some(1));
        assert_eq!(*h.generator.calls.lock().unwrap(), vec!["how?".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_disabled_while_in_flight() {
        let mut h = harness(FakeGenerator::ok("answer"), FakeClipboard::default());
        type_question(&mut h.app, "q");

        h.app.submit();
        h.app.submit();

        let first = h.generation_rx.recv().await.unwrap();
        h.app.apply_generation(first);

        // Only one request was ever started, and nothing was toasted
        assert!(h.generation_rx.try_recv().is_err());
        assert_eq!(h.generator.call_count(), 1);
        assert!(h.app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_sets_error_and_toasts() {
        let mut h = harness(
            FakeGenerator::err(GenerateError::Flow("timeout".to_string())),
            FakeClipboard::default(),
        );
        type_question(&mut h.app, "q");
        h.app.submit();

        let outcome = h.generation_rx.recv().await.unwrap();
        h.app.apply_generation(outcome);

        assert_eq!(
            h.app.chat.response(),
            &ResponseState::Failed("timeout".to_string())
        );
        assert!(!h.app.chat.is_loading());
        assert_eq!(
            toast_descriptions(&h.app),
            vec!["Failed to get Devilkings response: timeout"]
        );
    }

    #[tokio::test]
    async fn test_copy_marks_block_then_tick_expires_it() {
        let mut h = harness(
            FakeGenerator::ok("intro ```  let x = 1;  ``` outro"),
            FakeClipboard::default(),
        );
        type_question(&mut h.app, "q");
        h.app.submit();
        let outcome = h.generation_rx.recv().await.unwrap();
        h.app.apply_generation(outcome);

        h.app.request_copy();
        let copied = h.copy_rx.recv().await.unwrap();
        let t0 = Instant::now();
        h.app.apply_copy(copied, t0);

        assert_eq!(*h.clipboard.writes.lock().unwrap(), vec!["let x = 1;".to_string()]);
        assert_eq!(h.app.chat.copied_index(t0), Some(1));
        let levels: Vec<_> = h.app.toasts.iter().map(|t| t.notice.level).collect();
        assert_eq!(levels, vec![NoticeLevel::Success]);

        h.app.tick(t0 + Duration::from_millis(2000));
        assert_eq!(h.app.chat.copied_index(t0 + Duration::from_millis(2000)), Some(1));

        h.app.tick(t0 + Duration::from_millis(2001));
        assert_eq!(h.app.chat.copied_index(t0 + Duration::from_millis(2001)), None);
    }

    #[tokio::test]
    async fn test_copy_failure_leaves_indicator_alone() {
        let mut h = harness(
            FakeGenerator::ok("```code```"),
            FakeClipboard {
                fail: true,
                ..Default::default()
            },
        );
        type_question(&mut h.app, "q");
        h.app.submit();
        let outcome = h.generation_rx.recv().await.unwrap();
        h.app.apply_generation(outcome);

        h.app.request_copy();
        let copied = h.copy_rx.recv().await.unwrap();
        let now = Instant::now();
        h.app.apply_copy(copied, now);

        assert_eq!(h.app.chat.copied_index(now), None);
        assert_eq!(toast_descriptions(&h.app), vec!["Failed to copy code."]);
    }

    #[tokio::test]
    async fn test_copy_without_code_does_nothing() {
        let mut h = harness(FakeGenerator::ok("prose only"), FakeClipboard::default());
        h.app.request_copy();
        assert!(h.copy_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_hiding_logs_returns_focus_to_prompt() {
        let mut h = harness(FakeGenerator::ok("unused"), FakeClipboard::default());

        h.app.toggle_logs();
        h.app.focus_next();
        h.app.focus_next();
        assert!(h.app.is_focused(FocusablePanel::Logs));

        h.app.toggle_logs();
        assert!(h.app.is_focused(FocusablePanel::Prompt));
    }
}
