// Chat state machine
//
// Owns the three pieces of mutable state behind the screen:
// - the question being typed
// - the response slot (Empty / Loading / Ready / Failed)
// - the copied-segment indicator
//
// Submit lifecycle:
//
//   [Empty|Ready|Failed] ──begin_submit──▶ [Loading] ──complete_submit──▶ [Ready|Failed]
//
// Only one request is in flight at a time. Each request carries a sequence
// number, and a completion whose number is not the one in flight is dropped.

use super::copied::CopiedIndex;
use super::notify::{Notice, Notifier};
use super::segment::{segment_response, Segment};
use crate::clipboard::ClipboardError;
use crate::generator::GenerateError;
use std::fmt;
use std::time::Instant;

pub const EMPTY_QUESTION_MESSAGE: &str = "Please enter a question.";
pub const COPY_SUCCESS_MESSAGE: &str = "Code copied to clipboard!";
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy code.";

/// The response slot, replaced wholesale on every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResponseState {
    #[default]
    Empty,
    Loading,
    Ready(String),
    Failed(String),
}

/// Why a submit did not start a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Question is empty after trimming
    EmptyQuestion,
    /// A request is already in flight; the submit control is disabled
    InFlight,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "{}", EMPTY_QUESTION_MESSAGE),
            Self::InFlight => write!(f, "A request is already in progress"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// A started request: what to send and how to match the reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub seq: u64,
    pub question: String,
}

#[derive(Debug, Default)]
pub struct ChatState {
    question: String,
    response: ResponseState,
    /// Sequence number of the request in flight, if any
    in_flight: Option<u64>,
    next_seq: u64,
    copied: CopiedIndex,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Replace the question (called on every keystroke)
    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub fn response(&self) -> &ResponseState {
        &self.response
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate the question and move into the loading state
    ///
    /// On success the previous response is already cleared and the returned
    /// ticket carries the trimmed question to send.
    pub fn begin_submit(&mut self, notifier: &mut dyn Notifier) -> Result<SubmitTicket, SubmitError> {
        if self.is_loading() {
            tracing::debug!("Submit ignored: request already in flight");
            return Err(SubmitError::InFlight);
        }

        let question = self.question.trim();
        if question.is_empty() {
            notifier.notify(Notice::error(EMPTY_QUESTION_MESSAGE));
            return Err(SubmitError::EmptyQuestion);
        }
        let question = question.to_string();

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);
        self.response = ResponseState::Loading;

        tracing::info!(seq, question_len = question.len(), "Submitting question");

        Ok(SubmitTicket { seq, question })
    }

    /// Apply a generator result and leave the loading state
    ///
    /// Returns false if the result belongs to a request that is no longer in
    /// flight; such results change nothing.
    pub fn complete_submit(
        &mut self,
        seq: u64,
        result: Result<String, GenerateError>,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if self.in_flight != Some(seq) {
            tracing::warn!(seq, in_flight = ?self.in_flight, "Dropping stale response");
            return false;
        }

        self.response = match result {
            Ok(text) => {
                tracing::info!(seq, response_len = text.len(), "Response received");
                ResponseState::Ready(text)
            }
            Err(e) => {
                tracing::error!(seq, "Generation failed: {}", e);
                notifier.notify(Notice::error(format!("Failed to get Devilkings response: {}", e)));
                ResponseState::Failed(e.to_string())
            }
        };
        self.in_flight = None;
        true
    }

    /// Segments of the ready response (empty for every other state)
    pub fn segments(&self) -> Vec<Segment<'_>> {
        match &self.response {
            ResponseState::Ready(text) => segment_response(text),
            _ => Vec::new(),
        }
    }

    /// Trimmed text of the code segment at `index`
    pub fn code_text(&self, index: usize) -> Option<&str> {
        self.segments()
            .into_iter()
            .find(|s| s.index == index && s.is_code())
            .map(|s| s.display_text())
    }

    /// Apply the outcome of a clipboard write for segment `index`
    pub fn record_copy(
        &mut self,
        index: usize,
        outcome: Result<(), ClipboardError>,
        now: Instant,
        notifier: &mut dyn Notifier,
    ) {
        match outcome {
            Ok(()) => {
                tracing::debug!(segment_index = index, "Copied code segment");
                self.copied.mark(index, now);
                notifier.notify(Notice::success(COPY_SUCCESS_MESSAGE));
            }
            Err(e) => {
                tracing::warn!(segment_index = index, "Copy failed: {}", e);
                notifier.notify(Notice::error(COPY_FAILURE_MESSAGE));
            }
        }
    }

    pub fn copied_index(&self, now: Instant) -> Option<usize> {
        self.copied.get(now)
    }

    /// Drop the copied indicator once its window has passed
    pub fn expire_copied(&mut self, now: Instant) -> bool {
        self.copied.expire(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::copied::COPY_CONFIRM_DURATION;
    use crate::chat::notify::NoticeLevel;
    use std::time::Duration;

    fn ready_state(text: &str) -> ChatState {
        let mut chat = ChatState::new();
        let mut notices = Vec::new();
        chat.set_question("q");
        let ticket = chat.begin_submit(&mut notices).unwrap();
        chat.complete_submit(ticket.seq, Ok(text.to_string()), &mut notices);
        chat
    }

    #[test]
    fn empty_question_is_rejected_with_notice() {
        for input in ["", "   ", "\n\t "] {
            let mut chat = ChatState::new();
            let mut notices = Vec::new();
            chat.set_question(input);

            assert_eq!(
                chat.begin_submit(&mut notices),
                Err(SubmitError::EmptyQuestion)
            );
            assert!(!chat.is_loading());
            assert_eq!(chat.response(), &ResponseState::Empty);
            assert_eq!(notices, vec![Notice::error("Please enter a question.")]);
        }
    }

    #[test]
    fn submit_clears_response_and_sets_loading() {
        let mut chat = ready_state("old answer");
        let mut notices = Vec::new();
        chat.set_question("  next question  ");

        let ticket = chat.begin_submit(&mut notices).unwrap();

        assert_eq!(ticket.question, "next question");
        assert!(chat.is_loading());
        assert_eq!(chat.response(), &ResponseState::Loading);
        assert!(chat.segments().is_empty());
        assert!(notices.is_empty());
        // The typed question is kept for editing
        assert_eq!(chat.question(), "  next question  ");
    }

    #[test]
    fn success_applies_text_and_clears_loading_together() {
        let mut chat = ChatState::new();
        let mut notices = Vec::new();
        chat.set_question("hello");
        let ticket = chat.begin_submit(&mut notices).unwrap();

        assert!(chat.complete_submit(ticket.seq, Ok("hi there".to_string()), &mut notices));

        assert!(!chat.is_loading());
        assert_eq!(chat.response(), &ResponseState::Ready("hi there".to_string()));
        assert!(notices.is_empty());
    }

    #[test]
    fn failure_is_visible_and_notified() {
        let mut chat = ChatState::new();
        let mut notices = Vec::new();
        chat.set_question("hello");
        let ticket = chat.begin_submit(&mut notices).unwrap();

        chat.complete_submit(
            ticket.seq,
            Err(GenerateError::Flow("timeout".to_string())),
            &mut notices,
        );

        assert!(!chat.is_loading());
        match chat.response() {
            ResponseState::Failed(message) => assert!(message.contains("timeout")),
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].description, "Failed to get Devilkings response: timeout");
    }

    #[test]
    fn view_stays_usable_after_failure() {
        let mut chat = ChatState::new();
        let mut notices = Vec::new();
        chat.set_question("hello");
        let ticket = chat.begin_submit(&mut notices).unwrap();
        chat.complete_submit(ticket.seq, Err(GenerateError::Timeout), &mut notices);

        let retry = chat.begin_submit(&mut notices).unwrap();
        assert!(retry.seq > ticket.seq);
        assert!(chat.is_loading());
    }

    #[test]
    fn second_submit_while_loading_is_refused() {
        let mut chat = ChatState::new();
        let mut notices = Vec::new();
        chat.set_question("hello");
        chat.begin_submit(&mut notices).unwrap();

        assert_eq!(chat.begin_submit(&mut notices), Err(SubmitError::InFlight));
        assert!(notices.is_empty());
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut chat = ChatState::new();
        let mut notices = Vec::new();
        chat.set_question("hello");
        let ticket = chat.begin_submit(&mut notices).unwrap();

        assert!(!chat.complete_submit(ticket.seq + 7, Ok("late".to_string()), &mut notices));
        assert!(chat.is_loading());
        assert_eq!(chat.response(), &ResponseState::Loading);

        assert!(chat.complete_submit(ticket.seq, Ok("fresh".to_string()), &mut notices));
        // A duplicate completion for a settled request is stale too
        assert!(!chat.complete_submit(ticket.seq, Ok("again".to_string()), &mut notices));
        assert_eq!(chat.response(), &ResponseState::Ready("fresh".to_string()));
    }

    #[test]
    fn code_text_is_trimmed_and_only_for_code() {
        let chat = ready_state("Use this:\n```print(1)```\nDone");

        assert_eq!(chat.code_text(1), Some("print(1)"));
        assert_eq!(chat.code_text(0), None);
        assert_eq!(chat.code_text(2), None);
        assert_eq!(chat.code_text(9), None);
    }

    #[test]
    fn copy_success_marks_index_for_two_seconds() {
        let mut chat = ready_state("a```x```b");
        let mut notices = Vec::new();
        let t0 = Instant::now();

        chat.record_copy(1, Ok(()), t0, &mut notices);

        assert_eq!(notices, vec![Notice::success("Code copied to clipboard!")]);
        assert_eq!(chat.copied_index(t0 + COPY_CONFIRM_DURATION), Some(1));
        assert!(!chat.expire_copied(t0 + COPY_CONFIRM_DURATION));
        assert!(chat.expire_copied(t0 + COPY_CONFIRM_DURATION + Duration::from_millis(1)));
        assert_eq!(chat.copied_index(t0), None);
    }

    #[test]
    fn copy_failure_leaves_index_untouched() {
        let mut chat = ready_state("a```x```b```y```c");
        let mut notices = Vec::new();
        let t0 = Instant::now();
        chat.record_copy(1, Ok(()), t0, &mut notices);
        notices.clear();

        chat.record_copy(
            3,
            Err(ClipboardError("no display".to_string())),
            t0 + Duration::from_millis(10),
            &mut notices,
        );

        assert_eq!(notices, vec![Notice::error("Failed to copy code.")]);
        assert_eq!(chat.copied_index(t0 + Duration::from_millis(10)), Some(1));
        assert_eq!(chat.response(), &ResponseState::Ready("a```x```b```y```c".to_string()));
    }
}
