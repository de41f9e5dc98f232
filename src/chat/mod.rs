//! Chat core: question, response and copy state for the single chat screen
//!
//! Everything here is UI-agnostic. The TUI and the one-shot CLI both drive the
//! same `ChatState` and receive notifications through an injected `Notifier`.

pub mod controller;
pub mod copied;
pub mod notify;
pub mod segment;
pub mod state;

pub use controller::{CopyOutcome, GenerationOutcome};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use segment::Segment;
pub use state::{ChatState, ResponseState, SubmitError};
