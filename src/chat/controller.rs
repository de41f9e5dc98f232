// Async glue between the chat state and its collaborators
//
// The state machine in `state.rs` is synchronous. The two suspension points
// (the generator call and the clipboard write) run here, off the UI loop,
// and report back as outcome messages over mpsc channels.

use super::notify::Notifier;
use super::state::{ChatState, ResponseState, SubmitError, SubmitTicket};
use crate::clipboard::{ClipboardError, ClipboardWriter};
use crate::generator::{GenerateError, Generator};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Result of one generator call, tagged with its request sequence number
#[derive(Debug)]
pub struct GenerationOutcome {
    pub seq: u64,
    pub result: Result<String, GenerateError>,
}

/// Result of one clipboard write for a code segment
#[derive(Debug)]
pub struct CopyOutcome {
    pub index: usize,
    pub result: Result<(), ClipboardError>,
}

/// Run the generator for a ticket
pub async fn run_generation(generator: &dyn Generator, ticket: SubmitTicket) -> GenerationOutcome {
    tracing::debug!(seq = ticket.seq, generator = generator.name(), "Calling generator");
    let result = generator.generate(&ticket.question).await;
    GenerationOutcome {
        seq: ticket.seq,
        result,
    }
}

/// Spawn the generator call; the outcome arrives on `tx`
///
/// A generator task that panics still reports, as a network failure, so the
/// chat never stays loading.
pub fn spawn_generation(
    generator: Arc<dyn Generator>,
    ticket: SubmitTicket,
    tx: mpsc::Sender<GenerationOutcome>,
) -> JoinHandle<()> {
    let seq = ticket.seq;
    tokio::spawn(async move {
        let outcome = tokio::spawn(async move { run_generation(generator.as_ref(), ticket).await })
            .await
            .unwrap_or_else(|e| {
                tracing::error!(seq, "Generation task failed: {}", e);
                GenerationOutcome {
                    seq,
                    result: Err(GenerateError::Network("generation task failed".to_string())),
                }
            });
        // Receiver gone means the UI is shutting down
        let _ = tx.send(outcome).await;
    })
}

/// Spawn a blocking clipboard write; the outcome arrives on `tx`
pub fn spawn_copy(
    clipboard: Arc<dyn ClipboardWriter>,
    index: usize,
    text: String,
    tx: mpsc::Sender<CopyOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .unwrap_or_else(|e| Err(ClipboardError(format!("clipboard task failed: {}", e))));
        let _ = tx.send(CopyOutcome { index, result }).await;
    })
}

/// Submit the current question and wait for the reply in place
///
/// Used by the one-shot CLI path, where nothing else runs while waiting.
pub async fn ask(
    chat: &mut ChatState,
    generator: &dyn Generator,
    notifier: &mut dyn Notifier,
) -> Result<(), SubmitError> {
    let ticket = chat.begin_submit(notifier)?;
    let outcome = run_generation(generator, ticket).await;
    chat.complete_submit(outcome.seq, outcome.result, notifier);
    debug_assert!(!matches!(chat.response(), ResponseState::Loading));
    Ok(())
}
