// Generator module - the external AI flow behind a single async call
//
// The chat core only knows the `Generator` contract: one question in, one
// response string out, or a human-readable error. Two implementations ship:
// - HttpGenerator: POSTs to a flow server using its {data}/{result} envelope
// - DemoGenerator: canned responses for showcasing the TUI offline

mod demo;
mod http;

pub use demo::DemoGenerator;
pub use http::HttpGenerator;

use crate::config::Config;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Errors surfaced by a generator call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Connection failed or the request could not be sent
    Network(String),
    /// The configured request timeout elapsed
    Timeout,
    /// Non-success HTTP status from the flow server
    Api { status: u16, message: String },
    /// The flow itself reported an error
    Flow(String),
    /// Body was not the expected envelope
    InvalidResponse(String),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Flow(msg) => write!(f, "{}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for GenerateError {}

/// The external generation collaborator
///
/// Implementations must be cheap to share: the TUI holds one behind an `Arc`
/// and hands clones to each spawned request task.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &'static str;

    /// Generate a response for a (non-empty, trimmed) question
    async fn generate(&self, question: &str) -> Result<String, GenerateError>;
}

/// Build the generator selected by configuration
pub fn create_generator(config: &Config) -> Result<Arc<dyn Generator>, GenerateError> {
    if config.demo_mode {
        tracing::info!("Using demo generator (canned responses)");
        return Ok(Arc::new(DemoGenerator::new()));
    }

    let generator = HttpGenerator::new(&config.generator)?;
    Ok(Arc::new(generator))
}
