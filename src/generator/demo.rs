// Demo generator: canned responses to showcase the TUI without a flow server
//
// Cycles through a few responses that exercise prose, multiple code blocks and
// an unterminated fence. Asking a question containing "fail" returns an error
// so the failure path can be seen too.
//
// Run with: SCENARIO_DEMO=1 cargo run --release

use super::{GenerateError, Generator};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Simulated round-trip latency
const DEMO_LATENCY: Duration = Duration::from_millis(900);

const DEMO_RESPONSES: &[&str] = &[
    "Here's the smallest program that prints a greeting:\n\
```rust\nfn main() {\n    println!(\"hello\");\n}\n```\n\
Build it with:\n```\ncargo run --release\n```\nThat's all there is to it.",
    "To list files sorted by size, largest first:\n\
```sh\nls -lS\n```\n\
Add `-h` for human-readable sizes.",
    "A response with an unterminated fence looks like this:\n\
```python\nprint(\"no closing fence\")\n",
];

#[derive(Debug)]
pub struct DemoGenerator {
    next: AtomicUsize,
    latency: Duration,
}

impl DemoGenerator {
    pub fn new() -> Self {
        Self::with_latency(DEMO_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            next: AtomicUsize::new(0),
            latency,
        }
    }
}

impl Default for DemoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for DemoGenerator {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn generate(&self, question: &str) -> Result<String, GenerateError> {
        sleep(self.latency).await;

        if question.to_lowercase().contains("fail") {
            return Err(GenerateError::Flow(
                "demo failure requested by question".to_string(),
            ));
        }

        let idx = self.next.fetch_add(1, Ordering::Relaxed) % DEMO_RESPONSES.len();
        Ok(format!("> {}\n\n{}", question, DEMO_RESPONSES[idx]))
    }
}
