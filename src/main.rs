// Scenario Chat - terminal client for the scenario generation flow
//
// Sends a question to the external "devilkingsScenario" flow and shows the
// reply with fenced code blocks split out so each one can be copied.
//
// Architecture:
// - Chat core (chat/): question, response and copy state, UI-agnostic
// - Generator (generator/): the flow client behind a trait, plus a demo stand-in
// - TUI (ratatui): prompt, response, logs and toasts on one screen
// - CLI (clap): one-shot `ask` and config management
// - Background work reports back to the UI loop over mpsc channels

mod chat;
mod cli;
mod clipboard;
mod config;
mod generator;
mod logging;
mod startup;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use clipboard::SystemClipboard;
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use std::sync::Arc;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let question = match cli.command {
        Some(Commands::Config {
            show,
            path,
            reset,
            edit,
        }) => return cli::handle_config(show, path, reset, edit),
        Some(Commands::Ask { question }) => Some(question),
        None => None,
    };
    let tui_mode = question.is_none();

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();
    let log_buffer = LogBuffer::new();

    // The guard must outlive every log call so the file writer flushes
    let _file_guard = init_tracing(&config.logging, tui_mode.then(|| log_buffer.clone()));

    let generator = create_generator(&config)?;

    if let Some(words) = question {
        let code = cli::run_ask(generator.as_ref(), &words).await;
        if code != 0 {
            std::process::exit(code);
        }
        return Ok(());
    }

    startup::print_startup(&config);
    startup::log_startup(&config);

    tracing::info!("Starting TUI");
    let result = tui::run_tui(config, log_buffer, generator, Arc::new(SystemClipboard)).await;
    if let Err(ref e) = result {
        tracing::error!("TUI error: {:?}", e);
    }

    tracing::info!("Shutdown complete");
    result
}

fn create_generator(config: &Config) -> Result<Arc<dyn generator::Generator>> {
    let generator =
        generator::create_generator(config).context("Failed to create generator")?;
    tracing::debug!(generator = generator.name(), "Generator ready");
    Ok(generator)
}

/// Initialize tracing with conditional output
///
/// - TUI mode: capture logs into the buffer (keeps the alternate screen clean)
/// - Ask mode: human-readable logs on stderr (stdout carries the answer)
/// - File logging: optional JSON lines with rotation, in addition to either
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(logging: &LoggingConfig, tui_buffer: Option<LogBuffer>) -> Option<WorkerGuard> {
    let default_filter = format!("scenario_chat={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let stderr_layer = tui_buffer.is_none().then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });
    let tui_layer = tui_buffer.map(TuiLogLayer::new);

    let (file_writer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };
    let file_layer = file_writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling file writer, if file logging is enabled and the directory is usable
fn file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }

    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        // Tracing isn't up yet
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };

    // Writes happen on a background thread
    Some(tracing_appender::non_blocking(appender))
}
