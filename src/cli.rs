// CLI module - command-line argument parsing and handlers
//
// Provides:
// - ask <QUESTION...>: one-shot headless question, printed to stdout
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR

use crate::chat::controller::ask;
use crate::chat::{ChatState, Notice, ResponseState, SubmitError};
use crate::config::{Config, VERSION};
use crate::generator::Generator;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Exit status when the generator call fails
pub const EXIT_FAILURE: i32 = 1;
/// Exit status when the question is empty
pub const EXIT_EMPTY_QUESTION: i32 = 2;

/// Scenario Chat - terminal client for the scenario generation flow
#[derive(Parser)]
#[command(name = "scenario-chat")]
#[command(version = VERSION)]
#[command(about = "Terminal client for the scenario generation flow", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask one question and print the response
    Ask {
        /// Question text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true)]
        question: Vec<String>,
    },
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,
    },
}

/// Handle `config` flags
pub fn handle_config(show: bool, path: bool, reset: bool, edit: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show();
        Ok(())
    } else if reset {
        handle_config_reset()
    } else if edit {
        handle_config_edit()
    } else {
        println!("Usage: scenario-chat config [--show|--path|--reset|--edit]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!("# demo_mode = {} (SCENARIO_DEMO)", config.demo_mode);
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!(
            "Failed to launch editor '{}'. Set $EDITOR to your preferred editor",
            editor
        )
    })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot ask
// ─────────────────────────────────────────────────────────────────────────────

/// Ask one question through the chat controller and print the result
///
/// Returns the process exit status: 0 on success, `EXIT_FAILURE` when the
/// generator failed, `EXIT_EMPTY_QUESTION` when there was nothing to ask.
pub async fn run_ask(generator: &dyn Generator, words: &[String]) -> i32 {
    let mut chat = ChatState::new();
    chat.set_question(words.join(" "));

    // Notices go to stderr once the call finishes
    let mut notices: Vec<Notice> = Vec::new();
    let submitted = ask(&mut chat, generator, &mut notices).await;

    match submitted {
        Err(SubmitError::EmptyQuestion) => {
            for notice in &notices {
                eprintln!("{}", notice.description);
            }
            EXIT_EMPTY_QUESTION
        }
        Err(SubmitError::InFlight) => EXIT_FAILURE,
        Ok(()) => match chat.response() {
            ResponseState::Failed(message) => {
                eprintln!("Error: {}", message);
                EXIT_FAILURE
            }
            _ => {
                print!("{}", render_plain(&chat));
                0
            }
        },
    }
}

/// Plain-text rendering: text verbatim, code fenced under an `[n]` header
pub fn render_plain(chat: &ChatState) -> String {
    let mut out = String::new();
    let mut block_number = 0;

    for segment in chat.segments() {
        if segment.is_code() {
            block_number += 1;
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n```\n{}\n```\n", block_number, segment.display_text()));
        } else {
            out.push_str(segment.display_text());
        }
    }

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
