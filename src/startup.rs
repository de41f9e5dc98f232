// Startup module - banner and boot summary
//
// Printed before the TUI takes over the screen, then mirrored into the log
// buffer so the same summary is visible in the logs panel.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One line of the boot summary
pub struct StartupItem {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

/// Print the startup banner
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{MAGENTA}⛧ Scenario Chat{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Terminal client for the scenario generation flow{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for item in startup_items(config) {
        print_item(&item);
    }
    println!();

    if config.demo_mode {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(canned responses){RESET}");
    } else {
        println!(
            "  {MAGENTA}▸{RESET} Asking {BOLD}{}{RESET}",
            config.generator.flow_url()
        );
    }
    println!();
}

/// Boot summary derived from config
fn startup_items(config: &Config) -> Vec<StartupItem> {
    let generator = &config.generator;

    vec![
        StartupItem {
            name: "generator",
            enabled: true,
            description: if config.demo_mode {
                "demo".to_string()
            } else {
                format!("flow {} ({}s timeout)", generator.flow, generator.timeout_secs)
            },
        },
        StartupItem {
            name: "auth",
            enabled: generator.api_key.is_some(),
            description: match &generator.api_key_env {
                Some(name) => format!("bearer token from ${}", name),
                None => "disabled".to_string(),
            },
        },
        StartupItem {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: config.logging.file_dir.display().to_string(),
        },
        StartupItem {
            name: "theme",
            enabled: true,
            description: config.theme.clone(),
        },
    ]
}

fn print_item(item: &StartupItem) {
    use colors::*;

    let (icon, style) = if item.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<10}{RESET} {DIM}{}{RESET}",
        item.name, item.description
    );
}

/// Mirror the boot summary into the logs panel
pub fn log_startup(config: &Config) {
    tracing::info!("═══════════════════════════════");
    tracing::info!("  ⛧ SCENARIO CHAT v{}", VERSION);
    tracing::info!("═══════════════════════════════");

    for item in startup_items(config) {
        let icon = if item.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, item.name, item.description);
    }

    if config.demo_mode {
        tracing::info!("▸ Demo mode active (canned responses)");
    } else {
        tracing::info!("▸ Target {}", config.generator.flow_url());
    }

    tracing::info!("Ready. Type a question and press Enter.");
}
