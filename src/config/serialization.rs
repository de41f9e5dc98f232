//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    ///
    /// Env-only settings (demo mode, the resolved API key) are never written.
    pub fn to_toml(&self) -> String {
        let api_key_env = self.generator.api_key_env.as_deref().unwrap_or("");

        format!(
            r#"# scenario-chat configuration

# Theme: matrix, plain
theme = "{theme}"

# Redraw interval in milliseconds (spinner and copy indicator refresh)
tick_rate_ms = {tick}

# Generation flow endpoint
# Requests are POST {{base_url}}/{{flow}} with body {{"data": {{"question": "..."}}}}
[generator]
base_url = "{base_url}"
flow = "{flow}"
timeout_secs = {timeout}
# Env var holding a bearer token; set to "" to disable auth
api_key_env = "{api_key_env}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme,
            tick = self.tick_rate_ms,
            base_url = self.generator.base_url,
            flow = self.generator.flow,
            timeout = self.generator.timeout_secs,
            api_key_env = api_key_env,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
