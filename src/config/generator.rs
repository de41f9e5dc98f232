//! Generation flow endpoint configuration

use serde::Deserialize;

/// Where and how to call the generation flow
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Flow server root, e.g. "http://127.0.0.1:3400"
    pub base_url: String,
    /// Flow name appended to the base URL
    pub flow: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Name of the env var holding a bearer token (None = no auth)
    pub api_key_env: Option<String>,
    /// Token resolved from `api_key_env` at load time (never written to disk)
    pub api_key: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3400".to_string(),
            flow: "devilkingsScenario".to_string(),
            timeout_secs: 120,
            api_key_env: Some("SCENARIO_API_KEY".to_string()),
            api_key: None,
        }
    }
}

/// Generator settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileGenerator {
    pub base_url: Option<String>,
    pub flow: Option<String>,
    pub timeout_secs: Option<u64>,
    pub api_key_env: Option<String>,
}

impl GeneratorConfig {
    /// Create from file config, with env overrides and defaults
    pub fn from_file(file: Option<FileGenerator>, env: &impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let base_url = env("SCENARIO_BASE_URL")
            .or(file.base_url)
            .unwrap_or(defaults.base_url);

        let flow = env("SCENARIO_FLOW")
            .or(file.flow)
            .unwrap_or(defaults.flow);

        let timeout_secs = file.timeout_secs.unwrap_or(defaults.timeout_secs).max(1);

        // An explicit empty string in the file disables auth
        let api_key_env = match file.api_key_env {
            Some(name) if name.trim().is_empty() => None,
            Some(name) => Some(name),
            None => defaults.api_key_env,
        };

        let api_key = api_key_env
            .as_deref()
            .and_then(|name| env(name))
            .filter(|key| !key.trim().is_empty());

        Self {
            base_url,
            flow,
            timeout_secs,
            api_key_env,
            api_key,
        }
    }

    /// Full URL of the flow endpoint
    pub fn flow_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.flow.trim_start_matches('/')
        )
    }
}
