use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration.
///
/// Example YAML:
/// ```yaml
/// language: en
/// history:
///   max_entries: 50
/// narrative:
///   enabled: true
///   model: gpt-4o-mini
///   timeout: 20s
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Language code the narrative is written in
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub narrative: NarrativeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            history: HistoryConfig::default(),
            narrative: NarrativeConfig::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

/// Local result history.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Defaults to ~/.config/fate-sync/history.json. A leading `~/` is
    /// expanded to the home directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Oldest entries beyond this count are dropped on save
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            max_entries: default_max_entries(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_entries() -> usize {
    100
}

/// Chat-completion service used for the generated reading.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NarrativeConfig {
    /// Request a reading on every `score` run, not only with --narrate
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// humantime duration, e.g. "30s"
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_timeout(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout() -> String {
    "30s".to_string()
}

fn default_api_key_env() -> String {
    crate::narrative::ENV_API_KEY_VAR.to_string()
}
