//! Configuration for the aircall engines.
//!
//! Loads settings from a TOML file or uses defaults. The completion-service
//! capability is the explicit `enabled` flag here, handed to each engine at
//! construction; the engines never read ambient process state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Completion-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Whether the model-assisted enhancement path may be used at all.
    #[serde(default)]
    pub enabled: bool,

    /// Completion endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer credential for the completion service
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Request timeout in seconds; on expiry the engines fall back to the
    /// deterministic path
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://api.together.xyz/v1/completions".to_string()
}

fn default_model() -> String {
    "mistralai/Mixtral-8x7B-Instruct-v0.1".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.1
}

fn default_top_p() -> f64 {
    0.9
}

fn default_timeout() -> u64 {
    15
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Airline code prefix used to keep only the carrier's own flight
    /// mentions during detail extraction
    #[serde(default = "default_carrier_code")]
    pub carrier_code: String,

    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_carrier_code() -> String {
    "AI".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            carrier_code: default_carrier_code(),
            llm: LlmConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Load from `path`, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Using default config: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.carrier_code, "AI");
        assert!(!config.llm.enabled);
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.llm.top_p, 0.9);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            carrier_code = "BA"

            [llm]
            enabled = true
            model = "test-model"
            "#,
        )
        .unwrap();

        assert_eq!(config.carrier_code, "BA");
        assert!(config.llm.enabled);
        assert_eq!(config.llm.model, "test-model");
        assert_eq!(config.llm.timeout_secs, 15);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = EngineConfig::load_or_default(Path::new("/nonexistent/aircall.toml"));
        assert_eq!(config.carrier_code, "AI");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "carrier_code = \"LH\"").unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.carrier_code, "LH");
        assert!(!config.llm.enabled);
    }
}
