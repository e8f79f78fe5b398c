mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::context::MAX_RECENT_CHAT;
use crate::error::ChatgateError;
use defaults::*;

/// Top-level chatgate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub reply: ReplyConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider")]
    pub default: String,
    pub gemini: Option<GeminiConfig>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: default_provider(),
            gemini: None,
        }
    }
}

/// Google Gemini provider config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Empty = read `GEMINI_API_KEY` from the environment at startup.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            model: default_gemini_model(),
        }
    }
}

/// Reply pipeline switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyConfig {
    /// Embed channel context (vibe, recent chat, last reply) in prompts.
    #[serde(default = "default_true")]
    pub live_context: bool,
    /// Ask the provider for web-search grounding on current-events prompts.
    #[serde(default = "default_true")]
    pub grounding: bool,
    /// Recent chat excerpts embedded in the live prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            live_context: true,
            grounding: true,
            history_window: default_history_window(),
        }
    }
}

impl ReplyConfig {
    /// History window clamped to what the context actually stores.
    pub fn history_window(&self) -> usize {
        self.history_window.min(MAX_RECENT_CHAT)
    }
}

/// Defaults used when no config file exists: Gemini enabled.
pub fn fallback() -> Config {
    Config {
        provider: ProviderConfig {
            gemini: Some(GeminiConfig::default()),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults (with a Gemini provider enabled) if the file does
/// not exist.
pub fn load(path: &str) -> Result<Config, ChatgateError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(fallback());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ChatgateError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| ChatgateError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
