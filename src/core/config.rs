//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.astro/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::prompt::ASTRO_PERSONA;
use crate::inference::DEFAULT_MISTRAL_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AstroConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub mistral: MistralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Model for the streaming chat panel.
    pub chat_model: Option<String>,
    /// Model for the generative-UI panel.
    pub ui_model: Option<String>,
    /// Replacement persona prompt for the chat panel.
    pub persona: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MistralConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CHAT_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_UI_MODEL: &str = "mistral-small";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub chat_model: String,
    pub ui_model: String,
    pub persona: String,
    pub mistral_api_key: Option<String>,
    pub mistral_base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.astro/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".astro").join("config.toml"))
}

/// Load config from `~/.astro/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AstroConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AstroConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AstroConfig::default());
        }
    };

    if !path.exists() {
        info!(
            "No config file found, generating default at {}",
            path.display()
        );
        generate_default_config(&path);
        return Ok(AstroConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: AstroConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Astro Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [general]
# chat_model = "mistral-large-latest"   # Streaming chat panel
# ui_model = "mistral-small"            # Generative-UI panel
# persona = "You are Astro, ..."        # Replacement chat persona

# [mistral]
# api_key = "..."                       # Or set MISTRAL_API_KEY env var
# base_url = "https://api.mistral.ai/v1"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars.
pub fn resolve(config: &AstroConfig) -> ResolvedConfig {
    // Models: env → config → default
    let chat_model = std::env::var("ASTRO_CHAT_MODEL")
        .ok()
        .or_else(|| config.general.chat_model.clone())
        .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

    let ui_model = std::env::var("ASTRO_UI_MODEL")
        .ok()
        .or_else(|| config.general.ui_model.clone())
        .unwrap_or_else(|| DEFAULT_UI_MODEL.to_string());

    // Persona: config file wins over the built-in default
    let persona = config
        .general
        .persona
        .clone()
        .unwrap_or_else(|| ASTRO_PERSONA.to_string());

    // API key: env → config
    let mistral_api_key = std::env::var("MISTRAL_API_KEY")
        .ok()
        .or_else(|| config.mistral.api_key.clone());

    // Base URL: env → config → default
    let mistral_base_url = std::env::var("MISTRAL_BASE_URL")
        .ok()
        .or_else(|| config.mistral.base_url.clone())
        .unwrap_or_else(|| DEFAULT_MISTRAL_BASE_URL.to_string());

    ResolvedConfig {
        chat_model,
        ui_model,
        persona,
        mistral_api_key,
        mistral_base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AstroConfig::default();
        assert!(config.general.chat_model.is_none());
        assert!(config.mistral.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AstroConfig::default();
        let resolved = resolve(&config);
        assert_eq!(resolved.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(resolved.ui_model, DEFAULT_UI_MODEL);
        assert_eq!(resolved.mistral_base_url, DEFAULT_MISTRAL_BASE_URL);
        assert!(resolved.persona.starts_with("You are Astro"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AstroConfig {
            general: GeneralConfig {
                chat_model: Some("my-chat-model".to_string()),
                ui_model: Some("my-ui-model".to_string()),
                persona: Some("Custom persona.".to_string()),
            },
            mistral: MistralConfig {
                api_key: Some("key-123".to_string()),
                base_url: Some("http://localhost:9999/v1".to_string()),
            },
        };
        let resolved = resolve(&config);
        assert_eq!(resolved.chat_model, "my-chat-model");
        assert_eq!(resolved.ui_model, "my-ui-model");
        assert_eq!(resolved.persona, "Custom persona.");
        assert_eq!(resolved.mistral_api_key.as_deref(), Some("key-123"));
        assert_eq!(resolved.mistral_base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
chat_model = "mistral-large-latest"
ui_model = "mistral-small"

[mistral]
api_key = "sk-test-123"
base_url = "http://192.168.1.100:8080/v1"
"#;
        let config: AstroConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.general.chat_model.as_deref(),
            Some("mistral-large-latest")
        );
        assert_eq!(config.mistral.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(
            config.mistral.base_url.as_deref(),
            Some("http://192.168.1.100:8080/v1")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
ui_model = "my-model"
"#;
        let config: AstroConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.ui_model.as_deref(), Some("my-model"));
        assert!(config.general.chat_model.is_none());
        assert!(config.mistral.api_key.is_none());
    }
}
