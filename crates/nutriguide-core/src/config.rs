use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{NutriError, Result};

/// Top-level configuration for the Nutrition Guide client.
///
/// Loaded from `~/.nutriguide/config.toml` by default. Each section maps to
/// one concern of the client: logging, backend services, chat behavior and
/// transcript export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutriguideConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl NutriguideConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: NutriguideConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| NutriError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Backend service endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Base URL shared by the food lookup, chat and status endpoints.
    pub base_url: String,
    /// Path of the food lookup endpoint (`GET ?food_name=`).
    pub food_info_path: String,
    /// Path of the chat endpoint (`POST {"message": ..}`).
    pub chat_path: String,
    /// Path of the liveness check.
    pub status_path: String,
    /// Per-request deadline in seconds. Expiry counts as a transport failure.
    pub request_timeout_secs: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5002".to_string(),
            food_info_path: "/api/food_info".to_string(),
            chat_path: "/api/chat".to_string(),
            status_path: "/api/test".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Conversation behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Artificial "thinking" delay before the local greeting reply.
    pub greeting_delay_ms: u64,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Whether a speech-to-text capture device is wired up.
    pub speech_enabled: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting_delay_ms: 600,
            max_message_length: 10_000,
            speech_enabled: false,
        }
    }
}

/// Transcript export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory that receives `nutrition-chat-YYYY-MM-DD.txt` files.
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: ".".to_string(),
        }
    }
}
