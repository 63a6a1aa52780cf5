//! Application settings loaded from config.toml
//!
//! Every section and key is optional. A missing file yields the defaults so the
//! bot can run with nothing but `DISCORD_BOT_TOKEN` set.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_VAR: &str = "GHOST_PING_CONFIG";

/// Config file used when `GHOST_PING_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Framework and command registration settings
    pub bot: BotConfig,
    /// Recent message tracking
    pub cache: CacheConfig,
    /// Appearance of ghost ping notifications
    pub notification: NotificationConfig,
}

/// `[bot]` section
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BotConfig {
    /// Register commands in this guild only (faster updates during development)
    pub dev_guild_id: Option<u64>,
}

/// `[cache]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Recent messages remembered across all channels. A deleted message that
    /// has already been evicted cannot be checked for ghost pings.
    pub max_messages: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_messages: 10_000,
        }
    }
}

/// `[notification]` section
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NotificationConfig {
    /// Sidebar colour of the reply-context embed
    pub embed_colour: u32,
    /// Characters of deleted content restated in a notification
    pub content_preview_chars: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            embed_colour: 0x0072_89DA,
            content_preview_chars: 500,
        }
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid or a value has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);

    if !path.exists() {
        info!("No config file at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;

    parse_config(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path:?}: {e}"),
    })
}

/// Parses config.toml contents.
pub fn parse_config(contents: &str) -> std::result::Result<AppConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Loads configuration from `GHOST_PING_CONFIG`, or ./config.toml when unset
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
