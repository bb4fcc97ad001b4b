//! Application configuration
//!
//! Configuration loaded from .logview.toml file.

use anyhow::{Context, Result};
use logview::LogViewOptions;
use serde::{Deserialize, Serialize};

/// Application configuration loaded from .logview.toml
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Overlay console appearance and bindings
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Options handed to the log view as-is
    #[serde(default)]
    pub log_view: LogViewOptions,
}

/// `[console]` section
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Height of the overlay as a percentage of the screen
    #[serde(default = "default_height_percent")]
    pub height_percent: u16,

    /// Key that slides the console in and out
    #[serde(default = "default_toggle_key")]
    pub toggle_key: char,

    /// Whether the console is open on startup
    #[serde(default = "default_start_open")]
    pub start_open: bool,
}

fn default_height_percent() -> u16 {
    70
}

fn default_toggle_key() -> char {
    '`'
}

fn default_start_open() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            height_percent: default_height_percent(),
            toggle_key: default_toggle_key(),
            start_open: default_start_open(),
        }
    }
}

impl ConsoleConfig {
    /// Rows the console occupies on a screen `total` rows high
    pub fn console_height(&self, total: u16) -> u16 {
        let percent = u32::from(self.height_percent.clamp(10, 100));
        let rows = (u32::from(total) * percent) / 100;
        rows.min(u32::from(total)) as u16
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(source) = crate::load_config_file() {
            match Self::from_toml(&source.content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", source.path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("{:#}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }
}
