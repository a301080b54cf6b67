//! Configuration system for modalkeys.
//!
//! This module provides the configuration structure with sensible defaults and
//! support for serialization/deserialization via serde. Configuration is loaded
//! from a TOML file; every field is optional in the file.
//!
//! # Example
//!
//! ```
//! use modalkeys::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.keyboard_layout, "en-US (QWERTY)");
//! assert_eq!(config.argument_terminator, "enter");
//!
//! let custom = Config {
//!     argument_terminator: "x".to_string(),
//!     ..Config::default()
//! };
//! assert_eq!(custom.argument_terminator, "x");
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for the modalkeys interpreter.
///
/// # Fields
///
/// * `keyboard_layout` - Built-in layout used to translate raw keys (default: "en-US (QWERTY)")
/// * `argument_terminator` - Key that ends a `t` argument (default: "enter")
/// * `log_level` - Fallback tracing filter when `RUST_LOG` is unset (default: "info")
/// * `theme` - Color scheme of the interactive demo (default: "default-dark")
/// * `key_remap` - Extra raw-to-canonical key mappings applied after the layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Built-in keyboard layout name
    #[serde(default = "default_keyboard_layout")]
    pub keyboard_layout: String,

    /// Key that terminates a multi-key argument
    #[serde(default = "default_argument_terminator")]
    pub argument_terminator: String,

    /// Tracing filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Color scheme name
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Raw key -> canonical key overrides
    #[serde(default)]
    pub key_remap: BTreeMap<String, String>,
}

fn default_keyboard_layout() -> String {
    crate::input::layout::DEFAULT_LAYOUT.to_string()
}

fn default_argument_terminator() -> String {
    "enter".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "default-dark".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keyboard_layout: default_keyboard_layout(),
            argument_terminator: default_argument_terminator(),
            log_level: default_log_level(),
            theme: default_theme(),
            key_remap: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/modalkeys/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("modalkeys");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "config_load_failed");
                Self::default()
            }
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or isn't valid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
