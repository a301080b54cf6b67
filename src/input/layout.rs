//! Keyboard layout translation.
//!
//! Some hosts report key codes as if the keyboard were en-US QWERTY regardless
//! of the physical layout. A [`KeyTranslator`] maps those tokens back to what
//! the user actually pressed before the dispatcher sees them.

use crate::config::Config;
use anyhow::{bail, Result};
use std::collections::HashMap;

/// Maps host-specific key tokens to canonical ones.
pub trait KeyTranslator {
    fn translate(&self, key: &str) -> String;
}

/// Name of the identity layout.
pub const DEFAULT_LAYOUT: &str = "en-US (QWERTY)";

/// Returns the names of all built-in layouts.
pub fn builtin_layouts() -> &'static [&'static str] {
    &[DEFAULT_LAYOUT, "de-DE (QWERTZ)", "fr-FR (AZERTY)"]
}

/// A table-driven translator; unmapped keys pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardLayout {
    name: String,
    table: HashMap<String, String>,
}

impl KeyboardLayout {
    /// Returns a built-in layout by name.
    ///
    /// # Example
    ///
    /// ```
    /// use modalkeys::input::layout::{KeyboardLayout, KeyTranslator};
    ///
    /// let layout = KeyboardLayout::builtin("de-DE (QWERTZ)").unwrap();
    /// assert_eq!(layout.translate("y"), "z");
    /// ```
    pub fn builtin(name: &str) -> Option<Self> {
        let swaps: &[(char, char)] = match name {
            DEFAULT_LAYOUT => &[],
            "de-DE (QWERTZ)" => &[('y', 'z')],
            "fr-FR (AZERTY)" => &[('a', 'q'), ('w', 'z')],
            _ => return None,
        };

        let mut table = HashMap::new();
        for &(a, b) in swaps {
            for (from, to) in [(a, b), (b, a)] {
                table.insert(from.to_string(), to.to_string());
                table.insert(
                    from.to_ascii_uppercase().to_string(),
                    to.to_ascii_uppercase().to_string(),
                );
            }
        }

        Some(Self {
            name: name.to_string(),
            table,
        })
    }

    /// Builds the layout named in the config, with its remaps applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured layout is not a built-in one.
    pub fn from_config(config: &Config) -> Result<Self> {
        let Some(mut layout) = Self::builtin(&config.keyboard_layout) else {
            bail!(
                "Unknown keyboard layout '{}' (available: {})",
                config.keyboard_layout,
                builtin_layouts().join(", ")
            );
        };

        for (from, to) in &config.key_remap {
            layout.table.insert(from.clone(), to.clone());
        }

        Ok(layout)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl KeyTranslator for KeyboardLayout {
    fn translate(&self, key: &str) -> String {
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
