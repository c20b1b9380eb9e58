use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a content workspace.
///
/// This struct holds settings that control how pages are organised on disk
/// and which levels are accepted when creating content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The levels that content may be created under (e.g. `2A`, `3A`).
    ///
    /// If this is empty, all levels are allowed.
    allowed_levels: Vec<String>,

    /// The number of digits in set directory names.
    ///
    /// Set numbers are padded to this width with leading zeros.
    /// For example, '001' (3 digits) or '0001' (4 digits).
    set_digits: usize,

    /// Whether to tolerate JSON files in the tree whose paths do not parse
    /// as page locators.
    pub allow_unrecognised: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_levels: Vec::new(),
            set_digits: default_set_digits(),
            allow_unrecognised: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the number of digits for padding set numbers.
    #[must_use]
    pub const fn set_digits(&self) -> usize {
        self.set_digits
    }

    /// Returns the allowed levels, if configured.
    #[must_use]
    pub fn allowed_levels(&self) -> &[String] {
        &self.allowed_levels
    }

    /// Checks if a level is allowed by the configuration.
    ///
    /// If `allowed_levels` is empty, all levels are allowed.
    /// Otherwise, the level must be in the allowed list.
    #[must_use]
    pub fn is_level_allowed(&self, level: &str) -> bool {
        self.allowed_levels.is_empty() || self.allowed_levels.iter().any(|l| l == level)
    }

    /// Adds a level to the allowed levels list.
    ///
    /// Levels are normalized to uppercase before adding.
    ///
    /// Returns `true` if the level was added, `false` if it already existed.
    pub fn add_level(&mut self, level: &str) -> bool {
        let level = level.to_uppercase();
        if self.allowed_levels.contains(&level) {
            false
        } else {
            self.allowed_levels.push(level);
            true
        }
    }

    /// Removes a level from the allowed levels list.
    ///
    /// Returns `true` if the level was removed, `false` if it didn't exist.
    pub fn remove_level(&mut self, level: &str) -> bool {
        let level = level.to_uppercase();
        if let Some(pos) = self.allowed_levels.iter().position(|l| l == &level) {
            self.allowed_levels.remove(pos);
            true
        } else {
            false
        }
    }
}

const fn default_set_digits() -> usize {
    3
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        allowed_levels: Vec<String>,

        #[serde(default = "default_set_digits")]
        set_digits: usize,

        #[serde(default)]
        allow_unrecognised: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                allowed_levels,
                set_digits,
                allow_unrecognised,
            } => Self {
                allowed_levels,
                set_digits,
                allow_unrecognised,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            allowed_levels: config.allowed_levels,
            set_digits: config.set_digits,
            allow_unrecognised: config.allow_unrecognised,
        }
    }
}
