//! Configuration system for docquill.
//!
//! Settings are read from a TOML file; every field has a default, so a
//! partial file (or none at all) is valid.
//!
//! # Example
//!
//! ```
//! use docquill::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.indent_size, 2);
//! assert!(config.lenient_json);
//!
//! let custom = Config {
//!     indent_size: 4,
//!     ..Config::default()
//! };
//! assert_eq!(custom.indent_size, 4);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for docquill.
///
/// # Fields
///
/// * `indent_size` - Spaces per nesting level in pretty output (default: 2)
/// * `lenient_json` - Accept unquoted keys and single-quoted strings (default: true)
/// * `create_backup` - Create .bak files before saving (default: false)
/// * `trailing_newline` - End saved files with a newline (default: true)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Accept relaxed JSON when loading
    #[serde(default = "default_lenient_json")]
    pub lenient_json: bool,

    /// Create .bak files before saving
    #[serde(default)]
    pub create_backup: bool,

    /// End saved files with a newline
    #[serde(default = "default_trailing_newline")]
    pub trailing_newline: bool,
}

fn default_indent_size() -> usize {
    2
}

fn default_lenient_json() -> bool {
    true
}

fn default_trailing_newline() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            lenient_json: default_lenient_json(),
            create_backup: false,
            trailing_newline: default_trailing_newline(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/docquill/config.toml` on all platforms.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("docquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded config");
                    config
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&config_path)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &std::path::Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}
