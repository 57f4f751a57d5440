//! Configuration management for foodboard.
//!
//! Configuration is read from `~/.config/foodboard/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::http::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where the food API lives and how long to wait for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it when missing.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`.
    ///
    /// A missing file is created with the commented defaults. Missing fields
    /// in an existing file fall back to their default values.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/foodboard/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("foodboard").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, Self::default_config_content()).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn default_config_content() -> &'static str {
        r##"# foodboard configuration

[api]
# Base URL of the REST backend serving /foods
base_url = "http://localhost:3333"

# Seconds to wait for a response before giving up
timeout_secs = 10

[colors]
# Named colors (Red, DarkGray, LightCyan, ...) or hex ("#RRGGBB", "#RGB")
border = "DarkGray"
selection_bg = "Red"
selection_fg = "White"
available = "Green"
unavailable = "DarkGray"
price = "Yellow"
modal_border = "Red"
focused_field = "Yellow"
error = "LightRed"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
# Single characters ("a"), special keys ("Enter", "PageDown", "F5")
# or modifier combos ("Ctrl+c", "Shift+Tab")
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["n", "PageDown"]
prev_page = ["p", "PageUp"]
add_food = ["a"]
edit_food = ["e", "Enter"]
delete_food = ["d", "Delete"]
toggle_available = ["t"]
open_image = ["o"]
reload = ["R"]
"##
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
