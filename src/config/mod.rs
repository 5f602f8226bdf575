// SPDX-License-Identifier: MPL-2.0
//! Player configuration: host props, sources and timing.
//!
//! This module handles the player view's configuration, including loading
//! and saving it to a `settings.toml` file. Every field has a default, so a
//! partial file (or none at all) is valid.
//!
//! # Examples
//!
//! ```no_run
//! use player_controls::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.can_seek_unwatch = false;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

mod defaults;
mod timing;

pub use defaults::*;
pub use timing::{FadeDuration, HideDelay};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PlayerControls";

/// Labels shown for sources that do not carry their own, by position.
pub const QUALITY_LABELS: [&str; 4] = ["Smooth", "SD", "HD", "Ultra HD"];

/// One selectable stream of the same video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub url: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl VideoSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: None,
        }
    }

    /// Label to display for this source when it sits at `index`.
    #[must_use]
    pub fn display_label(&self, index: usize) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => QUALITY_LABELS
                .get(index)
                .map_or_else(|| format!("Source {}", index + 1), |l| (*l).to_string()),
        }
    }
}

/// Host-facing props of the player view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start playing as soon as the source is loaded.
    pub autoplay: bool,
    /// When false the overlay and its visibility machine are inert.
    pub controls: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub muted: bool,
    /// When false, forward seeking is limited to what has been watched.
    pub can_seek_unwatch: bool,
    /// Hides the fullscreen toggle; leaving fullscreen also pops navigation.
    pub is_training_mode: bool,
    pub video_title: Option<String>,
    /// Single source. Takes precedence over `sources` and disables the menu.
    pub src: Option<String>,
    pub hide_delay_ms: Option<u64>,
    pub fade_ms: Option<u64>,
    /// Selectable streams, in menu order.
    pub sources: Vec<VideoSource>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autoplay: false,
            controls: true,
            looping: false,
            muted: false,
            can_seek_unwatch: true,
            is_training_mode: false,
            video_title: None,
            src: None,
            hide_delay_ms: Some(DEFAULT_HIDE_DELAY_MS),
            fade_ms: Some(DEFAULT_FADE_MS),
            sources: Vec::new(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn hide_delay(&self) -> HideDelay {
        self.hide_delay_ms.map(HideDelay::new).unwrap_or_default()
    }

    #[must_use]
    pub fn fade(&self) -> FadeDuration {
        self.fade_ms.map(FadeDuration::new).unwrap_or_default()
    }

    /// True when the source menu should be offered.
    #[must_use]
    pub fn has_source_choice(&self) -> bool {
        self.src.is_none() && self.sources.len() > 1
    }

    /// URL to play for the given source index.
    #[must_use]
    pub fn source_url(&self, index: usize) -> Option<&str> {
        match &self.src {
            Some(src) => Some(src.as_str()),
            None => self.sources.get(index).map(|s| s.url.as_str()),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the default configuration file.
///
/// A missing file or one that does not parse yields the defaults.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return match load_from_path(&path) {
                Err(Error::ConfigParse(err)) => {
                    tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
                    Ok(Config::default())
                }
                result => result,
            };
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a configuration file.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
