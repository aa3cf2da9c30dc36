// SPDX-License-Identifier: MPL-2.0
//! Application settings read from a `settings.toml` file.
//!
//! Settings are read-only at runtime; `save_to_path` exists to write fixtures.
//!
//! # Configuration Sections
//!
//! - `[general]` - Theme mode
//! - `[gallery]` - Filter combination mode, card layout, data file override
//! - `[embed]` - Embedded post provider, appearance and polling
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `PROMPT_GALLERY_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::gallery::FilterMode;
use crate::embed::{EmbedAlign, EmbedOptions, EmbedTheme};
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning message shown when an existing settings file cannot be parsed.
pub const CONFIG_LOAD_WARNING: &str = "設定ファイルを読み込めませんでした。既定値を使用します";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Gallery grid and filter settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Whether category and tag filters combine or replace each other.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "filter_mode_serde"
    )]
    pub filter_mode: Option<FilterMode>,

    /// Prompt characters shown on a card before truncation.
    #[serde(
        default = "default_card_prompt_chars",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_prompt_chars: Option<usize>,

    /// Number of grid columns.
    #[serde(default = "default_columns", skip_serializing_if = "Option::is_none")]
    pub columns: Option<u16>,

    /// Optional JSON catalog replacing the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            filter_mode: Some(FilterMode::default()),
            card_prompt_chars: default_card_prompt_chars(),
            columns: default_columns(),
            data_path: None,
        }
    }
}

impl GalleryConfig {
    /// Card truncation length, clamped to the supported range.
    #[must_use]
    pub fn card_prompt_chars(&self) -> usize {
        self.card_prompt_chars
            .unwrap_or(DEFAULT_CARD_PROMPT_CHARS)
            .clamp(MIN_CARD_PROMPT_CHARS, MAX_CARD_PROMPT_CHARS)
    }

    /// Grid column count, clamped to the supported range.
    #[must_use]
    pub fn columns(&self) -> u16 {
        self.columns
            .unwrap_or(DEFAULT_GRID_COLUMNS)
            .clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS)
    }

    #[must_use]
    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode.unwrap_or_default()
    }
}

/// Embedded post settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedConfig {
    /// oEmbed endpoint used to build embeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Visual theme requested from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<EmbedTheme>,

    /// Alignment requested from the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<EmbedAlign>,

    /// Ask the provider not to track the viewer.
    #[serde(default = "default_dnt", skip_serializing_if = "Option::is_none")]
    pub dnt: Option<bool>,

    /// Delay between readiness checks, in milliseconds.
    #[serde(
        default = "default_poll_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub poll_interval_ms: Option<u64>,

    /// Give up waiting for the embed library after this many seconds.
    /// Unset or `0` means wait for as long as the modal stays open.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_secs: Option<u64>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            endpoint: Some(DEFAULT_EMBED_ENDPOINT.to_string()),
            theme: Some(EmbedTheme::default()),
            align: Some(EmbedAlign::default()),
            dnt: default_dnt(),
            poll_interval_ms: default_poll_interval_ms(),
            max_wait_secs: None,
        }
    }
}

impl EmbedConfig {
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_EMBED_ENDPOINT)
    }

    /// Readiness poll interval, clamped to the supported range.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        let ms = self
            .poll_interval_ms
            .unwrap_or(DEFAULT_EMBED_POLL_INTERVAL_MS)
            .clamp(MIN_EMBED_POLL_INTERVAL_MS, MAX_EMBED_POLL_INTERVAL_MS);
        Duration::from_millis(ms)
    }

    /// Wait budget for the embed library. `0` counts as unset.
    #[must_use]
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Options passed to every embed creation call.
    #[must_use]
    pub fn options(&self) -> EmbedOptions {
        EmbedOptions {
            theme: self.theme.unwrap_or_default(),
            align: self.align.unwrap_or_default(),
            dnt: self.dnt.unwrap_or(true),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub embed: EmbedConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_card_prompt_chars() -> Option<usize> {
    Some(DEFAULT_CARD_PROMPT_CHARS)
}

fn default_columns() -> Option<u16> {
    Some(DEFAULT_GRID_COLUMNS)
}

fn default_dnt() -> Option<bool> {
    Some(true)
}

fn default_poll_interval_ms() -> Option<u64> {
    Some(DEFAULT_EMBED_POLL_INTERVAL_MS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

mod filter_mode_serde {
    use crate::domain::gallery::FilterMode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        mode: &Option<FilterMode>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match mode {
            Some(mode) => serializer.serialize_str(&mode.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<FilterMode>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| raw.parse().map_err(serde::de::Error::custom))
            .transpose()
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("failed to load {}: {}", path.display(), err);
                    return (Config::default(), Some(CONFIG_LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
