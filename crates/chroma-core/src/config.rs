//! Configuration
//!
//! Loaded from `<config_dir>/chroma/config.toml`; every field has a
//! default so a partial (or missing) file is fine.

use std::path::PathBuf;
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

pub const RECENT_COLORS_KEY: &str = "havdm-recent-colors";
pub const COLOR_PALETTES_KEY: &str = "havdm-color-palettes";
pub const GRADIENT_PRESETS_KEY: &str = "havdm-gradient-presets";

pub const DEFAULT_MAX_RECENT_COLORS: usize = 10;
pub const DEFAULT_MAX_PALETTE_COLORS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromaConfig {
    pub log_level: LogLevel,
    pub storage: StorageConfig,
    pub recent_colors: RecentColorsConfig,
    pub palettes: PaletteConfig,
    pub presets: PresetConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the file-backed store, platform data dir when unset
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentColorsConfig {
    pub storage_key: String,
    pub max_colors: usize,
}

impl Default for RecentColorsConfig {
    fn default() -> Self {
        Self {
            storage_key: RECENT_COLORS_KEY.to_string(),
            max_colors: DEFAULT_MAX_RECENT_COLORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub storage_key: String,
    pub max_colors: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            storage_key: COLOR_PALETTES_KEY.to_string(),
            max_colors: DEFAULT_MAX_PALETTE_COLORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    pub storage_key: String,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            storage_key: GRADIENT_PRESETS_KEY.to_string(),
        }
    }
}

impl ChromaConfig {
    /// Load from the config file, or defaults if there is none
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Directory used by the file-backed store
    pub fn storage_directory(&self) -> PathBuf {
        self.storage.directory.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chroma")
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chroma")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChromaConfig::default();
        assert_eq!(config.recent_colors.max_colors, 10);
        assert_eq!(config.palettes.max_colors, 20);
        assert_eq!(config.presets.storage_key, "havdm-gradient-presets");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_toml() {
        let config = ChromaConfig::from_toml_str(
            r#"
            log_level = "debug"

            [recent_colors]
            max_colors = 5

            [storage]
            directory = "/tmp/chroma-test"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.recent_colors.max_colors, 5);
        assert_eq!(config.recent_colors.storage_key, RECENT_COLORS_KEY);
        assert_eq!(config.palettes, PaletteConfig::default());
        assert_eq!(config.storage_directory(), PathBuf::from("/tmp/chroma-test"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ChromaConfig::default();
        config.palettes.max_colors = 12;
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(ChromaConfig::from_toml_str(&text).unwrap(), config);
    }
}
