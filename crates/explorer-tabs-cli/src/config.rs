use anyhow::{Context, Result};
use explorer_tabs_core::TabConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file for the `explorer-tabs` binary.
///
/// The `[tabs]` table is handed to the tab container unchanged; the rest
/// only affects how the binary drives it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tabs: TabConfig,
    pub strip: StripConfig,
}

/// Simulated tab strip used for `drag` script lines and icon waits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripConfig {
    /// Width of one tab in pixels.
    pub tab_width: i32,
    pub tab_height: i32,
    /// How long to wait for outstanding icon lookups after each line.
    pub icon_wait_ms: u64,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            tab_width: 120,
            tab_height: 28,
            icon_wait_ms: 250,
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from the default location when
    /// `None`. A missing file is created with the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            let config = Self::default();
            config.save(&config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to find config directory")?;

        Ok(config_dir.join("explorer-tabs").join("config.toml"))
    }
}
