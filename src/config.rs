//! Configuration for favreel
//!
//! Read from `config.toml` in the platform config directory. Every field has
//! a default, so a missing or partial file is fine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "favorites.db";

/// Built-in TUI color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TuiTheme {
    #[default]
    CatppuccinMocha,
    CatppuccinLatte,
    Dracula,
    Nord,
    Gruvbox,
    /// Loaded from `custom-theme.json` next to the config file
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub theme: TuiTheme,
    /// Terminal columns per cover card; the grid fits as many as the width allows
    pub cover_width: u16,
    /// How long notices stay on screen
    pub notice_seconds: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: TuiTheme::default(),
            cover_width: 28,
            notice_seconds: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Where the TUI writes its log files
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavreelConfig {
    /// Favorites per page
    pub page_size: u32,
    /// Database file; defaults to the platform data directory
    pub database: Option<PathBuf>,
    pub tui: TuiConfig,
    pub log: LogConfig,
}

impl Default for FavreelConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            database: None,
            tui: TuiConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "favreel").context("Could not determine home directory")
}

impl FavreelConfig {
    pub fn config_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().to_path_buf())
    }

    pub fn data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(DATABASE_FILE)),
        }
    }

    pub fn log_directory(&self) -> Result<PathBuf> {
        match &self.log.directory {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::data_dir()?.join("logs")),
        }
    }
}
