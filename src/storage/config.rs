//! Configuration handling for Opsdesk
//!
//! Two layers: `.opsdesk/config.toml` in the project carries team and
//! scoring settings, `~/.config/opsdesk/config.toml` carries per-user
//! defaults. A missing file means defaults; a file that fails to parse
//! is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ScoringWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Team name stamped on daily summaries
    pub team_name: String,

    /// Maximum entries in the digest "next up" section
    pub digest_next_up: usize,

    /// Prioritizer scoring weights
    pub scoring: ScoringWeights,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            team_name: "Network Operations".to_string(),
            digest_next_up: 3,
            scoring: ScoringWeights::default(),
        }
    }
}

impl ProjectConfig {
    /// Loads the configuration of the project rooted at `project_root`
    pub fn load(project_root: &Path) -> Result<Self> {
        read_or_default(&project_root.join(".opsdesk").join("config.toml"))
    }
}

/// Per-user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Output format used when `--format` is not given
    pub default_format: DefaultFormat,
}

impl GlobalConfig {
    /// Loads the user configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match global_config_dir() {
            Some(dir) => read_or_default(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }
}

/// Output format carried in the user configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DefaultFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration of a project
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
}

impl Config {
    /// Loads both configuration layers for a project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        Ok(Self {
            project: ProjectConfig::load(project_root)?,
            global: GlobalConfig::load()?,
        })
    }

    /// Walks up from the working directory to the nearest `.opsdesk/`
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(".opsdesk").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "opsdesk", "opsdesk").map(|dirs| dirs.config_dir().to_path_buf())
}

fn read_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    toml::from_str(&content)
        .map_err(|e| ConfigError::Parse(e.to_string()))
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}
