//! Project management
//!
//! Handles project initialization and provides access to the task store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, TaskStore};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in an opsdesk project. Run 'opsdesk init' first.")]
    NotInProject,
}

/// An Opsdesk project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(".opsdesk");

        if !data_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let data_dir = root.join(".opsdesk");

        fs::create_dir_all(&data_dir).with_context(|| {
            format!(
                "Failed to create .opsdesk directory: {}",
                data_dir.display()
            )
        })?;

        // Create default config
        let config_path = data_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Opsdesk configuration

# Team name stamped on daily summaries
team_name = "Network Operations"

# Maximum entries in the digest "next up" section
digest_next_up = 3

# Prioritizer scoring weights; higher weight ranks earlier
[scoring]
critical = 3
high = 2
medium = 1
low = 0
blocked = 2
in_progress = 1
open = 0
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        // Create .gitignore for .opsdesk
        let gitignore_path = data_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore the local task database
tasks.db
tasks.db-wal
tasks.db-shm
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .opsdesk directory path
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(".opsdesk")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the task database path
    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("tasks.db")
    }

    /// Opens the task store for this project
    pub fn task_store(&self) -> Result<TaskStore> {
        TaskStore::open(&self.db_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        assert!(project.data_dir().is_dir());
        assert!(project.data_dir().join("config.toml").is_file());
        assert!(project.data_dir().join(".gitignore").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Project::init(dir.path()).unwrap();
        Project::init(dir.path()).unwrap(); // Should not fail

        assert!(dir.path().join(".opsdesk").is_dir());
    }

    #[test]
    fn init_default_config_parses() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let config = project.config();
        assert_eq!(config.project.team_name, "Network Operations");
        assert_eq!(config.project.scoring.critical, 3);
    }

    #[test]
    fn open_existing_project() {
        let dir = TempDir::new().unwrap();
        Project::init(dir.path()).unwrap();

        let project = Project::open(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path());
    }

    #[test]
    fn open_non_project_fails() {
        let dir = TempDir::new().unwrap();
        let result = Project::open(dir.path());

        assert!(result.is_err());
    }

    #[test]
    fn store_is_accessible() {
        let dir = TempDir::new().unwrap();
        let project = Project::init(dir.path()).unwrap();

        let store = project.task_store().unwrap();
        assert_eq!(store.status_counts().unwrap().total(), 0);
        assert!(project.db_path().exists());
    }
}
