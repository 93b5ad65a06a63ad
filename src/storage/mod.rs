//! # Storage Layer
//!
//! Persistence layer for Opsdesk.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | SQLite (WAL mode) | `.opsdesk/tasks.db` |
//! | Config | TOML | `.opsdesk/config.toml` |
//!
//! ## Project Structure
//!
//! ```text
//! .opsdesk/
//! ├── tasks.db              # SQLite task store
//! ├── config.toml           # Project configuration
//! └── .gitignore            # Ignores the database files
//! ```
//!
//! ## Key Types
//!
//! - [`Project`] - Entry point for accessing an Opsdesk project
//! - [`TaskStore`] - Read/write tasks in SQLite
//! - [`Config`] - Project and global configuration

mod db;
mod config;
mod project;

pub use db::{StoreError, TaskStore};
pub use config::{Config, ConfigError, DefaultFormat, GlobalConfig, ProjectConfig};
pub use project::{Project, ProjectError};
