//! Task identifiers
//!
//! IDs take the form `t-{7-char-hash}` (e.g., `t-9d3e5f2`), the hash
//! derived from title plus creation timestamp. Adding the same title at
//! two different times yields two distinct ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID format: expected 't-{{7-char-hash}}', got '{0}'")]
    InvalidTaskId(String),
}

/// Task ID in the format `t-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId {
    hash: String,
}

impl TaskId {
    /// Creates a new task ID from title and creation timestamp
    pub fn new(title: &str, timestamp: DateTime<Utc>) -> Self {
        let input = format!("{}{}", title, timestamp.timestamp_nanos_opt().unwrap_or(0));
        Self::from_seed(&input)
    }

    /// Derives an ID from an arbitrary seed string.
    ///
    /// Used for skill payload entries that arrive without an explicit id,
    /// so identical payloads always map to identical ids.
    pub fn derived(seed: &str) -> Self {
        Self::from_seed(seed)
    }

    fn from_seed(seed: &str) -> Self {
        let hash = blake3::hash(seed.as_bytes());
        let hex = hash.to_hex();
        Self {
            hash: hex[..7].to_string(),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t-{}", self.hash)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let hash = s
            .strip_prefix("t-")
            .ok_or_else(|| IdError::InvalidTaskId(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidTaskId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl TryFrom<String> for TaskId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.to_string()
    }
}
