//! Shared markdown rendering helpers

use chrono::{DateTime, Utc};

/// Formats a timestamp in the standard output format
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Formats items as markdown bullets
pub fn bullet_list(items: &[impl AsRef<str>]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats items as a numbered list
pub fn numbered_list(items: &[impl AsRef<str>]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats items as unchecked markdown checkboxes
pub fn checkbox_list(items: &[impl AsRef<str>]) -> String {
    items
        .iter()
        .map(|item| format!("- [ ] {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
