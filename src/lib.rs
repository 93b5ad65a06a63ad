//! Opsdesk - A local-first task tracker with network operations skills
//!
//! Opsdesk keeps a small SQLite-backed task list and ships a set of
//! text-generation "skills" (incident updates, runbooks, FCR content,
//! task prioritization, daily digests) that turn minimal typed input
//! into ready-to-send markdown.

pub mod domain;
pub mod skills;
pub mod storage;
pub mod cli;

pub use domain::{InvalidInput, Task, TaskId, TaskPriority, TaskStatus, TaskSummary};
