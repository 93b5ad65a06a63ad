//! Domain models for Opsdesk
//!
//! Task records, snapshots, and the ranking/digest logic. Nothing in
//! this module performs I/O.

mod id;
mod task;
mod summary;
mod prioritizer;
mod digest;

pub use id::{IdError, TaskId};
pub use task::{SkillKind, Task, TaskPriority, TaskStatus, UnknownSkill};
pub use summary::{summaries_from_payload, validate, InvalidInput, TaskSummary};
pub(crate) use summary::parse_due;
pub use prioritizer::{rank, RankedTask, ScoringWeights};
pub use digest::{digest, DigestEntry, StatusCounts, StatusDigest};
