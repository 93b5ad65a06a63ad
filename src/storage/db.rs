//! SQLite task store
//!
//! Tasks live in `.opsdesk/tasks.db`. The store opens in WAL mode for
//! concurrent access and versions its schema through `PRAGMA user_version`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

use crate::domain::{StatusCounts, Task, TaskId, TaskStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Store for task records in SQLite
pub struct TaskStore {
    conn: Connection,
}

/// Raw column values of one task row, converted after the query completes
struct TaskRow {
    id: String,
    title: String,
    status: String,
    priority: Option<String>,
    due: Option<String>,
    created_at: String,
    updated_at: String,
    completed_at: Option<String>,
    description: Option<String>,
    skill: Option<String>,
    input_payload: Option<String>,
    output_payload: Option<String>,
}

impl TaskStore {
    /// Schema version - bump when schema changes to force rebuild
    const SCHEMA_VERSION: i32 = 1;

    /// Opens (or creates) the store at the given database path
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open task store: {}", db_path.display()))?;

        // WAL mode for better concurrent access
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let store = Self { conn };
        store.ensure_schema()?;

        Ok(store)
    }

    /// Opens an in-memory store (tests)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&self) -> Result<()> {
        let current_version = self.schema_version()?;

        if current_version != Self::SCHEMA_VERSION {
            self.create_schema()?;
        }

        Ok(())
    }

    fn schema_version(&self) -> Result<i32> {
        let result: Option<i32> = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .optional()?;

        Ok(result.unwrap_or(0))
    }

    fn create_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            DROP TABLE IF EXISTS tasks;

            CREATE TABLE tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                status TEXT NOT NULL,
                priority TEXT,
                due TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                completed_at TEXT,
                description TEXT,
                skill TEXT,
                input_payload TEXT,
                output_payload TEXT
            );

            CREATE INDEX idx_tasks_status ON tasks(status);
            CREATE INDEX idx_tasks_created ON tasks(created_at);
            ",
        )?;

        self.conn.execute(
            &format!("PRAGMA user_version = {}", Self::SCHEMA_VERSION),
            [],
        )?;

        Ok(())
    }

    /// Inserts a new task
    pub fn insert(&self, task: &Task) -> Result<()> {
        let (input_json, output_json) = payload_columns(task)?;

        self.conn
            .execute(
                "INSERT INTO tasks (id, title, status, priority, due, created_at, updated_at,
                                    completed_at, description, skill, input_payload, output_payload)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    task.id.to_string(),
                    task.title,
                    task.status.as_str(),
                    task.priority.map(|p| p.as_str()),
                    task.due.map(|d| d.to_rfc3339()),
                    task.created_at.to_rfc3339(),
                    task.updated_at.to_rfc3339(),
                    task.completed_at.map(|c| c.to_rfc3339()),
                    task.description,
                    task.skill.map(|s| s.as_str()),
                    input_json,
                    output_json,
                ],
            )
            .context("Failed to insert task")?;

        Ok(())
    }

    /// Fetches a task by ID
    pub fn get(&self, id: &TaskId) -> Result<Option<Task>> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_TASKS),
                params![id.to_string()],
                read_row,
            )
            .optional()
            .context("Failed to query task")?;

        row.map(task_from_row).transpose()
    }

    /// Lists all tasks, most recently created first
    pub fn list(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY created_at DESC, id", SELECT_TASKS))?;

        let rows = stmt
            .query_map([], read_row)
            .context("Failed to list tasks")?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(task_from_row(row?)?);
        }

        Ok(tasks)
    }

    /// Writes an updated task back. Returns false when the id is unknown.
    pub fn update(&self, task: &Task) -> Result<bool> {
        let (input_json, output_json) = payload_columns(task)?;

        let changed = self
            .conn
            .execute(
                "UPDATE tasks SET title = ?2, status = ?3, priority = ?4, due = ?5,
                                  created_at = ?6, updated_at = ?7, completed_at = ?8,
                                  description = ?9, skill = ?10, input_payload = ?11,
                                  output_payload = ?12
                 WHERE id = ?1",
                params![
                    task.id.to_string(),
                    task.title,
                    task.status.as_str(),
                    task.priority.map(|p| p.as_str()),
                    task.due.map(|d| d.to_rfc3339()),
                    task.created_at.to_rfc3339(),
                    task.updated_at.to_rfc3339(),
                    task.completed_at.map(|c| c.to_rfc3339()),
                    task.description,
                    task.skill.map(|s| s.as_str()),
                    input_json,
                    output_json,
                ],
            )
            .context("Failed to update task")?;

        Ok(changed > 0)
    }

    /// Deletes a task by ID. Returns false when the id is unknown.
    pub fn remove(&self, id: &TaskId) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])
            .context("Failed to delete task")?;

        Ok(changed > 0)
    }

    /// Task counts by status
    pub fn status_counts(&self) -> Result<StatusCounts> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, COUNT(*) FROM tasks GROUP BY status")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        })?;

        let mut counts = StatusCounts::default();
        for row in rows {
            let (status, count) = row?;
            let count = count as usize;
            match status.parse::<TaskStatus>()? {
                TaskStatus::Open => counts.open = count,
                TaskStatus::InProgress => counts.in_progress = count,
                TaskStatus::Blocked => counts.blocked = count,
                TaskStatus::Done => counts.done = count,
            }
        }

        Ok(counts)
    }
}

const SELECT_TASKS: &str = "SELECT id, title, status, priority, due, created_at, updated_at,
                                   completed_at, description, skill, input_payload, output_payload
                            FROM tasks";

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok(TaskRow {
        id: row.get(0)?,
        title: row.get(1)?,
        status: row.get(2)?,
        priority: row.get(3)?,
        due: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
        completed_at: row.get(7)?,
        description: row.get(8)?,
        skill: row.get(9)?,
        input_payload: row.get(10)?,
        output_payload: row.get(11)?,
    })
}

fn payload_columns(task: &Task) -> Result<(Option<String>, Option<String>)> {
    let input = task
        .input_payload
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("Failed to serialize input payload")?;

    let output = task
        .output_payload
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .context("Failed to serialize output payload")?;

    Ok((input, output))
}

fn task_from_row(row: TaskRow) -> Result<Task> {
    Ok(Task {
        id: row
            .id
            .parse()
            .with_context(|| format!("Corrupt task id in store: {}", row.id))?,
        title: row.title,
        status: row
            .status
            .parse()
            .with_context(|| format!("Corrupt status in store: {}", row.status))?,
        priority: row
            .priority
            .map(|p| p.parse())
            .transpose()
            .context("Corrupt priority in store")?,
        due: row.due.map(|d| parse_timestamp(&d)).transpose()?,
        created_at: parse_timestamp(&row.created_at)?,
        updated_at: parse_timestamp(&row.updated_at)?,
        completed_at: row
            .completed_at
            .map(|c| parse_timestamp(&c))
            .transpose()?,
        description: row.description,
        skill: row
            .skill
            .map(|s| s.parse())
            .transpose()
            .context("Corrupt skill kind in store")?,
        input_payload: row
            .input_payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .context("Corrupt input payload in store")?,
        output_payload: row
            .output_payload
            .map(|p| serde_json::from_str(&p))
            .transpose()
            .context("Corrupt output payload in store")?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("Corrupt timestamp in store: {}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SkillKind, TaskPriority};
    use tempfile::TempDir;

    fn make_task(title: &str) -> Task {
        let id = TaskId::new(title, Utc::now());
        Task::new(id, title)
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let store = TaskStore::in_memory().unwrap();

        let mut task = make_task("Renew certs");
        task.set_priority(Some(TaskPriority::High));
        task.set_description("Wildcard expires soon");
        task.set_skill(
            SkillKind::Fcr,
            Some(serde_json::json!({"purpose": "Renew certificate"})),
        );

        store.insert(&task).unwrap();

        let loaded = store.get(&task.id).unwrap().unwrap();
        assert_eq!(loaded.title, task.title);
        assert_eq!(loaded.priority, Some(TaskPriority::High));
        assert_eq!(loaded.skill, Some(SkillKind::Fcr));
        assert_eq!(loaded.input_payload, task.input_payload);
    }

    #[test]
    fn get_unknown_id_is_none() {
        let store = TaskStore::in_memory().unwrap();
        let id = TaskId::new("nothing", Utc::now());

        assert!(store.get(&id).unwrap().is_none());
    }

    #[test]
    fn list_is_newest_first() {
        let store = TaskStore::in_memory().unwrap();

        let older = make_task("Older");
        std::thread::sleep(std::time::Duration::from_millis(10));
        let newer = make_task("Newer");

        store.insert(&older).unwrap();
        store.insert(&newer).unwrap();

        let tasks = store.list().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Newer");
        assert_eq!(tasks[1].title, "Older");
    }

    #[test]
    fn update_persists_changes() {
        let store = TaskStore::in_memory().unwrap();

        let mut task = make_task("Check BGP");
        store.insert(&task).unwrap();

        task.start();
        assert!(store.update(&task).unwrap());

        let loaded = store.get(&task.id).unwrap().unwrap();
        assert_eq!(loaded.status, TaskStatus::InProgress);
    }

    #[test]
    fn update_unknown_task_returns_false() {
        let store = TaskStore::in_memory().unwrap();
        let task = make_task("Ghost");

        assert!(!store.update(&task).unwrap());
    }

    #[test]
    fn remove_task() {
        let store = TaskStore::in_memory().unwrap();

        let task = make_task("Throwaway");
        store.insert(&task).unwrap();

        assert!(store.remove(&task.id).unwrap());
        assert!(store.get(&task.id).unwrap().is_none());
        assert!(!store.remove(&task.id).unwrap());
    }

    #[test]
    fn status_counts_group_correctly() {
        let store = TaskStore::in_memory().unwrap();

        let mut a = make_task("a");
        let mut b = make_task("b");
        let c = make_task("c");

        a.start();
        b.complete();

        store.insert(&a).unwrap();
        store.insert(&b).unwrap();
        store.insert(&c).unwrap();

        let counts = store.status_counts().unwrap();
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.done, 1);
        assert_eq!(counts.open, 1);
        assert_eq!(counts.blocked, 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn reopening_a_store_keeps_data() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("tasks.db");

        let task = make_task("Persistent");
        {
            let store = TaskStore::open(&db_path).unwrap();
            store.insert(&task).unwrap();
        }

        let store = TaskStore::open(&db_path).unwrap();
        let loaded = store.get(&task.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Persistent");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("dir").join("tasks.db");

        let store = TaskStore::open(&db_path).unwrap();
        store.insert(&make_task("Nested")).unwrap();

        assert!(db_path.exists());
    }
}
