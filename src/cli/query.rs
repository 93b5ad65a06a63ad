//! Status overview command

use anyhow::Result;

use super::output::Output;
use crate::storage::Project;

/// Show task counts overview
pub fn status(output: &Output) -> Result<()> {
    let project = Project::open_current()?;
    let store = project.task_store()?;

    let counts = store.status_counts()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "tasks": {
                "total": counts.total(),
                "open": counts.open,
                "in_progress": counts.in_progress,
                "blocked": counts.blocked,
                "done": counts.done,
            },
        }));
    } else {
        println!("Project Status");
        println!("{}", "=".repeat(40));
        println!();
        println!("Tasks: {} total", counts.total());
        println!("  [ ] Open:        {}", counts.open);
        println!("  [~] In Progress: {}", counts.in_progress);
        println!("  [!] Blocked:     {}", counts.blocked);
        println!("  [x] Done:        {}", counts.done);
    }

    Ok(())
}
