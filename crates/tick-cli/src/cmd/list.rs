//! `tk list` — the filtered, sorted projection.

use crate::output::{OutputMode, render};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::model::{Category, Priority, Task, TaskId};
use tick_core::view::{Criteria, SortKey, StatusFilter, project};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive text search over task and subtask text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by category: personal, work, shopping, health, study.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Filter by priority: high, medium, low.
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Filter by status: all, active, completed.
    #[arg(long)]
    pub status: Option<String>,

    /// Sort key: created, due, priority, category.
    #[arg(long)]
    pub sort: Option<String>,
}

impl ListArgs {
    fn criteria(&self) -> anyhow::Result<Criteria> {
        Ok(Criteria {
            search: self.search.clone().unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .map(str::parse::<Category>)
                .transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?,
            status: self
                .status
                .as_deref()
                .map(str::parse::<StatusFilter>)
                .transpose()?
                .unwrap_or_default(),
            sort: self
                .sort
                .as_deref()
                .map(str::parse::<SortKey>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
struct TaskRow {
    id: TaskId,
    text: String,
    completed: bool,
    category: Category,
    priority: Priority,
    due: Option<DateTime<Utc>>,
    progress: u8,
    tags: Vec<String>,
    subtasks: usize,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
            category: task.category,
            priority: task.priority,
            due: task.due,
            progress: task.progress,
            tags: task.tags.iter().cloned().collect(),
            subtasks: task.subtasks.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ListOutput {
    total: usize,
    tasks: Vec<TaskRow>,
}

pub fn run_list(args: &ListArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (store, _config) = super::open_store(output, root)?;
    let criteria = args.criteria()?;
    let visible = project(store.tasks(), &criteria);

    let payload = ListOutput {
        total: visible.len(),
        tasks: visible.iter().map(TaskRow::from).collect(),
    };
    render(output, &payload, |p, w| {
        if p.tasks.is_empty() {
            return writeln!(w, "no tasks match");
        }
        for row in &p.tasks {
            let mark = if row.completed { "[x]" } else { "[ ]" };
            let due = row
                .due
                .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
            write!(
                w,
                "{mark} {:<14} {:<7} {:<9} {:<11} {}",
                row.id,
                row.priority.as_str(),
                row.category.as_str(),
                due,
                row.text
            )?;
            if !row.tags.is_empty() {
                write!(w, "  #{}", row.tags.join(" #"))?;
            }
            if row.subtasks > 0 {
                write!(w, "  ({}%)", row.progress)?;
            }
            writeln!(w)?;
        }
        writeln!(w, "{} task(s)", p.total)
    })
}
