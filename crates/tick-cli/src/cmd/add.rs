//! `tk add` — create a task.

use crate::output::{OutputMode, render, render_success};
use crate::sinks::SystemClock;
use crate::when::parse_due;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::effect::Clock as _;
use tick_core::model::{Category, Priority, TaskDraft, TaskId};
use tick_core::ops;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Task text.
    pub text: String,

    /// Category: personal, work, shopping, health, study.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Priority: high, medium, low.
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Due date (YYYY-MM-DD or RFC 3339).
    #[arg(short, long)]
    pub due: Option<String>,

    /// Free-form tag; repeat for multiple.
    #[arg(short, long)]
    pub tag: Vec<String>,

    /// Additional notes.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct AddOutput {
    id: TaskId,
    text: String,
    category: Category,
    priority: Priority,
    due: Option<DateTime<Utc>>,
}

pub fn run_add(args: &AddArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;

    let category = args
        .category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?
        .unwrap_or_default();
    let priority = args
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()?
        .unwrap_or_default();
    let due = args.due.as_deref().map(parse_due).transpose()?;

    let draft = TaskDraft {
        text: args.text.clone(),
        category,
        priority,
        due,
        tags: args.tag.iter().map(|t| t.trim().to_string()).collect(),
        notes: args.notes.clone().unwrap_or_default(),
    };

    let outcome = ops::add_task(store.tasks(), draft, SystemClock.now());
    if store.apply(outcome).is_none() {
        return render_success(output, "nothing to add: task text is empty");
    }

    let Some(task) = store.tasks().last().cloned() else {
        anyhow::bail!("task collection empty right after a successful add");
    };
    let payload = AddOutput {
        id: task.id,
        text: task.text,
        category: task.category,
        priority: task.priority,
        due: task.due,
    };
    render(output, &payload, |p, w| {
        writeln!(w, "✓ added: {} (id {})", p.text, p.id)
    })
}
