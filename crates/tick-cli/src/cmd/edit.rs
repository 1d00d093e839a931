//! `tk edit` — patch a task's fields, including its reminder.

use crate::output::{OutputMode, render, render_success};
use crate::sinks::SystemClock;
use crate::when::{parse_due, parse_remind_spec, resolve_remind};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::effect::Clock as _;
use tick_core::model::{Category, Priority, TaskId, TaskPatch};
use tick_core::ops;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Task id (see `tk list`).
    pub id: String,

    /// Replacement text.
    #[arg(long)]
    pub text: Option<String>,

    /// Category: personal, work, shopping, health, study.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Priority: high, medium, low.
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Due date (YYYY-MM-DD or RFC 3339).
    #[arg(short, long, conflicts_with = "clear_due")]
    pub due: Option<String>,

    /// Remove the due date.
    #[arg(long)]
    pub clear_due: bool,

    /// Reminder: 30m/2h/1d (from now), due, due-15m, or RFC 3339.
    #[arg(short, long, conflicts_with = "clear_remind")]
    pub remind: Option<String>,

    /// Remove the reminder.
    #[arg(long)]
    pub clear_remind: bool,

    /// Replace all tags; repeat for multiple.
    #[arg(short, long, conflicts_with = "clear_tags")]
    pub tag: Vec<String>,

    /// Remove all tags.
    #[arg(long)]
    pub clear_tags: bool,

    /// Replace the notes.
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct EditOutput {
    id: TaskId,
    text: String,
}

pub fn run_edit(args: &EditArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;
    let id = super::parse_task_id(&args.id)?;

    // The reminder spec may be due-relative, so resolve it against the
    // current task before building the patch.
    let Some(current) = store.tasks().iter().find(|t| t.id == id).cloned() else {
        return render_success(output, "no matching task; nothing changed");
    };

    let due = if args.clear_due {
        Some(None)
    } else {
        args.due
            .as_deref()
            .map(parse_due)
            .transpose()?
            .map(Some)
    };
    let effective_due = due.map_or(current.due, |d| d);

    let reminder = if args.clear_remind {
        Some(None)
    } else if let Some(raw) = args.remind.as_deref() {
        let spec = parse_remind_spec(raw)?;
        Some(Some(resolve_remind(spec, SystemClock.now(), effective_due)?))
    } else {
        None
    };

    let tags = if args.clear_tags {
        Some(std::collections::BTreeSet::new())
    } else if args.tag.is_empty() {
        None
    } else {
        Some(args.tag.iter().map(|t| t.trim().to_string()).collect())
    };

    let patch = TaskPatch {
        text: args.text.clone(),
        category: args
            .category
            .as_deref()
            .map(str::parse::<Category>)
            .transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?,
        due,
        reminder,
        notes: args.notes.clone(),
        tags,
        subtasks: None,
    };

    let outcome = ops::update_task(store.tasks(), id, &patch);
    if store.apply(outcome).is_none() {
        return render_success(output, "nothing to change");
    }

    let Some(task) = store.tasks().iter().find(|t| t.id == id) else {
        anyhow::bail!("task {id} vanished after update");
    };
    let payload = EditOutput {
        id: task.id,
        text: task.text.clone(),
    };
    render(output, &payload, |p, w| {
        writeln!(w, "✓ updated: {} (id {})", p.text, p.id)
    })
}
