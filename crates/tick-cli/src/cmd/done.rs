//! `tk done` — toggle a task's completion flag.

use crate::output::{OutputMode, render, render_success};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::model::TaskId;
use tick_core::ops;

#[derive(Args, Debug)]
pub struct DoneArgs {
    /// Task id (see `tk list`).
    pub id: String,
}

#[derive(Debug, Serialize)]
struct DoneOutput {
    id: TaskId,
    text: String,
    completed: bool,
}

pub fn run_done(
    args: &DoneArgs,
    output: OutputMode,
    quiet: bool,
    root: &Path,
) -> anyhow::Result<()> {
    let (mut store, config) = super::open_store(output, root)?;
    let id = super::parse_task_id(&args.id)?;

    let outcome = ops::toggle_complete(store.tasks(), id);
    let Some((_label, effects)) = store.apply(outcome) else {
        return render_success(output, "no matching task; nothing changed");
    };
    super::run_effects_to_term(&effects, quiet, config.reminders.sound);

    let Some(task) = store.tasks().iter().find(|t| t.id == id) else {
        anyhow::bail!("task {id} vanished after toggle");
    };
    let payload = DoneOutput {
        id: task.id,
        text: task.text.clone(),
        completed: task.completed,
    };
    render(output, &payload, |p, w| {
        if p.completed {
            writeln!(w, "✓ completed: {}", p.text)
        } else {
            writeln!(w, "↻ reopened: {}", p.text)
        }
    })
}
