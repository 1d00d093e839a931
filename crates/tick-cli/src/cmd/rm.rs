//! `tk rm` — delete a task (subtasks go with it).

use crate::output::{OutputMode, render, render_success};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::model::TaskId;
use tick_core::ops;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Task id (see `tk list`).
    pub id: String,
}

#[derive(Debug, Serialize)]
struct RmOutput {
    id: TaskId,
    text: String,
}

pub fn run_rm(args: &RmArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;
    let id = super::parse_task_id(&args.id)?;

    let removed = store.tasks().iter().find(|t| t.id == id).cloned();
    let outcome = ops::delete_task(store.tasks(), id);
    let (Some((_label, _)), Some(removed)) = (store.apply(outcome), removed) else {
        return render_success(output, "no matching task; nothing changed");
    };

    let payload = RmOutput {
        id: removed.id,
        text: removed.text,
    };
    render(output, &payload, |p, w| {
        writeln!(w, "✓ deleted: {} (undo with `tk undo`)", p.text)
    })
}
