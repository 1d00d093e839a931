//! `tk sub` — add and toggle subtasks under a parent task.

use crate::output::{OutputMode, render, render_success};
use crate::sinks::SystemClock;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;
use tick_core::effect::Clock as _;
use tick_core::model::{SubtaskId, TaskId};
use tick_core::ops;

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Add a subtask to a task.
    Add(SubAddArgs),
    /// Toggle a subtask's completion flag.
    Toggle(SubToggleArgs),
}

#[derive(Args, Debug)]
pub struct SubAddArgs {
    /// Parent task id (see `tk list`).
    pub task: String,
    /// Subtask text.
    pub text: String,
}

#[derive(Args, Debug)]
pub struct SubToggleArgs {
    /// Parent task id (see `tk list`).
    pub task: String,
    /// Subtask id (see `tk show`).
    pub subtask: String,
}

#[derive(Debug, Serialize)]
struct SubAddOutput {
    task_id: TaskId,
    subtask_id: SubtaskId,
    text: String,
    progress: u8,
}

#[derive(Debug, Serialize)]
struct SubToggleOutput {
    task_id: TaskId,
    subtask_id: SubtaskId,
    completed: bool,
    progress: u8,
}

pub fn run_sub(
    command: &SubCommand,
    output: OutputMode,
    quiet: bool,
    root: &Path,
) -> anyhow::Result<()> {
    match command {
        SubCommand::Add(args) => run_sub_add(args, output, root),
        SubCommand::Toggle(args) => run_sub_toggle(args, output, quiet, root),
    }
}

fn run_sub_add(args: &SubAddArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;
    let task_id = super::parse_task_id(&args.task)?;

    let outcome = ops::add_subtask(store.tasks(), task_id, &args.text, SystemClock.now());
    if store.apply(outcome).is_none() {
        return render_success(output, "no matching task or blank subtask; nothing changed");
    }

    let Some((parent, subtask)) = store
        .tasks()
        .iter()
        .find(|t| t.id == task_id)
        .and_then(|t| t.subtasks.last().map(|s| (t, s)))
    else {
        anyhow::bail!("subtask vanished after add");
    };
    let payload = SubAddOutput {
        task_id: parent.id,
        subtask_id: subtask.id,
        text: subtask.text.clone(),
        progress: parent.progress,
    };
    render(output, &payload, |p, w| {
        writeln!(w, "✓ added subtask: {} (id {})", p.text, p.subtask_id)
    })
}

fn run_sub_toggle(
    args: &SubToggleArgs,
    output: OutputMode,
    quiet: bool,
    root: &Path,
) -> anyhow::Result<()> {
    let (mut store, config) = super::open_store(output, root)?;
    let task_id = super::parse_task_id(&args.task)?;
    let subtask_id = super::parse_subtask_id(&args.subtask)?;

    let outcome = ops::toggle_subtask(store.tasks(), task_id, subtask_id);
    let Some((_label, effects)) = store.apply(outcome) else {
        return render_success(output, "no matching task or subtask; nothing changed");
    };
    super::run_effects_to_term(&effects, quiet, config.reminders.sound);

    let Some((parent, subtask)) = store
        .tasks()
        .iter()
        .find(|t| t.id == task_id)
        .and_then(|t| t.subtask(subtask_id).map(|s| (t, s)))
    else {
        anyhow::bail!("subtask vanished after toggle");
    };
    let payload = SubToggleOutput {
        task_id: parent.id,
        subtask_id: subtask.id,
        completed: subtask.completed,
        progress: parent.progress,
    };
    render(output, &payload, |p, w| {
        let state = if p.completed { "done" } else { "open" };
        writeln!(w, "✓ subtask {} is {state}; progress {}%", p.subtask_id, p.progress)
    })
}
