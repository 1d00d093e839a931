//! `tk undo` / `tk redo` — move through the snapshot history.

use crate::output::{OutputMode, render};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::ops::ActionLabel;

#[derive(Args, Debug, Default)]
pub struct UndoArgs {}

#[derive(Args, Debug, Default)]
pub struct RedoArgs {}

#[derive(Debug, Serialize)]
struct UndoOutput {
    undone: Option<ActionLabel>,
    remaining: usize,
}

#[derive(Debug, Serialize)]
struct RedoOutput {
    redone: Option<ActionLabel>,
    remaining: usize,
}

pub fn run_undo(_args: &UndoArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;
    let undone = store.undo();
    let payload = UndoOutput {
        undone,
        remaining: store.history().undo_depth(),
    };
    render(output, &payload, |p, w| match p.undone {
        Some(label) => writeln!(w, "↺ undid {label}"),
        None => writeln!(w, "nothing to undo"),
    })
}

pub fn run_redo(_args: &RedoArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;
    let redone = store.redo();
    let payload = RedoOutput {
        redone,
        remaining: store.history().redo_depth(),
    };
    render(output, &payload, |p, w| match p.redone {
        Some(label) => writeln!(w, "↻ redid {label}"),
        None => writeln!(w, "nothing to redo"),
    })
}
