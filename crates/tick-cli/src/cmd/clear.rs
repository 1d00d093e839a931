//! `tk clear` — delete every task (one undoable action).

use crate::output::{OutputMode, render, render_success};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use tick_core::ops;

#[derive(Args, Debug, Default)]
pub struct ClearArgs {}

#[derive(Debug, Serialize)]
struct ClearOutput {
    cleared: usize,
}

pub fn run_clear(_args: &ClearArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;
    let count = store.tasks().len();

    let outcome = ops::clear_all(store.tasks());
    if store.apply(outcome).is_none() {
        return render_success(output, "no tasks to clear");
    }

    let payload = ClearOutput { cleared: count };
    render(output, &payload, |p, w| {
        writeln!(w, "✓ cleared {} task(s) (undo with `tk undo`)", p.cleared)
    })
}
