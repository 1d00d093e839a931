//! `tk import` — replace the collection from an export file.
//!
//! The replace is committed through history, so one `tk undo` restores the
//! pre-import collection. A payload that fails validation changes nothing.

use crate::output::{CliError, OutputMode, render, render_error};
use anyhow::Context as _;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tick_core::backup;
use tick_core::ops::{ActionLabel, Applied, Outcome};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path of a tick export file.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportOutput {
    imported: usize,
    replaced: usize,
}

pub fn run_import(args: &ImportArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (mut store, _config) = super::open_store(output, root)?;

    let payload = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let tasks = match backup::import_str(&payload) {
        Ok(tasks) => tasks,
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    };

    let replaced = store.tasks().len();
    let imported = tasks.len();
    let _ = store.apply(Outcome::Changed(Applied {
        tasks,
        label: ActionLabel::Import,
        effects: Vec::new(),
    }));

    let result = ImportOutput { imported, replaced };
    render(output, &result, |p, w| {
        writeln!(
            w,
            "✓ imported {} task(s), replacing {} (undo with `tk undo`)",
            p.imported, p.replaced
        )
    })
}

#[cfg(test)]
mod tests {
    use super::ImportArgs;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ImportArgs,
    }

    #[test]
    fn import_args_take_a_path() {
        let w = Wrapper::parse_from(["tk", "backup.json"]);
        assert_eq!(w.args.file, PathBuf::from("backup.json"));
    }
}
