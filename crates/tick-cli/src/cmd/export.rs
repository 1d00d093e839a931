//! `tk export` — write the collection as a versioned backup document.

use crate::output::{OutputMode, render_success};
use crate::sinks::SystemClock;
use anyhow::Context as _;
use clap::Args;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tick_core::backup;
use tick_core::effect::Clock as _;

#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Output path (defaults to stdout). A directory gets a generated
    /// `tasks-backup-<date>.json` filename inside it.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

pub fn run_export(args: &ExportArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (store, _config) = super::open_store(output, root)?;
    let now = SystemClock.now();
    let document = backup::export_string(store.tasks(), now)?;

    match args.output.as_ref() {
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "{document}")?;
            Ok(())
        }
        Some(path) => {
            let path = if path.is_dir() {
                path.join(backup::default_filename(now))
            } else {
                path.clone()
            };
            std::fs::write(&path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            render_success(
                output,
                &format!("exported {} task(s) to {}", store.tasks().len(), path.display()),
            )
        }
    }
}
