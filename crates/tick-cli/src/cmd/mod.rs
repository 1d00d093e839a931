//! Command handlers, one module per `tk` subcommand.

pub mod add;
pub mod clear;
pub mod completions;
pub mod done;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod remind;
pub mod rm;
pub mod show;
pub mod stats;
pub mod subtask;
pub mod template;
pub mod undo;

use crate::kv::JsonFileStore;
use crate::output::{CliError, OutputMode, render_error};
use crate::project;
use crate::sinks::{TermAudio, TermNotifier};
use std::path::Path;
use tick_core::config::TickConfig;
use tick_core::effect::Effect;
use tick_core::model::{SubtaskId, TaskId};
use tick_core::store::TaskStore;

/// Locate the project, load config, and open the task store.
///
/// Renders a structured error (and fails) outside a tick project or when the
/// persisted data cannot be loaded.
pub(crate) fn open_store(
    output: OutputMode,
    root: &Path,
) -> anyhow::Result<(TaskStore<JsonFileStore>, TickConfig)> {
    let Some(tick_dir) = project::find_tick_dir(root) else {
        let msg = "not a tick project: .tick directory not found";
        render_error(
            output,
            &CliError::with_details(msg, "Run 'tk init' to create a tick project", "not_a_project"),
        )?;
        anyhow::bail!("{msg}");
    };

    let config = TickConfig::load(&project::config_path(&tick_dir))?;

    match TaskStore::load_with_max_depth(JsonFileStore::new(tick_dir), config.history.max_depth) {
        Ok(store) => Ok((store, config)),
        Err(e) => {
            render_error(output, &CliError::from(&e))?;
            anyhow::bail!("{e}");
        }
    }
}

/// Parse a task id argument.
pub(crate) fn parse_task_id(raw: &str) -> anyhow::Result<TaskId> {
    raw.parse::<TaskId>()
        .map_err(|_| anyhow::anyhow!("invalid task id '{raw}' (ids are integers, see `tk list`)"))
}

/// Parse a subtask id argument.
pub(crate) fn parse_subtask_id(raw: &str) -> anyhow::Result<SubtaskId> {
    raw.parse::<SubtaskId>().map_err(|_| {
        anyhow::anyhow!("invalid subtask id '{raw}' (ids are integers, see `tk show`)")
    })
}

/// Execute operation effects through the terminal sinks.
pub(crate) fn run_effects_to_term(effects: &[Effect], quiet: bool, sound: bool) {
    if quiet || effects.is_empty() {
        return;
    }
    let mut notifier = TermNotifier;
    let mut audio = TermAudio::new(sound);
    tick_core::effect::run_effects(effects, &mut notifier, &mut audio);
}
