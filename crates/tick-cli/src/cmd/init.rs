//! `tk init` — create the `.tick` project directory.

use crate::output::{OutputMode, render_success};
use crate::project;
use clap::Args;
use std::path::Path;
use tick_core::config::TickConfig;

#[derive(Args, Debug, Default)]
pub struct InitArgs {}

pub fn run_init(_args: &InitArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (tick_dir, created) = project::init_dir(root)?;

    let config_path = project::config_path(&tick_dir);
    if !config_path.exists() {
        std::fs::write(&config_path, TickConfig::starter_toml())?;
    }

    if created {
        render_success(output, "initialized tick project in .tick")
    } else {
        render_success(output, "tick project already initialized")
    }
}
