//! `tk completions` — generate shell completion scripts.

use clap::Args;
use clap_complete::Shell;
use std::io;

#[derive(Args, Debug, PartialEq, Eq)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run_completions(shell: Shell, command: &mut clap::Command) -> anyhow::Result<()> {
    clap_complete::generate(shell, command, "tk", &mut io::stdout());
    Ok(())
}
