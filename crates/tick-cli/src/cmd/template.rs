//! `tk template` — list and apply the built-in quick templates.

use crate::output::{CliError, OutputMode, render, render_error};
use crate::sinks::SystemClock;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::Path;
use tick_core::effect::Clock as _;
use tick_core::template::{apply_template, builtin, find};

#[derive(Subcommand, Debug)]
pub enum TemplateCommand {
    /// List the built-in templates.
    List,
    /// Append a template's tasks as one undoable action.
    Apply(TemplateApplyArgs),
}

#[derive(Args, Debug)]
pub struct TemplateApplyArgs {
    /// Template name (see `tk template list`).
    pub name: String,
}

#[derive(Debug, Serialize)]
struct TemplateRow {
    name: &'static str,
    description: &'static str,
    tasks: usize,
}

#[derive(Debug, Serialize)]
struct ApplyOutput {
    template: String,
    added: usize,
}

pub fn run_template(
    command: &TemplateCommand,
    output: OutputMode,
    root: &Path,
) -> anyhow::Result<()> {
    match command {
        TemplateCommand::List => run_template_list(output),
        TemplateCommand::Apply(args) => run_template_apply(args, output, root),
    }
}

fn run_template_list(output: OutputMode) -> anyhow::Result<()> {
    let rows: Vec<TemplateRow> = builtin()
        .iter()
        .map(|t| TemplateRow {
            name: t.name,
            description: t.description,
            tasks: t.drafts().len(),
        })
        .collect();
    render(output, &rows, |rows, w| {
        for row in rows {
            writeln!(
                w,
                "{:<14} {:<28} {} task(s)",
                row.name, row.description, row.tasks
            )?;
        }
        Ok(())
    })
}

fn run_template_apply(
    args: &TemplateApplyArgs,
    output: OutputMode,
    root: &Path,
) -> anyhow::Result<()> {
    let Some(template) = find(&args.name) else {
        let known: Vec<&str> = builtin().iter().map(|t| t.name).collect();
        let msg = format!("unknown template '{}'", args.name);
        render_error(
            output,
            &CliError::with_details(
                &msg,
                format!("Known templates: {}", known.join(", ")),
                "unknown_template",
            ),
        )?;
        anyhow::bail!("{msg}");
    };

    let (mut store, _config) = super::open_store(output, root)?;
    let added = template.drafts().len();
    let outcome = apply_template(store.tasks(), template, SystemClock.now());
    let _ = store.apply(outcome);

    let payload = ApplyOutput {
        template: template.name.to_string(),
        added,
    };
    render(output, &payload, |p, w| {
        writeln!(w, "✓ added {} task(s) from '{}'", p.added, p.template)
    })
}
