//! `tk show` — full details for one task.

use crate::output::{CliError, OutputMode, render, render_error};
use clap::Args;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Task id (see `tk list`).
    pub id: String,
}

pub fn run_show(args: &ShowArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (store, _config) = super::open_store(output, root)?;
    let id = super::parse_task_id(&args.id)?;

    let Some(task) = store.tasks().iter().find(|t| t.id == id) else {
        let msg = format!("no task with id {id}");
        render_error(output, &CliError::with_details(&msg, "", "not_found"))?;
        anyhow::bail!("{msg}");
    };

    render(output, task, |t, w| {
        writeln!(w, "{:<12} {}", "id:", t.id)?;
        writeln!(w, "{:<12} {}", "text:", t.text)?;
        writeln!(
            w,
            "{:<12} {}",
            "status:",
            if t.completed { "completed" } else { "active" }
        )?;
        writeln!(w, "{:<12} {}", "category:", t.category)?;
        writeln!(w, "{:<12} {}", "priority:", t.priority)?;
        writeln!(w, "{:<12} {}", "created:", t.created_at.to_rfc3339())?;
        if let Some(due) = t.due {
            writeln!(w, "{:<12} {}", "due:", due.to_rfc3339())?;
        }
        if let Some(reminder) = t.reminder {
            writeln!(
                w,
                "{:<12} {}{}",
                "reminder:",
                reminder.at.to_rfc3339(),
                if reminder.notified { " (delivered)" } else { "" }
            )?;
        }
        if !t.tags.is_empty() {
            let tags: Vec<&str> = t.tags.iter().map(String::as_str).collect();
            writeln!(w, "{:<12} {}", "tags:", tags.join(", "))?;
        }
        if !t.notes.is_empty() {
            writeln!(w, "{:<12} {}", "notes:", t.notes)?;
        }
        if !t.subtasks.is_empty() {
            writeln!(w, "{:<12} {}%", "progress:", t.progress)?;
            for sub in &t.subtasks {
                let mark = if sub.completed { "[x]" } else { "[ ]" };
                writeln!(w, "  {mark} {} {}", sub.id, sub.text)?;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::ShowArgs;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: ShowArgs,
    }

    #[test]
    fn show_args_take_an_id() {
        let w = Wrapper::parse_from(["tk", "1700000000000"]);
        assert_eq!(w.args.id, "1700000000000");
    }
}
