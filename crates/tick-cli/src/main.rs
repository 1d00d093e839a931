#![forbid(unsafe_code)]

mod cmd;
mod kv;
mod output;
mod project;
mod sinks;
mod when;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tick: a local-first task list with undo/redo",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress notifications and audio cues.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Initialize a tick project",
        long_about = "Initialize a tick project (.tick directory) in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize a project here\n    tk init"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Add a task",
        long_about = "Add a task with optional category, priority, due date, tags, and notes.",
        after_help = "EXAMPLES:\n    # Quick add\n    tk add \"Buy milk\"\n\n    # With metadata\n    tk add \"Ship release\" -c work -p high -d 2024-03-01 -t launch\n\n    # Machine-readable output\n    tk add \"Buy milk\" --json"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Read",
        about = "List tasks",
        long_about = "List tasks through the view pipeline: search, filters, then a stable sort.",
        after_help = "EXAMPLES:\n    # Everything, newest first\n    tk list\n\n    # Open work items by priority\n    tk list -c work --status active --sort priority\n\n    # Search task and subtask text\n    tk list -s milk"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one task",
        long_about = "Show full details for a single task, including subtasks and reminder.",
        after_help = "EXAMPLES:\n    tk show 1700000000000\n    tk show 1700000000000 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Toggle a task's completion",
        after_help = "EXAMPLES:\n    # Complete (or reopen) a task\n    tk done 1700000000000"
    )]
    Done(cmd::done::DoneArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Edit a task",
        long_about = "Patch task fields; unset flags leave fields untouched.",
        after_help = "EXAMPLES:\n    # Reword and bump priority\n    tk edit 1700000000000 --text \"Buy oat milk\" -p high\n\n    # Set a reminder 30 minutes before the due date\n    tk edit 1700000000000 --remind due-30m\n\n    # Drop the due date\n    tk edit 1700000000000 --clear-due"
    )]
    Edit(cmd::edit::EditArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Delete a task",
        after_help = "EXAMPLES:\n    tk rm 1700000000000"
    )]
    Rm(cmd::rm::RmArgs),

    #[command(
        next_help_heading = "Subtasks",
        about = "Manage subtasks",
        after_help = "EXAMPLES:\n    # Add a subtask\n    tk sub add 1700000000000 \"buy stamps\"\n\n    # Toggle one (progress is recomputed)\n    tk sub toggle 1700000000000 1700000000001"
    )]
    Sub {
        #[command(subcommand)]
        command: cmd::subtask::SubCommand,
    },

    #[command(
        next_help_heading = "History",
        about = "Undo the last action",
        after_help = "EXAMPLES:\n    tk undo"
    )]
    Undo(cmd::undo::UndoArgs),

    #[command(
        next_help_heading = "History",
        about = "Redo the last undone action",
        after_help = "EXAMPLES:\n    tk redo"
    )]
    Redo(cmd::undo::RedoArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Delete all tasks",
        long_about = "Delete every task as a single undoable action.",
        after_help = "EXAMPLES:\n    tk clear && tk undo   # and they're back"
    )]
    Clear(cmd::clear::ClearArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Export tasks to a backup document",
        after_help = "EXAMPLES:\n    # To stdout\n    tk export\n\n    # Into a directory with a generated filename\n    tk export --output backups/"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Import tasks from a backup document",
        long_about = "Replace the collection from an export file. Invalid payloads change \
                      nothing; a successful import is one undoable action.",
        after_help = "EXAMPLES:\n    tk import tasks-backup-2024-03-01-0930.json"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show collection statistics",
        after_help = "EXAMPLES:\n    tk stats\n    tk stats --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Lifecycle",
        about = "Apply quick templates",
        after_help = "EXAMPLES:\n    tk template list\n    tk template apply daily-routine"
    )]
    Template {
        #[command(subcommand)]
        command: cmd::template::TemplateCommand,
    },

    #[command(
        next_help_heading = "Reminders",
        about = "Deliver due reminders",
        long_about = "Scan for due reminders and deliver them. One pass by default; --watch \
                      keeps scanning at a fixed interval.",
        after_help = "EXAMPLES:\n    # One pass (cron-friendly)\n    tk remind\n\n    # Keep watching every minute\n    tk remind --watch"
    )]
    Remind(cmd::remind::RemindArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    tk completions bash\n    tk completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TICK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "tick=debug,info"
        } else {
            "tick=info,warn"
        })
    });

    let format = env::var("TICK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let root = std::env::current_dir()?;
    let output = cli.output_mode();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &root),
        Commands::Add(ref args) => cmd::add::run_add(args, output, &root),
        Commands::List(ref args) => cmd::list::run_list(args, output, &root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &root),
        Commands::Done(ref args) => cmd::done::run_done(args, output, quiet, &root),
        Commands::Edit(ref args) => cmd::edit::run_edit(args, output, &root),
        Commands::Rm(ref args) => cmd::rm::run_rm(args, output, &root),
        Commands::Sub { ref command } => cmd::subtask::run_sub(command, output, quiet, &root),
        Commands::Undo(ref args) => cmd::undo::run_undo(args, output, &root),
        Commands::Redo(ref args) => cmd::undo::run_redo(args, output, &root),
        Commands::Clear(ref args) => cmd::clear::run_clear(args, output, &root),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &root),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &root),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &root),
        Commands::Template { ref command } => cmd::template::run_template(command, output, &root),
        Commands::Remind(ref args) => cmd::remind::run_remind(args, output, quiet, &root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
