//! `tk remind` — deliver due reminders, once or on a watch loop.
//!
//! A single pass scans for due, undelivered reminders, marks them notified
//! (bypassing history), and surfaces the notification/audio effects. Watch
//! mode registers the same pass with the thread scheduler at the configured
//! interval and parks the main thread until the process is interrupted.

use crate::kv::JsonFileStore;
use crate::output::{OutputMode, render};
use crate::sinks::{SystemClock, ThreadScheduler};
use clap::Args;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tick_core::effect::{Clock as _, Scheduler as _};
use tick_core::reminder;
use tick_core::store::TaskStore;

#[derive(Args, Debug, Default)]
pub struct RemindArgs {
    /// Keep scanning at a fixed interval instead of exiting after one pass.
    #[arg(long)]
    pub watch: bool,

    /// Seconds between watch-mode scans (default from config).
    #[arg(long, requires = "watch")]
    pub interval: Option<u64>,
}

#[derive(Debug, Serialize)]
struct RemindOutput {
    fired: usize,
}

/// One scan pass: deliver due reminders and persist the notified flags.
fn scan_once(store: &mut TaskStore<JsonFileStore>, quiet: bool, sound: bool) -> usize {
    let result = reminder::scan(store.tasks(), SystemClock.now());
    if result.fired > 0 {
        store.replace_unrecorded(result.tasks);
        super::run_effects_to_term(&result.effects, quiet, sound);
    }
    result.fired
}

pub fn run_remind(
    args: &RemindArgs,
    output: OutputMode,
    quiet: bool,
    root: &Path,
) -> anyhow::Result<()> {
    let (mut store, config) = super::open_store(output, root)?;
    let sound = config.reminders.sound;

    if !args.watch {
        let fired = scan_once(&mut store, quiet, sound);
        let payload = RemindOutput { fired };
        return render(output, &payload, |p, w| {
            if p.fired == 0 {
                writeln!(w, "no reminders due")
            } else {
                writeln!(w, "⏰ delivered {} reminder(s)", p.fired)
            }
        });
    }

    let interval = args.interval.unwrap_or(config.reminders.interval_secs);
    eprintln!("watching reminders every {interval}s (ctrl-c to stop)");

    let mut scheduler = ThreadScheduler;
    let _guard = scheduler.every(
        Duration::from_secs(interval),
        Box::new(move || {
            let _ = scan_once(&mut store, quiet, sound);
        }),
    );

    // The scheduler thread owns the store; this thread just keeps the guard
    // alive until the user interrupts the process.
    loop {
        std::thread::park();
    }
}
