//! `tk stats` — collection reporting dashboard.

use crate::output::{OutputMode, render};
use clap::Args;
use std::path::Path;
use tick_core::stats::stats;

#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

pub fn run_stats(_args: &StatsArgs, output: OutputMode, root: &Path) -> anyhow::Result<()> {
    let (store, _config) = super::open_store(output, root)?;
    let payload = stats(store.tasks());

    render(output, &payload, |p, w| {
        writeln!(w, "{:<22} {}", "total:", p.total)?;
        writeln!(w, "{:<22} {}", "completed:", p.completed)?;
        writeln!(w, "{:<22} {}", "pending:", p.pending)?;
        writeln!(w, "{:<22} {}%", "completion rate:", p.completion_rate)?;
        writeln!(w, "{:<22} {}", "high priority open:", p.high_priority_pending)?;
        writeln!(w, "by category")?;
        writeln!(w, "{:-<34}", "")?;
        for entry in &p.by_category {
            writeln!(
                w,
                "  {:<10} {:>3}/{:<3}",
                entry.category.as_str(),
                entry.completed,
                entry.count
            )?;
        }
        Ok(())
    })
}
