//! The periodic reminder scan.
//!
//! Driven by the presentation layer's [`Scheduler`](crate::effect::Scheduler)
//! at a fixed interval. A scan marks every due, undelivered reminder as
//! notified and asks the caller to surface a notification and audio cue for
//! each. It touches nothing else, and a reminder that has fired once never
//! fires again. Fired reminders are persisted but bypass history: undoing a
//! notification makes no sense.

use crate::effect::{Cue, Effect};
use crate::model::Task;
use chrono::{DateTime, Utc};

/// Outcome of one scan pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// The collection with fired reminders marked notified. Identical to the
    /// input when `fired == 0`.
    pub tasks: Vec<Task>,
    /// Number of reminders delivered by this pass.
    pub fired: usize,
    pub effects: Vec<Effect>,
}

/// Scan `tasks` for reminders due at `now`.
#[must_use]
pub fn scan(tasks: &[Task], now: DateTime<Utc>) -> ScanResult {
    let mut fired = 0;
    let mut effects = Vec::new();
    let next = tasks
        .iter()
        .map(|task| {
            let Some(reminder) = &task.reminder else {
                return task.clone();
            };
            if !reminder.is_due(now) {
                return task.clone();
            }

            fired += 1;
            effects.push(Effect::warning(format!("Reminder: {}", task.text)));
            effects.push(Effect::Sound { cue: Cue::Reminder });

            let mut notified = task.clone();
            if let Some(r) = &mut notified.reminder {
                r.notified = true;
            }
            notified
        })
        .collect();

    ScanResult {
        tasks: next,
        fired,
        effects,
    }
}
