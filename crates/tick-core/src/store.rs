//! The task store: single owner of the live collection.
//!
//! Wraps a [`KeyValueStore`] and the [`History`] manager. All mutations enter
//! through [`TaskStore::apply`] (operation outcomes), [`TaskStore::undo`] /
//! [`TaskStore::redo`], or [`TaskStore::replace_unrecorded`] (reminder scans,
//! which bypass history). Every successful mutation persists best-effort: a
//! failed write is logged and the in-memory state stays authoritative.
//!
//! Persisted layout: one entry under [`TASKS_KEY`] holding a versioned
//! envelope `{version, tasks}`, and one under [`HISTORY_KEY`] holding the
//! undo/redo stacks so sessions can undo what earlier sessions did. A bare
//! task array (the pre-envelope layout) is migrated on load; a task envelope
//! from a newer version is refused. History is expendable: unreadable history
//! data degrades to empty stacks with a warning rather than failing the load.

use crate::effect::{Effect, KeyValueStore};
use crate::history::{History, HistoryData};
use crate::model::Task;
use crate::ops::{ActionLabel, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed storage key for the collection.
pub const TASKS_KEY: &str = "tasks";

/// Fixed storage key for the undo/redo stacks.
pub const HISTORY_KEY: &str = "history";

/// Highest envelope version this build can read.
pub const ENVELOPE_VERSION: u32 = 1;

const fn envelope_version_default() -> u32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    #[serde(default = "envelope_version_default")]
    version: u32,
    tasks: Vec<Task>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryEnvelope {
    #[serde(default = "envelope_version_default")]
    version: u32,
    #[serde(flatten)]
    data: HistoryData,
}

/// Live collection + history, persisted through a key-value collaborator.
#[derive(Debug)]
pub struct TaskStore<S> {
    kv: S,
    tasks: Vec<Task>,
    history: History,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Load the collection and history from `kv`, with unbounded history.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Storage`] when the read fails or the stored tasks are
    /// corrupt; [`crate::Error::UnsupportedVersion`] when they were written
    /// by a newer tick.
    pub fn load(kv: S) -> Result<Self, crate::Error> {
        Self::load_with_max_depth(kv, 0)
    }

    /// Load with a capped undo depth (0 = unbounded).
    ///
    /// # Errors
    ///
    /// Same as [`TaskStore::load`].
    pub fn load_with_max_depth(kv: S, max_depth: usize) -> Result<Self, crate::Error> {
        let tasks = match kv.get(TASKS_KEY).map_err(crate::Error::Storage)? {
            None => Vec::new(),
            Some(raw) => decode_tasks(&raw)?,
        };
        let history = match kv.get(HISTORY_KEY) {
            Ok(None) => History::with_max_depth(max_depth),
            Ok(Some(raw)) => History::from_data(decode_history(&raw), max_depth),
            Err(e) => {
                warn!("failed to read history, starting with empty stacks: {e}");
                History::with_max_depth(max_depth)
            }
        };
        debug!(
            count = tasks.len(),
            undo_depth = history.undo_depth(),
            "loaded task collection"
        );
        Ok(Self { kv, tasks, history })
    }

    /// The live collection.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Read-only view of the history stacks.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Commit an operation outcome: record history, swap the live collection,
    /// persist, and hand back the label and effects to execute.
    ///
    /// A [`Outcome::Noop`] leaves everything untouched and returns `None`.
    pub fn apply(&mut self, outcome: Outcome) -> Option<(ActionLabel, Vec<Effect>)> {
        match outcome {
            Outcome::Noop => None,
            Outcome::Changed(applied) => {
                self.history
                    .commit(&mut self.tasks, applied.tasks, applied.label);
                self.persist();
                Some((applied.label, applied.effects))
            }
        }
    }

    /// Undo the most recent action; returns its label, `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<ActionLabel> {
        let label = self.history.undo(&mut self.tasks)?;
        self.persist();
        Some(label)
    }

    /// Redo the most recently undone action; returns its label, `None` when
    /// there is nothing to redo.
    pub fn redo(&mut self) -> Option<ActionLabel> {
        let label = self.history.redo(&mut self.tasks)?;
        self.persist();
        Some(label)
    }

    /// Replace the live collection without recording history.
    ///
    /// Reserved for mutations that are not user actions; today that is the
    /// reminder scan marking fired reminders as notified.
    pub fn replace_unrecorded(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.persist();
    }

    /// Write the collection and history to the store, best-effort.
    fn persist(&mut self) {
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            tasks: self.tasks.clone(),
        };
        match serde_json::to_string_pretty(&envelope) {
            Ok(encoded) => {
                if let Err(e) = self.kv.set(TASKS_KEY, &encoded) {
                    warn!("failed to persist task collection, keeping in-memory state: {e}");
                }
            }
            Err(e) => warn!("failed to encode task collection, skipping persist: {e}"),
        }

        let history = HistoryEnvelope {
            version: ENVELOPE_VERSION,
            data: self.history.to_data(),
        };
        match serde_json::to_string(&history) {
            Ok(encoded) => {
                if let Err(e) = self.kv.set(HISTORY_KEY, &encoded) {
                    warn!("failed to persist history: {e}");
                }
            }
            Err(e) => warn!("failed to encode history, skipping persist: {e}"),
        }
    }
}

fn decode_tasks(raw: &str) -> Result<Vec<Task>, crate::Error> {
    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        // Pre-envelope layout: a bare task array. Migrate silently.
        Err(_) => {
            let tasks: Vec<Task> = serde_json::from_str(raw)
                .map_err(|e| crate::Error::Storage(anyhow::anyhow!("corrupt task data: {e}")))?;
            Envelope { version: 1, tasks }
        }
    };

    if envelope.version > ENVELOPE_VERSION {
        return Err(crate::Error::UnsupportedVersion {
            found: envelope.version,
            supported: ENVELOPE_VERSION,
        });
    }

    let mut tasks = envelope.tasks;
    for task in &mut tasks {
        task.recompute_progress();
    }
    Ok(tasks)
}

fn decode_history(raw: &str) -> HistoryData {
    match serde_json::from_str::<HistoryEnvelope>(raw) {
        Ok(envelope) if envelope.version <= ENVELOPE_VERSION => envelope.data,
        Ok(envelope) => {
            warn!(
                "history was written by a newer tick (version {}), starting empty",
                envelope.version
            );
            HistoryData::default()
        }
        Err(e) => {
            warn!("corrupt history data, starting empty: {e}");
            HistoryData::default()
        }
    }
}
