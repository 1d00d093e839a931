//! Export/import of the whole collection as a JSON document.
//!
//! The export wraps the tasks with a format version and an export timestamp.
//! Import is all-or-nothing: a payload that is not JSON, or whose `tasks`
//! field is not an array, is rejected without touching the live collection.

use crate::error::Error;
use crate::model::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format version stamped into every export.
pub const EXPORT_VERSION: &str = "1.0";

/// The export document shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

/// Build the export document for `tasks`.
#[must_use]
pub fn export_document(tasks: &[Task], now: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        version: EXPORT_VERSION.to_string(),
        exported_at: now,
        tasks: tasks.to_vec(),
    }
}

/// Serialize `tasks` into the export format.
///
/// # Errors
///
/// Returns [`Error::Storage`] when serialization fails (it should not for
/// well-formed tasks).
pub fn export_string(tasks: &[Task], now: DateTime<Utc>) -> Result<String, Error> {
    serde_json::to_string_pretty(&export_document(tasks, now))
        .map_err(|e| Error::Storage(e.into()))
}

/// Default backup filename, e.g. `tasks-backup-2024-03-01-0930.json`.
#[must_use]
pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("tasks-backup-{}.json", now.format("%Y-%m-%d-%H%M"))
}

/// Parse an import payload into a task collection.
///
/// Accepts any document carrying a `tasks` array whose entries deserialize as
/// tasks; extra fields (version, timestamps) are ignored. Progress is
/// recomputed on the way in, and duplicate ids are rejected, so imported data
/// cannot violate the collection invariants.
///
/// # Errors
///
/// - [`Error::ImportParse`] when the payload is not valid JSON.
/// - [`Error::ImportFormat`] when there is no `tasks` field, when it is not
///   an array, when an entry does not deserialize as a task, or when two
///   entries share an id.
pub fn import_str(payload: &str) -> Result<Vec<Task>, Error> {
    let value: Value = serde_json::from_str(payload).map_err(Error::ImportParse)?;

    let tasks_value = value
        .get("tasks")
        .ok_or_else(|| Error::ImportFormat("missing 'tasks' field".to_string()))?;
    if !tasks_value.is_array() {
        return Err(Error::ImportFormat("'tasks' is not an array".to_string()));
    }

    let mut tasks: Vec<Task> = serde_json::from_value(tasks_value.clone())
        .map_err(|e| Error::ImportFormat(e.to_string()))?;

    let mut seen = std::collections::BTreeSet::new();
    for task in &mut tasks {
        if !seen.insert(task.id) {
            return Err(Error::ImportFormat(format!("duplicate task id {}", task.id)));
        }
        task.recompute_progress();
    }
    Ok(tasks)
}
