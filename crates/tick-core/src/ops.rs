//! Pure task operations.
//!
//! Every operation computes the next collection from the current one plus an
//! intent. All of them are total: malformed input (blank text, an id that
//! matches nothing) produces [`Outcome::Noop`], never an error and never a
//! partial change. A `Noop` must not be committed to history; callers go
//! through [`crate::store::TaskStore::apply`], which enforces that.
//!
//! Side effects are returned as [`Effect`] data on the [`Applied`] result;
//! nothing here performs I/O.

use crate::effect::{Cue, Effect};
use crate::model::{Subtask, SubtaskId, Task, TaskDraft, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of mutation produced a collection; shown by undo/redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionLabel {
    Add,
    Update,
    Delete,
    Toggle,
    AddSubtask,
    ToggleSubtask,
    Clear,
    Import,
    Template,
}

impl ActionLabel {
    /// Stable kebab-case slug, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Toggle => "toggle",
            Self::AddSubtask => "add-subtask",
            Self::ToggleSubtask => "toggle-subtask",
            Self::Clear => "clear",
            Self::Import => "import",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful mutation: the next collection, its label, and the effects the
/// caller should execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub tasks: Vec<Task>,
    pub label: ActionLabel,
    pub effects: Vec<Effect>,
}

/// Result of a task operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The collection changed; commit `tasks` through the history manager.
    Changed(Applied),
    /// Nothing to do; the input collection stands and history is untouched.
    Noop,
}

impl Outcome {
    fn changed(tasks: Vec<Task>, label: ActionLabel) -> Self {
        Self::Changed(Applied {
            tasks,
            label,
            effects: Vec::new(),
        })
    }

    fn changed_with(tasks: Vec<Task>, label: ActionLabel, effects: Vec<Effect>) -> Self {
        Self::Changed(Applied {
            tasks,
            label,
            effects,
        })
    }

    /// True when the operation left the collection untouched.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

/// Append a new task built from `draft`.
///
/// The text is trimmed; a draft that is blank after trimming is a no-op. The
/// new task gets a fresh unique id derived from `now`, `completed = false`,
/// zero progress, and no subtasks.
#[must_use]
pub fn add_task(tasks: &[Task], draft: TaskDraft, now: DateTime<Utc>) -> Outcome {
    let text = draft.text.trim();
    if text.is_empty() {
        return Outcome::Noop;
    }

    let id = TaskId::fresh(now.timestamp_millis(), tasks.iter().map(|t| t.id));
    let task = Task {
        id,
        text: text.to_string(),
        completed: false,
        category: draft.category,
        priority: draft.priority,
        due: draft.due,
        reminder: None,
        created_at: now,
        tags: draft.tags,
        notes: draft.notes,
        subtasks: Vec::new(),
        progress: 0,
    };

    let mut next = tasks.to_vec();
    next.push(task);
    Outcome::changed(next, ActionLabel::Add)
}

/// Merge `patch` into the task matching `id`.
///
/// No-op when the id matches nothing or the patch is empty.
#[must_use]
pub fn update_task(tasks: &[Task], id: TaskId, patch: &TaskPatch) -> Outcome {
    if patch.is_empty() || !tasks.iter().any(|t| t.id == id) {
        return Outcome::Noop;
    }

    let next = tasks
        .iter()
        .map(|t| if t.id == id { patch.apply_to(t) } else { t.clone() })
        .collect();
    Outcome::changed(next, ActionLabel::Update)
}

/// Remove the task matching `id`; its subtasks go with it.
#[must_use]
pub fn delete_task(tasks: &[Task], id: TaskId) -> Outcome {
    if !tasks.iter().any(|t| t.id == id) {
        return Outcome::Noop;
    }

    let next = tasks.iter().filter(|t| t.id != id).cloned().collect();
    Outcome::changed(next, ActionLabel::Delete)
}

/// Flip the completion flag of the task matching `id`.
///
/// The false→true transition requests a completion notification and cue; the
/// reverse transition is silent.
#[must_use]
pub fn toggle_complete(tasks: &[Task], id: TaskId) -> Outcome {
    let Some(current) = tasks.iter().find(|t| t.id == id) else {
        return Outcome::Noop;
    };

    let completing = !current.completed;
    let next: Vec<Task> = tasks
        .iter()
        .map(|t| {
            if t.id == id {
                let mut flipped = t.clone();
                flipped.completed = completing;
                flipped
            } else {
                t.clone()
            }
        })
        .collect();

    let effects = if completing {
        vec![
            Effect::info(format!("Completed: {}", current.text)),
            Effect::Sound { cue: Cue::Complete },
        ]
    } else {
        Vec::new()
    };
    Outcome::changed_with(next, ActionLabel::Toggle, effects)
}

/// Append a subtask with `text` (trimmed) to the task matching `task_id`.
///
/// No-op on blank text or a missing task. Parent progress is recomputed.
#[must_use]
pub fn add_subtask(tasks: &[Task], task_id: TaskId, text: &str, now: DateTime<Utc>) -> Outcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Outcome::Noop;
    }
    let Some(parent) = tasks.iter().find(|t| t.id == task_id) else {
        return Outcome::Noop;
    };

    let id = SubtaskId::fresh(
        now.timestamp_millis(),
        parent.subtasks.iter().map(|s| s.id),
    );
    let subtask = Subtask {
        id,
        text: trimmed.to_string(),
        completed: false,
    };

    let next = tasks
        .iter()
        .map(|t| {
            if t.id == task_id {
                let mut parent = t.clone();
                parent.subtasks.push(subtask.clone());
                parent.recompute_progress();
                parent
            } else {
                t.clone()
            }
        })
        .collect();
    Outcome::changed(next, ActionLabel::AddSubtask)
}

/// Flip the completion flag of one subtask and recompute parent progress.
///
/// When the toggle brings progress to 100 the caller is asked to surface a
/// completion notification and cue.
#[must_use]
pub fn toggle_subtask(tasks: &[Task], task_id: TaskId, subtask_id: SubtaskId) -> Outcome {
    let Some(parent) = tasks.iter().find(|t| t.id == task_id) else {
        return Outcome::Noop;
    };
    if parent.subtask(subtask_id).is_none() {
        return Outcome::Noop;
    }

    let was_complete = parent.progress == 100;
    let mut all_done_text = None;
    let next = tasks
        .iter()
        .map(|t| {
            if t.id == task_id {
                let mut parent = t.clone();
                for subtask in &mut parent.subtasks {
                    if subtask.id == subtask_id {
                        subtask.completed = !subtask.completed;
                    }
                }
                parent.recompute_progress();
                if parent.progress == 100 && !was_complete {
                    all_done_text = Some(parent.text.clone());
                }
                parent
            } else {
                t.clone()
            }
        })
        .collect();

    let effects = all_done_text.map_or_else(Vec::new, |text| {
        vec![
            Effect::info(format!("All subtasks done: {text}")),
            Effect::Sound { cue: Cue::Complete },
        ]
    });
    Outcome::changed_with(next, ActionLabel::ToggleSubtask, effects)
}

/// Empty the collection. No-op when it is already empty.
#[must_use]
pub fn clear_all(tasks: &[Task]) -> Outcome {
    if tasks.is_empty() {
        return Outcome::Noop;
    }
    Outcome::changed(Vec::new(), ActionLabel::Clear)
}
