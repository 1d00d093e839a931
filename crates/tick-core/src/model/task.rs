//! The task record and the value types hanging off it.
//!
//! A [`Task`] is plain data: every operation in [`crate::ops`] builds a new
//! task or collection rather than mutating one shared between consumers, so
//! snapshots held by the history manager stay stable. `progress` is the one
//! derived field; it is recomputed through [`Task::recompute_progress`] after
//! every subtask mutation and never set independently.

use crate::model::id::{SubtaskId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{fmt, str::FromStr};

/// The five task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Personal,
    Work,
    Shopping,
    Health,
    Study,
}

impl Category {
    /// All categories in declaration order, for stats and CLI listings.
    pub const ALL: [Self; 5] = [
        Self::Personal,
        Self::Work,
        Self::Shopping,
        Self::Health,
        Self::Study,
    ];

    /// Stable lowercase label, also the lexicographic sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Study => "study",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Personal
    }
}

/// The three priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high(1) < medium(2) < low(3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "shopping" => Ok(Self::Shopping),
            "health" => Ok(Self::Health),
            "study" => Ok(Self::Study),
            _ => Err(ParseEnumError {
                expected: "category",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}

/// A scheduled reminder on a task.
///
/// `notified` flips to true once the reminder fires; a fired reminder never
/// fires again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub at: DateTime<Utc>,
    #[serde(default)]
    pub notified: bool,
}

impl Reminder {
    /// A pending reminder at `at`.
    #[must_use]
    pub const fn at(at: DateTime<Utc>) -> Self {
        Self {
            at,
            notified: false,
        }
    }

    /// True when the reminder should fire: due and not yet delivered.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.notified && self.at <= now
    }
}

/// A child checklist item, owned exclusively by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// All persisted fields for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reminder: Option<Reminder>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Derived: percentage of completed subtasks, 0 when there are none.
    #[serde(default)]
    pub progress: u8,
}

impl Task {
    /// Find a subtask by id.
    #[must_use]
    pub fn subtask(&self, id: SubtaskId) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    /// Percentage of completed subtasks, rounded half-up: 1/3 → 33, 2/3 → 67,
    /// 1/2 → 50. Zero when the task has no subtasks.
    #[must_use]
    pub fn progress_of(subtasks: &[Subtask]) -> u8 {
        let total = subtasks.len();
        if total == 0 {
            return 0;
        }
        let completed = subtasks.iter().filter(|s| s.completed).count();
        let rounded = (200 * completed + total) / (2 * total);
        u8::try_from(rounded).unwrap_or(100)
    }

    /// Recompute the derived `progress` field from the current subtasks.
    pub fn recompute_progress(&mut self) {
        self.progress = Self::progress_of(&self.subtasks);
    }
}

/// User input for creating a task; everything except the text has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub category: Category,
    pub priority: Priority,
    pub due: Option<DateTime<Utc>>,
    pub tags: BTreeSet<String>,
    pub notes: String,
}

impl TaskDraft {
    /// A draft with just text and default metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A field-wise update to a task: `None` keeps the current value.
///
/// The doubly-optional fields distinguish "leave alone" (`None`) from "clear"
/// (`Some(None)`). Setting or clearing the reminder resets its delivered
/// flag, so a re-scheduled reminder fires again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub due: Option<Option<DateTime<Utc>>>,
    pub reminder: Option<Option<DateTime<Utc>>>,
    pub notes: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub subtasks: Option<Vec<Subtask>>,
}

impl TaskPatch {
    /// True when the patch would not touch any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.due.is_none()
            && self.reminder.is_none()
            && self.notes.is_none()
            && self.tags.is_none()
            && self.subtasks.is_none()
    }

    /// Apply the patch to `task`, returning the patched copy.
    ///
    /// Blank replacement text is ignored field-wise (the old text stays);
    /// progress is recomputed when the patch replaces the subtasks.
    #[must_use]
    pub fn apply_to(&self, task: &Task) -> Task {
        let mut next = task.clone();
        if let Some(text) = &self.text {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                next.text = trimmed.to_string();
            }
        }
        if let Some(category) = self.category {
            next.category = category;
        }
        if let Some(priority) = self.priority {
            next.priority = priority;
        }
        if let Some(due) = self.due {
            next.due = due;
        }
        if let Some(reminder) = self.reminder {
            next.reminder = reminder.map(Reminder::at);
        }
        if let Some(notes) = &self.notes {
            next.notes.clone_from(notes);
        }
        if let Some(tags) = &self.tags {
            next.tags.clone_from(tags);
        }
        if let Some(subtasks) = &self.subtasks {
            next.subtasks.clone_from(subtasks);
            next.recompute_progress();
        }
        next
    }
}
