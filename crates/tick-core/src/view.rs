//! The view pipeline: a pure filter/sort projection of the collection.
//!
//! `project(tasks, criteria)` is referentially transparent (same inputs,
//! same output) and never mutates the underlying collection. Filtering runs
//! text → category → priority → status, then a stable sort by the selected
//! key, so tasks that compare equal keep their collection order.

use crate::model::{Category, Priority, Task};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Completion-status selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    fn keeps(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Sort key for the projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Creation time, newest first.
    #[default]
    Created,
    /// Due date ascending; tasks without a due date sort last.
    Due,
    /// Priority ascending by rank: high, medium, low.
    Priority,
    /// Category label, lexicographic.
    Category,
}

impl SortKey {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Due => "due",
            Self::Priority => "priority",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = crate::model::task::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(crate::model::task::ParseEnumError {
                expected: "status filter",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for SortKey {
    type Err = crate::model::task::ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "created" => Ok(Self::Created),
            "due" => Ok(Self::Due),
            "priority" => Ok(Self::Priority),
            "category" => Ok(Self::Category),
            _ => Err(crate::model::task::ParseEnumError {
                expected: "sort key",
                got: s.to_string(),
            }),
        }
    }
}

/// Everything the projection depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Case-insensitive substring matched against task and subtask text;
    /// empty keeps everything.
    pub search: String,
    /// `None` = all categories.
    pub category: Option<Category>,
    /// `None` = all priorities.
    pub priority: Option<Priority>,
    pub status: StatusFilter,
    pub sort: SortKey,
}

/// Whether `task` survives every filter stage of `criteria`.
#[must_use]
pub fn matches(task: &Task, criteria: &Criteria) -> bool {
    let needle = criteria.search.trim().to_lowercase();
    let text_hit = needle.is_empty()
        || task.text.to_lowercase().contains(&needle)
        || task
            .subtasks
            .iter()
            .any(|s| s.text.to_lowercase().contains(&needle));

    text_hit
        && criteria.category.is_none_or(|c| task.category == c)
        && criteria.priority.is_none_or(|p| task.priority == p)
        && criteria.status.keeps(task)
}

/// Derive the visible, ordered task list.
#[must_use]
pub fn project(tasks: &[Task], criteria: &Criteria) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|t| matches(t, criteria))
        .cloned()
        .collect();

    match criteria.sort {
        SortKey::Created => visible.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Due => visible.sort_by_key(|t| (t.due.is_none(), t.due)),
        SortKey::Priority => visible.sort_by_key(|t| t.priority.rank()),
        SortKey::Category => visible.sort_by_key(|t| t.category.as_str()),
    }
    visible
}
