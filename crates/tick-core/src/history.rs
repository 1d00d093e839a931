//! Two-stack snapshot history: the undo/redo engine.
//!
//! `commit` pushes the pre-mutation snapshot onto the undo stack and clears
//! the redo stack (last-writer-wins, not a branching history). `undo` and
//! `redo` swap the live collection with the top of the matching stack. Each
//! of the three is atomic with respect to the live collection: the swap either
//! happens whole or not at all, and an empty stack is a reported no-op, never
//! an error.
//!
//! Stacks are unbounded by default. [`History::with_max_depth`] caps the undo
//! depth for memory-conscious callers; when the cap is hit the oldest entry
//! is dropped.

use crate::model::Task;
use crate::ops::ActionLabel;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::mem;

/// One history entry: the collection as it was before an action, plus the
/// action's label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub snapshot: Vec<Task>,
    pub label: ActionLabel,
}

/// Serializable form of the stacks, for persistence across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default)]
    pub undo: Vec<Entry>,
    #[serde(default)]
    pub redo: Vec<Entry>,
}

/// Undo and redo stacks over immutable collection snapshots.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<Entry>,
    redo: Vec<Entry>,
    /// 0 = unbounded.
    max_depth: usize,
}

impl History {
    /// Unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// History whose undo stack is capped at `max_depth` entries
    /// (0 = unbounded). The oldest entry is dropped when the cap is hit.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Replace `live` with `next`, recording the previous collection under
    /// `label` and invalidating any redo entries.
    pub fn commit(&mut self, live: &mut Vec<Task>, next: Vec<Task>, label: ActionLabel) {
        let snapshot = mem::replace(live, next);
        self.undo.push_back(Entry { snapshot, label });
        if self.max_depth > 0 {
            while self.undo.len() > self.max_depth {
                self.undo.pop_front();
            }
        }
        self.redo.clear();
    }

    /// Restore the most recent snapshot, moving the current collection to the
    /// redo stack. Returns the undone action's label, or `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self, live: &mut Vec<Task>) -> Option<ActionLabel> {
        let entry = self.undo.pop_back()?;
        let current = mem::replace(live, entry.snapshot);
        self.redo.push(Entry {
            snapshot: current,
            label: entry.label,
        });
        Some(entry.label)
    }

    /// Re-apply the most recently undone action. Returns its label, or `None`
    /// when there is nothing to redo.
    pub fn redo(&mut self, live: &mut Vec<Task>) -> Option<ActionLabel> {
        let entry = self.redo.pop()?;
        let current = mem::replace(live, entry.snapshot);
        self.undo.push_back(Entry {
            snapshot: current,
            label: entry.label,
        });
        Some(entry.label)
    }

    /// Number of undoable actions.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable actions.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Label of the action an undo would reverse.
    #[must_use]
    pub fn peek_undo(&self) -> Option<ActionLabel> {
        self.undo.back().map(|e| e.label)
    }

    /// Label of the action a redo would re-apply.
    #[must_use]
    pub fn peek_redo(&self) -> Option<ActionLabel> {
        self.redo.last().map(|e| e.label)
    }

    /// Snapshot the stacks for persistence.
    #[must_use]
    pub fn to_data(&self) -> HistoryData {
        HistoryData {
            undo: self.undo.iter().cloned().collect(),
            redo: self.redo.clone(),
        }
    }

    /// Rebuild the stacks from persisted data, enforcing `max_depth`
    /// (0 = unbounded) by dropping the oldest undo entries.
    #[must_use]
    pub fn from_data(data: HistoryData, max_depth: usize) -> Self {
        let mut undo: VecDeque<Entry> = data.undo.into();
        if max_depth > 0 {
            while undo.len() > max_depth {
                undo.pop_front();
            }
        }
        Self {
            undo,
            redo: data.redo,
            max_depth,
        }
    }
}
