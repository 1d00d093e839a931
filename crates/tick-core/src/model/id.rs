//! Timestamp-derived identifiers.
//!
//! Both id types are the creation instant in Unix milliseconds. Uniqueness is
//! enforced at creation time: when the current millisecond is already taken
//! (two creations inside the same tick), the id is bumped past the highest
//! taken value. Ids are stable for the lifetime of the record and survive
//! serialization as plain integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a [`Task`](crate::model::Task).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

/// Identifier of a [`Subtask`](crate::model::Subtask), unique within its
/// parent task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskId(i64);

macro_rules! impl_millis_id {
    ($name:ident) => {
        impl $name {
            /// Wrap a raw millisecond value.
            #[must_use]
            pub const fn from_millis(millis: i64) -> Self {
                Self(millis)
            }

            /// The raw millisecond value.
            #[must_use]
            pub const fn as_millis(self) -> i64 {
                self.0
            }

            /// Derive a fresh id from `now_millis`, bumped past every id in
            /// `taken` so the uniqueness invariant holds even when several
            /// records are created inside the same millisecond.
            #[must_use]
            pub fn fresh(now_millis: i64, taken: impl IntoIterator<Item = Self>) -> Self {
                let ceiling = taken
                    .into_iter()
                    .map(|id| id.0)
                    .max()
                    .map_or(i64::MIN, |max| max.saturating_add(1));
                Self(now_millis.max(ceiling))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }
    };
}

impl_millis_id!(TaskId);
impl_millis_id!(SubtaskId);
