//! Effects-as-data and the collaborator traits that execute them.
//!
//! Operations never talk to the outside world. They return [`Effect`] values
//! alongside the next collection; the presentation layer drains them through
//! [`run_effects`] into whatever [`NotificationSink`] and [`AudioSink`] it
//! wired up. The remaining traits abstract time ([`Clock`]), durable storage
//! ([`KeyValueStore`]), and the periodic reminder tick ([`Scheduler`]).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// How loudly a notification should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

/// The audio cues the original product plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Complete,
    Reminder,
}

/// A side effect requested by an operation, executed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Effect {
    Notify { message: String, severity: Severity },
    Sound { cue: Cue },
}

impl Effect {
    /// Convenience constructor for an info-level notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    /// Convenience constructor for a warning-level notification.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Notify {
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Sink for user-facing notifications.
pub trait NotificationSink {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Sink for audio cues.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Durable key-value storage; the task collection lives under one fixed key.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns the underlying storage error when the read fails.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns the underlying storage error when the write fails.
    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Cancellation handle for a recurring callback; cancelling is idempotent and
/// dropping the handle cancels too.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduleHandle {
    /// Wrap a cancel action.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the recurring callback.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ScheduleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("cancelled", &self.cancel.is_none())
            .finish()
    }
}

/// Periodic scheduler driving the reminder scan.
pub trait Scheduler {
    /// Invoke `tick` every `interval` until the returned handle is cancelled.
    fn every(&mut self, interval: Duration, tick: Box<dyn FnMut() + Send>) -> ScheduleHandle;
}

/// Drain `effects` into the given sinks, in order.
pub fn run_effects(
    effects: &[Effect],
    notifications: &mut dyn NotificationSink,
    audio: &mut dyn AudioSink,
) {
    for effect in effects {
        match effect {
            Effect::Notify { message, severity } => notifications.notify(message, *severity),
            Effect::Sound { cue } => audio.play(*cue),
        }
    }
}
