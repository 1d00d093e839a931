//! Terminal implementations of the core's collaborator traits.

use chrono::{DateTime, Utc};
use std::io::Write as _;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tick_core::effect::{AudioSink, Clock, Cue, NotificationSink, ScheduleHandle, Scheduler, Severity};

/// Notifications rendered as prefixed lines on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermNotifier;

impl NotificationSink for TermNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        let prefix = match severity {
            Severity::Info => "✓",
            Severity::Warning => "⏰",
        };
        eprintln!("{prefix} {message}");
    }
}

/// Audio cues as the terminal bell; silenced via config or `--quiet`.
#[derive(Debug, Clone, Copy)]
pub struct TermAudio {
    enabled: bool,
}

impl TermAudio {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioSink for TermAudio {
    fn play(&mut self, _cue: Cue) {
        if !self.enabled {
            return;
        }
        let mut err = std::io::stderr();
        let _ = err.write_all(b"\x07");
        let _ = err.flush();
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Scheduler backed by one background thread per registration.
///
/// The tick closure runs on that thread; cancellation wakes the thread
/// through a channel and joins it, so a cancelled handle never fires again.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn every(&mut self, interval: Duration, mut tick: Box<dyn FnMut() + Send>) -> ScheduleHandle {
        let (tx, rx) = mpsc::channel::<()>();
        let worker = thread::spawn(move || {
            loop {
                match rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });
        ScheduleHandle::new(move || {
            let _ = tx.send(());
            let _ = worker.join();
        })
    }
}
