//! tick-core: task model, snapshot history, and view pipeline.
//!
//! The crate is the headless half of tick. It owns the task collection, the
//! pure operations that produce the next collection from the current one, the
//! two-stack undo/redo history, and the filter/sort projection shown to the
//! user. Side effects (notifications, audio cues, persistence, time, timers)
//! are described as data and routed through the narrow traits in [`effect`],
//! so every piece of business logic here is synchronous and testable without
//! I/O.
//!
//! # Conventions
//!
//! - **Errors**: fallible boundaries return [`Error`]; user-input edge cases
//!   (blank text, unknown ids) are no-ops, never errors.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod backup;
pub mod config;
pub mod effect;
pub mod error;
pub mod history;
pub mod model;
pub mod ops;
pub mod reminder;
pub mod stats;
pub mod store;
pub mod template;
pub mod view;

pub use error::Error;
