//! ThreadEvents - generator, writer and control tasks over shared runtime state
//!
//! Three concurrently running tasks share one [`RuntimeState`]:
//!
//! - the [`Generator`] fabricates a [`Record`] every interval and publishes it
//! - the [`Writer`] appends each distinct record once to a [`Sink`] using the
//!   currently selected [`Recorder`]
//! - the [`Controller`] reads console commands and mutates the interval, the
//!   pause flag, the recorder, or stops everything
//!
//! Every shared attribute is replaced as a whole value, so no task ever
//! observes a record or recorder that is half old and half new.
//!
//! # Modules
//!
//! - [`domain`] - Record type and fabrication
//! - [`recorder`] - Verbosity variants and their line formats
//! - [`sink`] - Durable append-only destinations
//! - [`state`] - Shared runtime state
//! - [`tasks`] - Generator and Writer loops, shutdown wait
//! - [`control`] - Command parsing, dispatch and the control loop
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod control;
pub mod domain;
pub mod recorder;
pub mod sink;
pub mod state;
pub mod tasks;

// Re-export commonly used types
pub use config::Config;
pub use control::{
    Command, Console, ControlError, ControlStats, Controller, InputLine, Reply, Terminal, dispatch, spawn_line_reader,
};
pub use domain::{Record, RecordFactory};
pub use recorder::Recorder;
pub use sink::{FileSink, MemorySink, Sink, SinkError};
pub use state::RuntimeState;
pub use tasks::{Generator, Writer, WriterStats, wait_for_shutdown};

/// Default seconds between generated records
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Default lower bound for record samples
pub const DEFAULT_SAMPLE_MIN: i32 = -50;

/// Default upper bound for record samples
pub const DEFAULT_SAMPLE_MAX: i32 = 50;

/// Default period at which a paused generator re-checks its flags (milliseconds)
pub const DEFAULT_PAUSE_POLL_MS: u64 = 100;
