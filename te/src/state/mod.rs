//! Shared runtime state
//!
//! RuntimeState is the single source of truth for the current record, the
//! selected recorder, the generation interval and the pause/stop flags.

mod runtime;

pub use runtime::RuntimeState;
