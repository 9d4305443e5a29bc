//! Writer - appends each distinct record once to the sink

use std::sync::Arc;

use colored::Colorize;
use tracing::{debug, error, info};

use crate::sink::Sink;
use crate::state::RuntimeState;

/// Counters reported by the writer when it stops
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriterStats {
    /// Records appended to the sink
    pub written: u64,
    /// Appends that failed
    pub failed: u64,
}

/// Consumer of published records
///
/// Distinctness is decided by sequence number only. The writer sleeps until
/// the generator publishes (or the state stops) instead of polling, and it
/// loads the recorder at the moment of each write.
pub struct Writer<S: Sink> {
    state: Arc<RuntimeState>,
    sink: S,
    last_sequence: Option<u64>,
    stats: WriterStats,
}

impl<S: Sink> Writer<S> {
    pub fn new(state: Arc<RuntimeState>, sink: S) -> Self {
        debug!("Writer::new: called");
        Self {
            state,
            sink,
            last_sequence: None,
            stats: WriterStats::default(),
        }
    }

    /// Run until the state is stopped
    pub async fn run(mut self) -> WriterStats {
        info!("Writer starting");

        loop {
            if self.state.is_stopped() {
                break;
            }
            self.write_if_new();
            self.state.wait_published().await;
        }

        info!(written = self.stats.written, failed = self.stats.failed, "Writer stopped");
        self.stats
    }

    /// Append the current record if its sequence has not been recorded yet
    ///
    /// Returns whether an append was attempted. A failed append is reported
    /// and counts as recorded, so it is never retried.
    pub fn write_if_new(&mut self) -> bool {
        // One load: the compared record and the formatted record are the same
        let record = self.state.current_record();
        if self.last_sequence == Some(record.sequence) {
            debug!(sequence = record.sequence, "Writer: no new record");
            return false;
        }

        let recorder = self.state.recorder();
        match recorder.append(&record, &mut self.sink) {
            Ok(()) => {
                debug!(sequence = record.sequence, %recorder, "Writer: record appended");
                self.stats.written += 1;
            }
            Err(e) => {
                error!(sequence = record.sequence, error = %e, "Writer: failed to append record");
                eprintln!("{} {}", "Failed to record event:".red(), e);
                self.stats.failed += 1;
            }
        }
        self.last_sequence = Some(record.sequence);
        true
    }

    pub fn stats(&self) -> WriterStats {
        self.stats
    }
}
