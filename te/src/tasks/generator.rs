//! Generator - fabricates and publishes a record every interval

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::domain::RecordFactory;
use crate::state::RuntimeState;

/// Deadline used when an interval does not fit in an `Instant` (about 30 years)
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Periodic record producer
///
/// The generator is the only writer of sequence numbers: it continues from
/// the record the state was created with.
pub struct Generator {
    state: Arc<RuntimeState>,
    factory: RecordFactory,
    next_sequence: u64,
    pause_poll: Duration,
}

impl Generator {
    /// Create a generator continuing after the state's current record
    pub fn new(state: Arc<RuntimeState>, factory: RecordFactory, pause_poll: Duration) -> Self {
        let next_sequence = state.current_record().sequence + 1;
        debug!(next_sequence, ?pause_poll, "Generator::new: called");
        Self {
            state,
            factory,
            next_sequence,
            pause_poll,
        }
    }

    /// Run until the state is stopped, returning how many records were published
    pub async fn run(mut self) -> u64 {
        info!(next_sequence = self.next_sequence, "Generator starting");
        let mut published = 0;

        while !self.state.is_stopped() {
            if self.state.is_paused() {
                // Re-check periodically; resume and stop also wake us early
                tokio::select! {
                    _ = self.state.wait_control() => {}
                    _ = tokio::time::sleep(self.pause_poll) => {}
                }
                continue;
            }

            let record = self.factory.fabricate(self.next_sequence);
            self.state.publish(record);
            self.next_sequence += 1;
            published += 1;

            // Interval is read fresh each cycle; a change applies to the next sleep
            self.sleep_interval().await;
        }

        info!(published, "Generator stopped");
        published
    }

    /// Sleep one interval, cut short only by stop
    async fn sleep_interval(&self) {
        let now = Instant::now();
        let deadline = now
            .checked_add(self.state.interval())
            .unwrap_or_else(|| now + FAR_FUTURE);
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => return,
                _ = self.state.wait_control() => {
                    if self.state.is_stopped() {
                        debug!("Generator: woken by stop");
                        return;
                    }
                }
            }
        }
    }
}
