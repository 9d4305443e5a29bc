//! RuntimeState - attributes shared by the generator, writer and control tasks

use std::num::NonZeroU64;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::Notify;
use tracing::{debug, info};

use crate::domain::Record;
use crate::recorder::Recorder;

/// Shared runtime state
///
/// Each attribute is replaced as a whole and no method blocks:
///
/// - `record` and `recorder` live in [`ArcSwap`] cells, so a reader gets a
///   complete value from one generation cycle or one selection, never a mix.
///   A superseded value is freed when the last reader drops its `Arc`.
/// - `interval_secs`, `paused` and `stopped` are atomics.
///
/// Two [`Notify`] handles carry wake-ups. `published` wakes the writer after
/// each publish or stop; `control` wakes the generator on resume or stop.
/// Each has exactly one waiter, so `notify_one` keeps a permit when the
/// waiter is busy and no wake-up is lost.
pub struct RuntimeState {
    record: ArcSwap<Record>,
    recorder: ArcSwap<Recorder>,
    interval_secs: AtomicU64,
    paused: AtomicBool,
    stopped: AtomicBool,
    published: Notify,
    control: Notify,
}

impl RuntimeState {
    /// Create the state with the first record and initial parameters
    pub fn new(first: Record, recorder: Recorder, interval_secs: NonZeroU64) -> Self {
        debug!(sequence = first.sequence, %recorder, interval_secs = interval_secs.get(), "RuntimeState::new: called");
        Self {
            record: ArcSwap::from_pointee(first),
            recorder: ArcSwap::from_pointee(recorder),
            interval_secs: AtomicU64::new(interval_secs.get()),
            paused: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            published: Notify::new(),
            control: Notify::new(),
        }
    }

    /// Wrap in an `Arc` for handing to tasks
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    // === Record ===

    /// The current record
    pub fn current_record(&self) -> Arc<Record> {
        self.record.load_full()
    }

    /// Replace the current record and wake the writer
    pub fn publish(&self, record: Record) {
        debug!(sequence = record.sequence, "RuntimeState::publish");
        self.record.store(Arc::new(record));
        self.published.notify_one();
    }

    /// Number of records generated so far
    pub fn records_generated(&self) -> u64 {
        self.record.load().generated_count()
    }

    /// Wait until a record is published or the state is stopped
    ///
    /// Completes immediately if a wake-up arrived while nobody was waiting.
    pub async fn wait_published(&self) {
        self.published.notified().await;
    }

    // === Recorder ===

    /// The currently selected recorder
    pub fn recorder(&self) -> Recorder {
        **self.recorder.load()
    }

    /// Select a recorder, returning the previous one
    pub fn set_recorder(&self, recorder: Recorder) -> Recorder {
        let previous = self.recorder.swap(Arc::new(recorder));
        info!(from = %previous, to = %recorder, "Recorder changed");
        *previous
    }

    // === Interval ===

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs.load(Ordering::Acquire)
    }

    /// Interval between generated records
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs())
    }

    /// Shorten the interval by one second
    ///
    /// Returns the new interval, or `None` (leaving it unchanged) if it would
    /// drop below one second.
    pub fn faster(&self) -> Option<u64> {
        let result = self
            .interval_secs
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |secs| {
                secs.checked_sub(1).filter(|s| *s >= 1)
            })
            .ok()
            .map(|previous| previous - 1);
        debug!(?result, "RuntimeState::faster");
        result
    }

    /// Lengthen the interval by one second, returning the new interval
    pub fn slower(&self) -> u64 {
        let previous = self
            .interval_secs
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |secs| Some(secs.saturating_add(1)))
            .unwrap_or_else(|secs| secs);
        let current = previous.saturating_add(1);
        debug!(current, "RuntimeState::slower");
        current
    }

    // === Pause ===

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Suspend generation, returning whether it was running before
    pub fn pause(&self) -> bool {
        let was_paused = self.paused.swap(true, Ordering::AcqRel);
        if !was_paused {
            info!("Generation paused");
        }
        !was_paused
    }

    /// Resume generation, returning whether it was paused before
    pub fn resume(&self) -> bool {
        let was_paused = self.paused.swap(false, Ordering::AcqRel);
        if was_paused {
            info!("Generation resumed");
            self.control.notify_one();
        }
        was_paused
    }

    // === Stop ===

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Ask every task to finish and wake the ones that are sleeping
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            info!("Stop requested");
        }
        self.published.notify_one();
        self.control.notify_one();
    }

    /// Wait until generation is resumed or the state is stopped
    pub async fn wait_control(&self) {
        self.control.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: u64) -> Record {
        Record {
            sequence,
            date: "01.01.2026".to_string(),
            time: "00:00:00".to_string(),
            samples: [0, 0, 0],
        }
    }

    fn state(interval_secs: u64) -> RuntimeState {
        RuntimeState::new(
            record(0),
            Recorder::Detailed,
            NonZeroU64::new(interval_secs).unwrap(),
        )
    }

    #[test]
    fn test_publish_replaces_record() {
        let state = state(5);
        let before = state.current_record();
        state.publish(record(1));

        assert_eq!(before.sequence, 0);
        assert_eq!(state.current_record().sequence, 1);
        assert_eq!(state.records_generated(), 2);
    }

    #[test]
    fn test_superseded_record_is_reclaimed() {
        let state = state(5);
        let held = state.current_record();
        let weak = Arc::downgrade(&held);
        state.publish(record(1));

        assert!(weak.upgrade().is_some());
        drop(held);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_faster_stops_at_one_second() {
        let state = state(2);
        assert_eq!(state.faster(), Some(1));
        assert_eq!(state.faster(), None);
        assert_eq!(state.interval_secs(), 1);
    }

    #[test]
    fn test_slower_increments() {
        let state = state(5);
        assert_eq!(state.slower(), 6);
        assert_eq!(state.interval(), Duration::from_secs(6));
    }

    #[test]
    fn test_pause_and_resume_report_transitions() {
        let state = state(5);
        assert!(state.pause());
        assert!(!state.pause());
        assert!(state.is_paused());
        assert!(state.resume());
        assert!(!state.resume());
        assert!(!state.is_paused());
    }

    #[test]
    fn test_set_recorder_returns_previous() {
        let state = state(5);
        assert_eq!(state.set_recorder(Recorder::Minimal), Recorder::Detailed);
        assert_eq!(state.recorder(), Recorder::Minimal);
    }

    #[tokio::test]
    async fn test_stop_wakes_waiters() {
        let state = state(5);
        state.stop();
        assert!(state.is_stopped());

        // Both wake-ups were stored as permits
        tokio::time::timeout(Duration::from_secs(1), state.wait_published())
            .await
            .expect("writer wake-up lost");
        tokio::time::timeout(Duration::from_secs(1), state.wait_control())
            .await
            .expect("generator wake-up lost");
    }

    #[test]
    fn test_no_torn_records_under_concurrent_publish() {
        // Every field is derived from the sequence, so a record mixing two
        // cycles would fail the consistency check.
        fn consistent(sequence: u64) -> Record {
            let s = sequence as i32;
            Record {
                sequence,
                date: format!("{:02}.01.2026", sequence % 28 + 1),
                time: format!("00:00:{:02}", sequence % 60),
                samples: [s, s.wrapping_neg(), s.wrapping_mul(2)],
            }
        }

        let state = Arc::new(RuntimeState::new(
            consistent(0),
            Recorder::Detailed,
            NonZeroU64::new(1).unwrap(),
        ));
        let publisher = {
            let state = state.clone();
            std::thread::spawn(move || {
                for sequence in 1..=50_000 {
                    state.publish(consistent(sequence));
                }
                state.stop();
            })
        };
        let readers: Vec<_> = (0..3)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || {
                    let mut last = 0;
                    while !state.is_stopped() {
                        let record = state.current_record();
                        assert_eq!(*record, consistent(record.sequence));
                        assert!(record.sequence >= last, "sequence went backwards");
                        last = record.sequence;
                    }
                })
            })
            .collect();

        publisher.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(state.current_record().sequence, 50_000);
    }
}
