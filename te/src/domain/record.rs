//! Record type and fabrication

use std::ops::RangeInclusive;

use chrono::{DateTime, Local, TimeZone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Date stamp format (`19.10.2026`)
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Time stamp format (`14:03:59`)
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One generated data record
///
/// The sequence number is the identity: it strictly increases over the
/// lifetime of the process and no two records share one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Monotonically increasing identity
    pub sequence: u64,
    /// Local date the record was created (`DD.MM.YYYY`)
    pub date: String,
    /// Local time the record was created (`HH:MM:SS`)
    pub time: String,
    /// Three independent samples
    pub samples: [i32; 3],
}

impl Record {
    /// Build a record stamped with the given instant
    pub fn stamped<Tz>(sequence: u64, at: &DateTime<Tz>, samples: [i32; 3]) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            sequence,
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
            samples,
        }
    }

    /// Number of records generated up to and including this one
    pub fn generated_count(&self) -> u64 {
        self.sequence + 1
    }

    pub fn first_value(&self) -> i32 {
        self.samples[0]
    }

    pub fn second_value(&self) -> i32 {
        self.samples[1]
    }

    pub fn third_value(&self) -> i32 {
        self.samples[2]
    }
}

/// Fabricates records with wall-clock stamps and uniform random samples
pub struct RecordFactory {
    samples: RangeInclusive<i32>,
    rng: StdRng,
}

impl RecordFactory {
    /// Create a factory drawing samples from `samples`
    pub fn new(samples: RangeInclusive<i32>) -> Self {
        debug!(?samples, "RecordFactory::new: called");
        Self {
            samples,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a factory with a fixed seed
    pub fn seeded(samples: RangeInclusive<i32>, seed: u64) -> Self {
        Self {
            samples,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fabricate the record with the given sequence number, stamped now
    pub fn fabricate(&mut self, sequence: u64) -> Record {
        let samples = [
            self.rng.random_range(self.samples.clone()),
            self.rng.random_range(self.samples.clone()),
            self.rng.random_range(self.samples.clone()),
        ];
        Record::stamped(sequence, &Local::now(), samples)
    }
}
