//! Recorder variants
//!
//! A recorder decides which record fields reach the sink. The three variants
//! share one behavior and differ only in the lines they render:
//!
//! ```text
//! level 0        level 1            level 2
//! id: 7          id: 7              id: 7
//! time: ...      date: ...          date: ...
//!                time: ...          time: ...
//!                first value: 12    first value: 12
//!                                   second value: -3
//!                                   third value: 40
//! ```
//!
//! Every rendered block ends with a blank line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::sink::{Sink, SinkError};

/// Verbosity variant used by the writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recorder {
    /// Sequence and time
    Minimal,
    /// Sequence, date, time and first sample
    Standard,
    /// Sequence, date, time and all three samples
    #[default]
    Detailed,
}

impl Recorder {
    /// All variants ordered by level
    pub const ALL: [Recorder; 3] = [Recorder::Minimal, Recorder::Standard, Recorder::Detailed];

    /// Numeric verbosity level (0, 1 or 2)
    pub fn level(self) -> u8 {
        match self {
            Self::Minimal => 0,
            Self::Standard => 1,
            Self::Detailed => 2,
        }
    }

    /// Variant for a numeric level
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(level as usize).copied()
    }

    /// Render the block of lines this variant writes for `record`
    pub fn render(self, record: &Record) -> String {
        let mut out = format!("level {}\nid: {}\n", self.level(), record.sequence);
        if self != Self::Minimal {
            out.push_str(&format!("date: {}\n", record.date));
        }
        out.push_str(&format!("time: {}\n", record.time));
        if self != Self::Minimal {
            out.push_str(&format!("first value: {}\n", record.first_value()));
        }
        if self == Self::Detailed {
            out.push_str(&format!("second value: {}\n", record.second_value()));
            out.push_str(&format!("third value: {}\n", record.third_value()));
        }
        out.push('\n');
        out
    }

    /// Append `record` to `sink` in this variant's format
    pub fn append<S: Sink + ?Sized>(self, record: &Record, sink: &mut S) -> Result<(), SinkError> {
        sink.append(&self.render(record))
    }
}

impl fmt::Display for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minimal => "minimal",
            Self::Standard => "standard",
            Self::Detailed => "detailed",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            sequence: 7,
            date: "19.10.2026".to_string(),
            time: "14:03:59".to_string(),
            samples: [12, -3, 40],
        }
    }

    #[test]
    fn test_minimal_format() {
        assert_eq!(
            Recorder::Minimal.render(&record()),
            "level 0\nid: 7\ntime: 14:03:59\n\n"
        );
    }

    #[test]
    fn test_standard_format() {
        assert_eq!(
            Recorder::Standard.render(&record()),
            "level 1\nid: 7\ndate: 19.10.2026\ntime: 14:03:59\nfirst value: 12\n\n"
        );
    }

    #[test]
    fn test_detailed_format() {
        assert_eq!(
            Recorder::Detailed.render(&record()),
            "level 2\nid: 7\ndate: 19.10.2026\ntime: 14:03:59\nfirst value: 12\nsecond value: -3\nthird value: 40\n\n"
        );
    }

    #[test]
    fn test_levels_round_trip() {
        for recorder in Recorder::ALL {
            assert_eq!(Recorder::from_level(recorder.level()), Some(recorder));
        }
        assert_eq!(Recorder::from_level(3), None);
    }

    #[test]
    fn test_default_is_detailed() {
        assert_eq!(Recorder::default(), Recorder::Detailed);
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let recorder: Recorder = serde_yaml::from_str("minimal").unwrap();
        assert_eq!(recorder, Recorder::Minimal);
    }
}
