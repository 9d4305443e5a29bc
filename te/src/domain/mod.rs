//! Domain types
//!
//! A [`Record`] is the unit produced on every generation cycle.

mod record;

pub use record::{DATE_FORMAT, Record, RecordFactory, TIME_FORMAT};
