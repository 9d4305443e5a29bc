//! Control plane errors

use thiserror::Error;

/// User input errors; reported on the console and otherwise ignored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("There is no such command: {0}")]
    UnknownCommand(String),

    #[error("Time between events can't be less than one second (currently {current})")]
    RateFloor { current: u64 },
}
