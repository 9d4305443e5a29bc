//! Command interpreter
//!
//! `dispatch` applies one command to the shared state. It only reads or
//! atomically replaces attributes, so it never blocks.

use std::fmt;

use tracing::debug;

use crate::recorder::Recorder;
use crate::state::RuntimeState;

use super::command::Command;
use super::error::ControlError;

/// Successful outcome of a command, rendered on the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Time(String),
    Date(String),
    Interval(u64),
    Paused,
    Resumed,
    Level(Recorder),
    Generated(u64),
    Help,
    Stopping,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time(time) => write!(f, "{}", time),
            Self::Date(date) => write!(f, "{}", date),
            Self::Interval(secs) => write!(f, "Now time between events equals {}", secs),
            Self::Paused => write!(f, "Events generating is stopped"),
            Self::Resumed => write!(f, "Events generating is resumed"),
            Self::Level(recorder) => write!(f, "Logging level {}", recorder.level()),
            Self::Generated(count) => write!(f, "Generated events {}", count),
            Self::Help => {
                write!(f, "Commands:")?;
                for command in Command::ALL {
                    write!(f, "\n  {:<8} {}", command.name(), command.description())?;
                }
                Ok(())
            }
            Self::Stopping => write!(f, "Stopping"),
        }
    }
}

/// Apply `command` to `state`
pub fn dispatch(state: &RuntimeState, command: Command) -> Result<Reply, ControlError> {
    debug!(%command, "dispatch: called");
    let reply = match command {
        Command::Time => Reply::Time(state.current_record().time.clone()),
        Command::Date => Reply::Date(state.current_record().date.clone()),
        Command::Faster => match state.faster() {
            Some(secs) => Reply::Interval(secs),
            None => {
                return Err(ControlError::RateFloor {
                    current: state.interval_secs(),
                });
            }
        },
        Command::Slower => Reply::Interval(state.slower()),
        Command::Pause => {
            state.pause();
            Reply::Paused
        }
        Command::Resume => {
            state.resume();
            Reply::Resumed
        }
        Command::Level(recorder) => {
            state.set_recorder(recorder);
            Reply::Level(recorder)
        }
        Command::Stat => Reply::Generated(state.records_generated()),
        Command::Help => Reply::Help,
        Command::Exit => {
            state.stop();
            Reply::Stopping
        }
    };
    Ok(reply)
}
