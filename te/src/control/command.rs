//! Console commands

use std::fmt;
use std::str::FromStr;

use crate::recorder::Recorder;

use super::error::ControlError;

/// Every command the control task understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the time of the current record
    Time,
    /// Print the date of the current record
    Date,
    /// Shorten the generation interval by one second
    Faster,
    /// Lengthen the generation interval by one second
    Slower,
    /// Suspend generation
    Pause,
    /// Resume generation
    Resume,
    /// Select a recorder variant
    Level(Recorder),
    /// Print how many records were generated
    Stat,
    /// Print the command list
    Help,
    /// Stop every task
    Exit,
}

impl Command {
    /// The command table, in help order
    pub const ALL: [Command; 12] = [
        Command::Time,
        Command::Date,
        Command::Faster,
        Command::Slower,
        Command::Pause,
        Command::Resume,
        Command::Level(Recorder::Minimal),
        Command::Level(Recorder::Standard),
        Command::Level(Recorder::Detailed),
        Command::Stat,
        Command::Help,
        Command::Exit,
    ];

    /// Token that invokes this command
    pub fn name(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Date => "date",
            Self::Faster => "faster",
            Self::Slower => "slower",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Level(Recorder::Minimal) => "level0",
            Self::Level(Recorder::Standard) => "level1",
            Self::Level(Recorder::Detailed) => "level2",
            Self::Stat => "stat",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// One-line description for help output
    pub fn description(self) -> &'static str {
        match self {
            Self::Time => "print the time of the current event",
            Self::Date => "print the date of the current event",
            Self::Faster => "generate events one second more often",
            Self::Slower => "generate events one second less often",
            Self::Pause => "pause event generation",
            Self::Resume => "resume event generation",
            Self::Level(Recorder::Minimal) => "log id and time",
            Self::Level(Recorder::Standard) => "log id, date, time and first value",
            Self::Level(Recorder::Detailed) => "log id, date, time and all values",
            Self::Stat => "print how many events were generated",
            Self::Help => "show this list",
            Self::Exit => "stop and quit",
        }
    }
}

impl FromStr for Command {
    type Err = ControlError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == token)
            .ok_or_else(|| ControlError::UnknownCommand(token.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_every_name() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = Command::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Command::ALL.len());
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("level0".parse(), Ok(Command::Level(Recorder::Minimal)));
        assert_eq!("level2".parse(), Ok(Command::Level(Recorder::Detailed)));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "EXIT".parse::<Command>(),
            Err(ControlError::UnknownCommand("EXIT".to_string()))
        );
        assert!("level3".parse::<Command>().is_err());
    }
}
