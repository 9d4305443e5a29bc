//! Console output for the control task

use colored::Colorize;

use super::dispatch::Reply;
use super::error::ControlError;

/// Where command outcomes are shown
pub trait Console: Send {
    /// Show a successful reply
    fn reply(&mut self, reply: &Reply);

    /// Show a refused or unknown command
    fn refuse(&mut self, error: &ControlError);
}

/// Replies on stdout, refusals on stderr
#[derive(Debug, Default)]
pub struct Terminal;

impl Console for Terminal {
    fn reply(&mut self, reply: &Reply) {
        println!("{}", reply);
    }

    fn refuse(&mut self, error: &ControlError) {
        eprintln!("{}", error.to_string().red());
    }
}
