//! Control plane
//!
//! Console tokens are parsed into a [`Command`], applied to the shared state
//! by [`dispatch`], and the outcome is shown through a [`Console`].

mod command;
mod console;
mod controller;
mod dispatch;
mod error;
mod input;

pub use command::Command;
pub use console::{Console, Terminal};
pub use controller::{ControlStats, Controller};
pub use dispatch::{Reply, dispatch};
pub use error::ControlError;
pub use input::{InputLine, spawn_line_reader};
