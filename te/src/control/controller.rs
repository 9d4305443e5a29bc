//! Controller - the control task loop

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::state::RuntimeState;

use super::command::Command;
use super::console::Console;
use super::dispatch::dispatch;
use super::input::InputLine;

/// Counters reported by the controller when it stops
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlStats {
    /// Commands applied
    pub applied: u64,
    /// Unknown or refused commands
    pub refused: u64,
}

/// Reads command tokens and applies them to the shared state
pub struct Controller<C: Console> {
    state: Arc<RuntimeState>,
    console: C,
    stats: ControlStats,
}

impl<C: Console> Controller<C> {
    pub fn new(state: Arc<RuntimeState>, console: C) -> Self {
        debug!("Controller::new: called");
        Self {
            state,
            console,
            stats: ControlStats::default(),
        }
    }

    /// Run until `exit` is handled or input ends
    ///
    /// End of input stops the state just like `exit`.
    pub async fn run(mut self, mut lines: mpsc::Receiver<InputLine>) -> ControlStats {
        info!("Controller starting");

        while let Some(line) = lines.recv().await {
            let keep_reading = self.handle_line(&line.text);
            line.acknowledge(keep_reading);
            if !keep_reading {
                break;
            }
        }

        if !self.state.is_stopped() {
            info!("Input ended, stopping");
            self.state.stop();
        }

        info!(applied = self.stats.applied, refused = self.stats.refused, "Controller stopped");
        self.stats
    }

    /// Handle every whitespace-separated token on `line`, in order
    ///
    /// Returns false once the state is stopped; later tokens are dropped.
    pub fn handle_line(&mut self, line: &str) -> bool {
        for token in line.split_whitespace() {
            if self.state.is_stopped() {
                break;
            }
            self.handle_token(token);
        }
        !self.state.is_stopped()
    }

    /// Parse and apply a single token
    pub fn handle_token(&mut self, token: &str) {
        let result = token
            .parse::<Command>()
            .and_then(|command| dispatch(&self.state, command));
        match result {
            Ok(reply) => {
                self.stats.applied += 1;
                self.console.reply(&reply);
            }
            Err(e) => {
                warn!(%token, error = %e, "Command refused");
                self.stats.refused += 1;
                self.console.refuse(&e);
            }
        }
    }

    pub fn stats(&self) -> ControlStats {
        self.stats
    }
}
