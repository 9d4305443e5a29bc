//! Shutdown - waits for the control task or a termination signal

use std::future::Future;

use colored::Colorize;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::control::ControlStats;
use crate::state::RuntimeState;

/// Wait until the control task ends or `signal` resolves
///
/// A delivered signal stops the state and aborts the control task. If the
/// signal handlers could not be installed the failure is reported and the
/// control task alone decides when to stop. Returns the control task's
/// counters when it finished on its own.
pub async fn wait_for_shutdown<F>(
    state: &RuntimeState,
    mut controller: JoinHandle<ControlStats>,
    signal: F,
) -> Option<ControlStats>
where
    F: Future<Output = eyre::Result<()>>,
{
    let signalled = tokio::select! {
        result = &mut controller => return joined(result),
        result = signal => result,
    };

    match signalled {
        Ok(()) => {
            info!("Termination signal, stopping");
            state.stop();
            controller.abort();
            None
        }
        Err(e) => {
            error!(error = %e, "Failed to install signal handlers");
            eprintln!("{} {:#}", "Failed to install signal handlers:".red(), e);
            joined(controller.await)
        }
    }
}

fn joined(result: Result<ControlStats, tokio::task::JoinError>) -> Option<ControlStats> {
    match result {
        Ok(stats) => Some(stats),
        Err(e) => {
            error!(error = %e, "Control task failed");
            None
        }
    }
}
