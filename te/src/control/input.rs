//! Console input collaborator
//!
//! Lines are read with rustyline on a dedicated OS thread (readline blocks)
//! and forwarded to the control task over a channel. After each line the
//! reader waits for the control task to say whether to keep reading, so it
//! never re-enters readline once `exit` was handled.

use std::io::{self, Write};

use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

/// One line of console input
#[derive(Debug)]
pub struct InputLine {
    pub text: String,
    done: Option<oneshot::Sender<bool>>,
}

impl InputLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: None,
        }
    }

    /// A line whose sender waits to learn whether input should continue
    pub fn with_ack(text: impl Into<String>) -> (Self, oneshot::Receiver<bool>) {
        let (tx, rx) = oneshot::channel();
        let line = Self {
            text: text.into(),
            done: Some(tx),
        };
        (line, rx)
    }

    /// Tell the sender whether to keep reading
    pub fn acknowledge(self, keep_reading: bool) {
        if let Some(done) = self.done {
            let _ = done.send(keep_reading);
        }
    }
}

impl From<&str> for InputLine {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Start reading console lines, returning the receiving end
///
/// The channel closes when input ends (Ctrl-D or a closed pipe).
pub fn spawn_line_reader(buffer: usize) -> Result<mpsc::Receiver<InputLine>> {
    let (tx, rx) = mpsc::channel(buffer);
    std::thread::Builder::new()
        .name("te-input".to_string())
        .spawn(move || read_lines(tx))
        .context("Failed to spawn input thread")?;
    Ok(rx)
}

/// What the reader does with one readline result
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Forward(String),
    Prompt,
    Stop,
}

/// Classify a readline result, echoing to `out` what the prompt swallowed
fn step(result: Result<String, ReadlineError>, out: &mut impl Write) -> Step {
    match result {
        Ok(line) => {
            let input = line.trim();
            if input.is_empty() {
                Step::Prompt
            } else {
                Step::Forward(input.to_string())
            }
        }
        Err(ReadlineError::Interrupted) => {
            // Ctrl+C at the prompt - just show a new prompt
            let _ = writeln!(out, "^C");
            Step::Prompt
        }
        Err(ReadlineError::Eof) => {
            // Leave the prompt line so later output starts on its own line
            let _ = writeln!(out);
            info!("Console input closed");
            Step::Stop
        }
        Err(e) => {
            error!(error = %e, "Readline error");
            Step::Stop
        }
    }
}

fn read_lines(tx: mpsc::Sender<InputLine>) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            error!(error = %e, "Failed to initialize readline");
            eprintln!("{} {}", "Failed to initialize readline:".red(), e);
            return;
        }
    };

    loop {
        let input = match step(rl.readline("> "), &mut io::stdout()) {
            Step::Forward(input) => input,
            Step::Prompt => continue,
            Step::Stop => break,
        };
        let _ = rl.add_history_entry(input.as_str());

        let (line, ack) = InputLine::with_ack(input);
        if tx.blocking_send(line).is_err() {
            debug!("read_lines: control task gone");
            break;
        }
        match ack.blocking_recv() {
            Ok(true) => continue,
            _ => break,
        }
    }
}
