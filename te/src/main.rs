//! ThreadEvents - generator, writer and control tasks
//!
//! CLI entry point: wires the three tasks to one shared state and waits for
//! `exit`, end of input, or a termination signal.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use threadevents::cli::Cli;
use threadevents::config::Config;
use threadevents::{
    Controller, FileSink, Generator, RecordFactory, RuntimeState, Terminal, Writer, spawn_line_reader,
    wait_for_shutdown,
};

/// Lines buffered between the input thread and the control task
const INPUT_BUFFER: usize = 16;

fn parse_level(level_str: Option<&str>) -> tracing::Level {
    match level_str.map(|s| s.to_uppercase()) {
        None => tracing::Level::INFO,
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("threadevents")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = parse_level(cli_log_level.or(config_log_level));

    let log_file = fs::File::create(log_dir.join("threadevents.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_thread_names(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives
#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::select! {
        _ = sigint.recv() => warn!("SIGINT received"),
        _ = sigterm.recv() => warn!("SIGTERM received"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    warn!("Ctrl+C received");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    if let Some(sink) = cli.sink {
        config.recording.sink_path = sink;
    }
    config.validate().context("Invalid configuration")?;
    debug!(?config, "main: configuration loaded");

    // First record is fabricated before any task starts
    let mut factory = RecordFactory::new(config.generation.samples());
    let state = RuntimeState::new(
        factory.fabricate(0),
        config.recording.verbosity,
        config.generation.interval(),
    )
    .shared();

    let sink = FileSink::open(&config.recording.sink_path);
    info!(
        sink = %sink.path().display(),
        verbosity = %config.recording.verbosity,
        interval_secs = config.generation.interval_secs,
        "ThreadEvents starting"
    );
    println!(
        "Recording events to {} (type {} for commands)",
        sink.path().display().to_string().cyan(),
        "help".green()
    );

    let generator = Generator::new(state.clone(), factory, config.generation.pause_poll());
    let generator_handle = tokio::spawn(generator.run());
    let writer_handle = tokio::spawn(Writer::new(state.clone(), sink).run());

    let lines = spawn_line_reader(INPUT_BUFFER)?;
    let controller = Controller::new(state.clone(), Terminal);
    let controller_handle = tokio::spawn(controller.run(lines));

    let control_stats = wait_for_shutdown(&state, controller_handle, shutdown_signal()).await;
    debug!(?control_stats, "main: control task finished");

    // The controller stops the state on exit and on end of input
    state.stop();

    let published = generator_handle.await.context("Generator task failed")?;
    let stats = writer_handle.await.context("Writer task failed")?;

    info!(published, written = stats.written, failed = stats.failed, "ThreadEvents stopped");
    println!(
        "Generated {} events, recorded {} ({} failed)",
        state.records_generated(),
        stats.written,
        stats.failed
    );
    Ok(())
}
