//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// ThreadEvents - generate, record and steer events from the console
#[derive(Debug, Parser)]
#[command(
    name = "te",
    author,
    version,
    about = "Generate events, record them at a live-adjustable verbosity, steer them from the console",
    after_help = "Console commands: time date faster slower pause resume level0 level1 level2 stat help exit"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Override the file records are appended to
    #[arg(short, long, help = "File records are appended to")]
    pub sink: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::try_parse_from(["te"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.sink.is_none());
    }

    #[test]
    fn test_parse_all_args() {
        let cli = Cli::try_parse_from(["te", "-c", "te.yml", "--log-level", "debug", "--sink", "out.log"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("te.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.sink, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn test_rejects_positional_args() {
        assert!(Cli::try_parse_from(["te", "extra"]).is_err());
    }
}
