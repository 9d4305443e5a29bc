//! Durable append-only destinations for rendered records

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, error};

/// Errors from sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Destination the writer appends rendered records to
pub trait Sink: Send {
    /// Append one rendered block
    fn append(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Append-only text file
///
/// The file is opened once and never truncated. If opening fails the error is
/// reported and the next append tries to open it again.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    /// Open `path` for appending, creating it if missing
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), "FileSink::open: called");
        let mut sink = Self { path, writer: None };
        if let Err(e) = sink.writer() {
            error!(error = %e, "FileSink: could not open sink");
        }
        sink
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the underlying file is currently open
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, SinkError> {
        let writer = match self.writer.take() {
            Some(writer) => writer,
            None => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .map_err(|source| SinkError::Open {
                        path: self.path.clone(),
                        source,
                    })?;
                BufWriter::new(file)
            }
        };
        Ok(self.writer.insert(writer))
    }
}

impl Sink for FileSink {
    fn append(&mut self, text: &str) -> Result<(), SinkError> {
        let writer = self.writer()?;
        let result = writer.write_all(text.as_bytes()).and_then(|_| writer.flush());
        result.map_err(|source| SinkError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// In-memory sink whose contents can be read from a cloned handle
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything appended so far
    pub fn contents(&self) -> String {
        self.buffer.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

impl Sink for MemorySink {
    fn append(&mut self, text: &str) -> Result<(), SinkError> {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push_str(text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_appends_without_truncating() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut sink = FileSink::open(&path);
        assert!(sink.is_open());
        sink.append("level 0\n").unwrap();
        sink.append("level 1\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier run\nlevel 0\nlevel 1\n");
    }

    #[test]
    fn test_file_sink_reports_open_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("events.log");

        let mut sink = FileSink::open(&path);
        assert!(!sink.is_open());

        let err = sink.append("level 0\n").unwrap_err();
        assert!(matches!(err, SinkError::Open { .. }));
        assert!(err.to_string().contains("events.log"));
    }

    #[test]
    fn test_file_sink_recovers_once_destination_exists() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir = temp_dir.path().join("later");
        let path = dir.join("events.log");

        let mut sink = FileSink::open(&path);
        assert!(sink.append("lost\n").is_err());

        std::fs::create_dir_all(&dir).unwrap();
        sink.append("kept\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let mut handle = sink.clone();
        handle.append("a").unwrap();
        handle.append("b").unwrap();
        assert_eq!(sink.contents(), "ab");
    }
}
