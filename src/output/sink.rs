//! Status line sinks.
//!
//! Every sink stamps lines with local wall-clock time, writes exactly one
//! line per call and flushes before returning.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Local;
use thiserror::Error;

use crate::output::format::timestamped;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot open output file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write status line: {0}")]
    Write(#[from] io::Error),
}

/// Destination for status lines.
pub trait Sink: Send + Sync {
    fn write(&self, line: &str) -> Result<(), SinkError>;
}

/// Writes to standard output.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", timestamped(&Local::now(), line))?;
        out.flush()?;
        Ok(())
    }
}

/// Appends to a file, creating it if needed.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let open_err = |source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        };
        let path = std::path::absolute(path).map_err(open_err)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_err)?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        let mut file = self.file.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(file, "{}", timestamped(&Local::now(), line))?;
        file.flush()?;
        Ok(())
    }
}

/// Pick the sink for `file`: the file when given, stdout otherwise.
pub fn open_sink(file: Option<&Path>) -> Result<Arc<dyn Sink>, SinkError> {
    match file {
        Some(path) => {
            let sink = FileSink::open(path)?;
            tracing::info!(path = %sink.path().display(), "Writing status lines to file");
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(ConsoleSink)),
    }
}
