use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use crate::domain::ports::LogSink;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S ";

/// Writes each access line to an [`io::Write`], one line per call.
///
/// A newline is appended unless the line already ends with one. Lines are
/// optionally preceded by a fixed prefix and a UTC timestamp. Write failures
/// are reported through `tracing` and otherwise dropped.
pub struct WriterLogSink<W> {
    writer: Mutex<W>,
    prefix: String,
    timestamps: bool,
}

impl<W: Write + Send> WriterLogSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            prefix: String::new(),
            timestamps: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    fn render(&self, args: fmt::Arguments<'_>) -> String {
        let mut line = self.prefix.clone();
        if self.timestamps {
            let _ = write!(line, "{}", Utc::now().format(TIMESTAMP_FORMAT));
        }
        let _ = line.write_fmt(args);
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}

impl WriterLogSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterLogSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LogSink for WriterLogSink<W> {
    fn emit(&self, args: fmt::Arguments<'_>) {
        let line = self.render(args);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.write_all(line.as_bytes()).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "failed to write access log line");
        }
    }
}

/// Cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
