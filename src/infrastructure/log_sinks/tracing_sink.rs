use std::fmt;

use crate::domain::ports::LogSink;

/// Forwards access lines as `info` events on the `access_log` target.
///
/// Timestamps are left to the subscriber.
#[derive(Debug, Clone, Default)]
pub struct TracingLogSink {
    prefix: String,
}

impl TracingLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

impl LogSink for TracingLogSink {
    fn emit(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "access_log", "{}{}", self.prefix, args);
    }
}

/// Runs `f` with a subscriber that renders events into a string, and returns
/// what was rendered.
#[cfg(test)]
pub(crate) fn capture_events(f: impl FnOnce()) -> String {
    use crate::infrastructure::log_sinks::SharedBuffer;

    let buffer = SharedBuffer::new();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}
