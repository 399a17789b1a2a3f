mod tracing_sink;
mod writer;

#[cfg(test)]
pub(crate) use tracing_sink::capture_events;
pub use tracing_sink::TracingLogSink;
pub use writer::{SharedBuffer, WriterLogSink};
