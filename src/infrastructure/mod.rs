pub mod config;
pub mod log_sinks;
pub mod recorder;

pub use config::{AccessLogConfig, Config, ConfigError, LogConfig, ServerConfig, SinkKind};
pub use log_sinks::{SharedBuffer, TracingLogSink, WriterLogSink};
pub use recorder::ResponseRecorder;
