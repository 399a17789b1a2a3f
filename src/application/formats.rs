use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;

use crate::domain::ports::{Finish, FinishFactory, LogSink};
use crate::domain::{AccessLine, Request};

/// Finish factory writing the standard access line to a [`LogSink`].
pub struct DefaultFormat<L: ?Sized> {
    sink: Arc<L>,
}

impl<L: ?Sized> DefaultFormat<L> {
    pub fn new(sink: Arc<L>) -> Self {
        Self { sink }
    }
}

impl<L: LogSink + ?Sized> FinishFactory for DefaultFormat<L> {
    type Callback = LogLine<L>;

    fn on_request(&self, request: &Request) -> LogLine<L> {
        LogLine {
            line: AccessLine::from_request(request),
            sink: self.sink.clone(),
        }
    }
}

pub struct LogLine<L: ?Sized> {
    line: AccessLine,
    sink: Arc<L>,
}

impl<L: LogSink + ?Sized> Finish for LogLine<L> {
    fn finish(self, status: StatusCode) {
        self.sink.emit(format_args!("{}", self.line.format(status)));
    }
}

/// Like [`DefaultFormat`], with the time from request arrival to the committed
/// status appended as `<n>ms`.
pub struct Timed<L: ?Sized> {
    sink: Arc<L>,
}

impl<L: ?Sized> Timed<L> {
    pub fn new(sink: Arc<L>) -> Self {
        Self { sink }
    }
}

impl<L: LogSink + ?Sized> FinishFactory for Timed<L> {
    type Callback = TimedLine<L>;

    fn on_request(&self, request: &Request) -> TimedLine<L> {
        TimedLine {
            line: AccessLine::from_request(request),
            started: Instant::now(),
            sink: self.sink.clone(),
        }
    }
}

pub struct TimedLine<L: ?Sized> {
    line: AccessLine,
    started: Instant,
    sink: Arc<L>,
}

impl<L: LogSink + ?Sized> Finish for TimedLine<L> {
    fn finish(self, status: StatusCode) {
        self.sink.emit(format_args!(
            "{} {}ms",
            self.line.format(status),
            self.started.elapsed().as_millis()
        ));
    }
}

/// Finish factory reporting through `tracing` as structured fields rather than
/// a preformatted line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFormat;

impl FinishFactory for TracingFormat {
    type Callback = TracedLine;

    fn on_request(&self, request: &Request) -> TracedLine {
        TracedLine {
            line: AccessLine::from_request(request),
            started: Instant::now(),
        }
    }
}

pub struct TracedLine {
    line: AccessLine,
    started: Instant,
}

impl Finish for TracedLine {
    fn finish(self, status: StatusCode) {
        tracing::info!(
            target: "access_log",
            method = %self.line.method,
            uri = %self.line.target,
            status = status.as_u16(),
            user_agent = %String::from_utf8_lossy(&self.line.user_agent),
            duration_ms = self.started.elapsed().as_millis() as u64,
            "Request completed"
        );
    }
}
