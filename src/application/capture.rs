use axum::http::{HeaderMap, StatusCode};

use crate::domain::ports::{Finish, ResponseSink};
use crate::domain::{SinkError, DEFAULT_STATUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Pending,
    Fired,
}

/// Stands in for a real [`ResponseSink`] and fires a finish callback with the
/// committed status on the first `write_status` or `write`, whichever comes
/// first. Every call is forwarded to the wrapped sink afterwards.
///
/// Only the [`ResponseSink`] operations are exposed. A handler receiving this
/// sink cannot reach the connection underneath, even if the wrapped sink
/// could.
pub struct CapturingSink<'a, C> {
    inner: &'a mut dyn ResponseSink,
    on_finish: Option<C>,
}

impl<'a, C: Finish> CapturingSink<'a, C> {
    pub fn new(inner: &'a mut dyn ResponseSink, on_finish: C) -> Self {
        Self {
            inner,
            on_finish: Some(on_finish),
        }
    }

    pub fn state(&self) -> CaptureState {
        match self.on_finish {
            Some(_) => CaptureState::Pending,
            None => CaptureState::Fired,
        }
    }

    fn fire(&mut self, status: StatusCode) {
        if let Some(on_finish) = self.on_finish.take() {
            on_finish.finish(status);
        }
    }
}

impl<C: Finish> ResponseSink for CapturingSink<'_, C> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.inner.headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) {
        self.fire(status);
        self.inner.write_status(status);
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, SinkError> {
        // Nothing committed a status yet, so the sink is about to assume one.
        self.fire(DEFAULT_STATUS);
        self.inner.write(buf)
    }
}
