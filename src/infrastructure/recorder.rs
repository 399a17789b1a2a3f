use axum::body::Body;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use crate::domain::ports::ResponseSink;
use crate::domain::{SinkError, DEFAULT_STATUS};

/// In-memory [`ResponseSink`] that keeps everything written to it.
///
/// The first committed status wins. Later `write_status` calls are ignored,
/// the way a real connection ignores a second status line.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    closed: bool,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status the response was committed with, if anything was written.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Rejects all further body writes with [`SinkError::Closed`].
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// An uncommitted recorder becomes an empty `200 OK`.
    pub fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(DEFAULT_STATUS);
        *response.headers_mut() = self.headers;
        response
    }
}

impl ResponseSink for ResponseRecorder {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        match self.status {
            Some(committed) => tracing::warn!(
                committed = committed.as_u16(),
                ignored = status.as_u16(),
                "superfluous write_status"
            ),
            None => self.status = Some(status),
        }
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, SinkError> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        if self.status.is_none() {
            self.status = Some(DEFAULT_STATUS);
        }
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}
