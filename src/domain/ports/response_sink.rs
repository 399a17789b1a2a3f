use axum::http::{HeaderMap, StatusCode};

use crate::domain::errors::SinkError;

/// Where a handler writes its response.
///
/// Headers may be changed freely until the status is committed, either by
/// [`write_status`](Self::write_status) or by the first [`write`](Self::write),
/// which commits [`DEFAULT_STATUS`](crate::domain::DEFAULT_STATUS).
///
/// There is intentionally no way to take over the underlying connection through
/// this trait.
pub trait ResponseSink {
    fn headers_mut(&mut self) -> &mut HeaderMap;

    fn write_status(&mut self, status: StatusCode);

    fn write(&mut self, buf: &[u8]) -> Result<usize, SinkError>;
}
