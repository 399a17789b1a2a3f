//! Application layer - the access-log decorator.
//!
//! [`AccessLog`] wraps any [`Handler`](crate::domain::ports::Handler) and hands
//! it a [`CapturingSink`] in place of the real response sink, so the status a
//! response commits with can be reported exactly once without the handler
//! knowing about it.

pub mod access_log;
pub mod capture;
pub mod formats;

pub use access_log::{with_custom_log, with_log, AccessLog};
pub use capture::{CaptureState, CapturingSink};
pub use formats::{DefaultFormat, LogLine, Timed, TimedLine, TracedLine, TracingFormat};
