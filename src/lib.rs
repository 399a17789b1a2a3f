//! Access logging for request handlers.
//!
//! Wrap any [`Handler`](domain::ports::Handler) with [`with_log`] to get one
//! `<METHOD> <PATH?QUERY> <STATUS> "<USER-AGENT>"` line per response, or with
//! [`with_custom_log`] to report the committed status some other way.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{with_custom_log, with_log, AccessLog, CapturingSink};
