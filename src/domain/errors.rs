use thiserror::Error;

/// Failure reported by a [`ResponseSink`](crate::domain::ports::ResponseSink) when
/// body bytes cannot be delivered.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("response sink is closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
