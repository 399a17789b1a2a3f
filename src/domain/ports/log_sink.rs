use std::fmt;
use std::sync::Arc;

/// Accepts formatted access lines. What happens to them, and whether that can
/// fail, is up to the implementation.
pub trait LogSink: Send + Sync {
    fn emit(&self, args: fmt::Arguments<'_>);
}

impl<L: LogSink + ?Sized> LogSink for Arc<L> {
    fn emit(&self, args: fmt::Arguments<'_>) {
        (**self).emit(args)
    }
}
