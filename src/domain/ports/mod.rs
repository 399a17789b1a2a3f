mod finish;
mod handler;
mod log_sink;
mod response_sink;

pub use finish::{Finish, FinishFactory};
pub use handler::{handler_fn, Handler, HandlerFn};
pub use log_sink::LogSink;
pub use response_sink::ResponseSink;
