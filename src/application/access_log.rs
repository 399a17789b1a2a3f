use std::sync::Arc;

use crate::application::capture::CapturingSink;
use crate::application::formats::DefaultFormat;
use crate::domain::ports::{FinishFactory, Handler, LogSink, ResponseSink};
use crate::domain::Request;

/// A [`Handler`] that behaves exactly like the one it wraps and additionally
/// reports each response's status to a per-request finish callback.
///
/// The callback fires on the wrapped handler's first `write_status` or `write`.
/// A handler that produces no output at all produces no report. Panics from the
/// wrapped handler are not caught here.
pub struct AccessLog<H, F> {
    handler: H,
    factory: F,
}

impl<H, F> AccessLog<H, F> {
    pub fn new(handler: H, factory: F) -> Self {
        Self { handler, factory }
    }
}

impl<H: Handler, F: FinishFactory> Handler for AccessLog<H, F> {
    fn serve(&self, request: &Request, response: &mut dyn ResponseSink) {
        let on_finish = self.factory.on_request(request);
        let mut capture = CapturingSink::new(response, on_finish);
        self.handler.serve(request, &mut capture);
    }
}

/// Wraps `handler` so each request's finish callback comes from `factory`.
pub fn with_custom_log<H, F>(handler: H, factory: F) -> AccessLog<H, F>
where
    H: Handler,
    F: FinishFactory,
{
    AccessLog::new(handler, factory)
}

/// Wraps `handler` so every response with output writes one
/// `<METHOD> <PATH?QUERY> <STATUS> "<USER-AGENT>"` line to `sink`.
pub fn with_log<H, L>(handler: H, sink: Arc<L>) -> AccessLog<H, DefaultFormat<L>>
where
    H: Handler,
    L: LogSink + ?Sized,
{
    with_custom_log(handler, DefaultFormat::new(sink))
}
