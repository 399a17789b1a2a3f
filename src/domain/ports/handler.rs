use std::sync::Arc;

use crate::domain::entities::Request;
use crate::domain::ports::ResponseSink;

/// A unit of request handling. Called once per request; all output goes
/// through the sink.
pub trait Handler: Send + Sync {
    fn serve(&self, request: &Request, response: &mut dyn ResponseSink);
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve(&self, request: &Request, response: &mut dyn ResponseSink) {
        (**self).serve(request, response)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve(&self, request: &Request, response: &mut dyn ResponseSink) {
        (**self).serve(request, response)
    }
}

/// Adapter turning a plain function or closure into a [`Handler`].
#[derive(Clone, Copy)]
pub struct HandlerFn<F>(F);

pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&Request, &mut dyn ResponseSink) + Send + Sync,
{
    HandlerFn(f)
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&Request, &mut dyn ResponseSink) + Send + Sync,
{
    fn serve(&self, request: &Request, response: &mut dyn ResponseSink) {
        (self.0)(request, response)
    }
}
