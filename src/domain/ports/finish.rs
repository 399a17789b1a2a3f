use axum::http::StatusCode;

use crate::domain::entities::Request;

/// Single-use callback receiving the status a response was committed with.
pub trait Finish {
    fn finish(self, status: StatusCode);
}

impl<F: FnOnce(StatusCode)> Finish for F {
    fn finish(self, status: StatusCode) {
        self(status)
    }
}

/// Produces the per-request [`Finish`] callback.
///
/// The callback is built from the request when it arrives and must own
/// whatever it needs from it; the request is not available when it fires.
pub trait FinishFactory: Send + Sync {
    type Callback: Finish;

    fn on_request(&self, request: &Request) -> Self::Callback;
}

impl<F, C> FinishFactory for F
where
    F: Fn(&Request) -> C + Send + Sync,
    C: Finish,
{
    type Callback = C;

    fn on_request(&self, request: &Request) -> C {
        self(request)
    }
}
