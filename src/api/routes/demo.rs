use axum::http::{header, HeaderValue, StatusCode};

use crate::domain::ports::{Handler, ResponseSink};
use crate::domain::{Request, SinkError};

/// Small plain handler used by the bundled server:
///
/// - `/hello` writes `hello\n` as text
/// - `/status/{code}` commits `code` with no body
/// - `/echo` writes the request body back
/// - `/silent` writes nothing
/// - anything else is `404 not found`
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoHandler;

impl Handler for DemoHandler {
    fn serve(&self, request: &Request, response: &mut dyn ResponseSink) {
        let path = request.uri().path();
        let result = match path {
            "/hello" => text(response, StatusCode::OK, "hello\n"),
            "/echo" => echo(request, response),
            "/silent" => Ok(()),
            _ => match path.strip_prefix("/status/").map(parse_status) {
                Some(Some(status)) => {
                    response.write_status(status);
                    Ok(())
                }
                Some(None) => text(response, StatusCode::BAD_REQUEST, "invalid status code\n"),
                None => text(response, StatusCode::NOT_FOUND, "not found\n"),
            },
        };

        if let Err(e) = result {
            tracing::debug!(error = %e, path, "Failed to write response body");
        }
    }
}

fn parse_status(code: &str) -> Option<StatusCode> {
    code.parse::<u16>()
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok())
}

fn text(response: &mut dyn ResponseSink, status: StatusCode, body: &str) -> Result<(), SinkError> {
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response.write_status(status);
    response.write(body.as_bytes()).map(|_| ())
}

fn echo(request: &Request, response: &mut dyn ResponseSink) -> Result<(), SinkError> {
    if let Some(content_type) = request.headers().get(header::CONTENT_TYPE) {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type.clone());
    }
    response.write(request.body()).map(|_| ())
}
