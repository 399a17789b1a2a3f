use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::state::AppState;
use crate::domain::ports::Handler;
use crate::infrastructure::ResponseRecorder;

pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Fallback route: every request not matched elsewhere goes to the configured
/// handler.
pub async fn dispatch(State(state): State<AppState>, request: Request) -> Response {
    serve_handler(state.handler.clone(), request).await
}

/// Runs a [`Handler`] for one axum request.
///
/// The body is buffered first, then the handler runs on the blocking pool
/// against a [`ResponseRecorder`] which becomes the response. A handler that
/// writes nothing yields an empty `200 OK`.
pub async fn serve_handler(handler: Arc<dyn Handler>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(error = %e, limit = MAX_BODY_BYTES, "Request body rejected");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };
    let request = axum::http::Request::from_parts(parts, body);

    let served = tokio::task::spawn_blocking(move || {
        let mut recorder = ResponseRecorder::new();
        handler.serve(&request, &mut recorder);
        recorder
    })
    .await;

    match served {
        Ok(recorder) => recorder.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Handler failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, HeaderValue};

    use super::*;
    use crate::application::with_log;
    use crate::domain::ports::handler_fn;
    use crate::infrastructure::{SharedBuffer, WriterLogSink};

    fn logged<F>(buffer: &SharedBuffer, f: F) -> Arc<dyn Handler>
    where
        F: Fn(&crate::domain::Request, &mut dyn crate::domain::ports::ResponseSink)
            + Send
            + Sync
            + 'static,
    {
        Arc::new(with_log(
            handler_fn(f),
            Arc::new(WriterLogSink::new(buffer.clone())),
        ))
    }

    #[tokio::test]
    async fn test_status_and_headers_reach_client() {
        let buffer = SharedBuffer::new();
        let handler = logged(&buffer, |_req, res| {
            res.headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
            res.write(b"ok\n").unwrap();
        });

        let request = axum::http::Request::builder()
            .uri("/index.html?foo=bar")
            .header(header::USER_AGENT, "user agent/0.1")
            .body(Body::empty())
            .unwrap();
        let response = serve_handler(handler, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ok\n");
        assert_eq!(
            buffer.contents(),
            "GET /index.html?foo=bar 200 \"user agent/0.1\"\n"
        );
    }

    #[tokio::test]
    async fn test_silent_handler_gets_default_response_without_log() {
        let buffer = SharedBuffer::new();
        let handler = logged(&buffer, |_req, _res| {});

        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = serve_handler(handler, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(buffer.contents().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_body_rejected_before_handler() {
        let buffer = SharedBuffer::new();
        let handler = logged(&buffer, |_req, res| res.write_status(StatusCode::OK));

        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/upload")
            .body(Body::from(vec![0u8; MAX_BODY_BYTES + 1]))
            .unwrap();
        let response = serve_handler(handler, request).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(buffer.contents().is_empty());
    }

    #[tokio::test]
    async fn test_handler_panic_becomes_500() {
        let buffer = SharedBuffer::new();
        let handler = logged(&buffer, |_req, res| {
            res.write_status(StatusCode::ACCEPTED);
            panic!("boom");
        });

        let request = axum::http::Request::builder()
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = serve_handler(handler, request).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(buffer.contents(), "GET / 202 \"\"\n");
    }
}
