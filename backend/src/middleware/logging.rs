use std::time::Instant;

use axum::{
    body::{to_bytes, Body, Bytes, HttpBody},
    http::{header::CONTENT_LENGTH, Request},
    middleware::Next,
    response::Response,
};

use super::request_id::RequestId;

const MAX_BUFFERED_BODY_BYTES: usize = 64 * 1024;
const MAX_LOGGED_BODY_BYTES: usize = 2048;

/// Logs every 4xx/5xx response with its body preview; 4xx goes to `warn`, 5xx
/// to `error`. Bodies of known size up to 64 KiB are buffered for the preview.
/// Larger or unsized bodies are forwarded untouched and logged without one.
pub async fn log_error_responses(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    let started = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let latency_ms = started.elapsed().as_millis() as u64;
    let (mut parts, body) = response.into_parts();
    let (body, preview) = match body.size_hint().upper() {
        Some(len) if len <= MAX_BUFFERED_BODY_BYTES as u64 => {
            match to_bytes(body, MAX_BUFFERED_BODY_BYTES).await {
                Ok(bytes) => {
                    let preview = preview(&bytes);
                    (Body::from(bytes), preview)
                }
                Err(err) => {
                    parts.headers.remove(CONTENT_LENGTH);
                    (Body::empty(), format!("<unreadable body: {}>", err))
                }
            }
        }
        Some(len) => (body, format!("<body not buffered, {} bytes>", len)),
        None => (body, "<body not buffered, unknown size>".to_string()),
    };

    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            %method,
            %uri,
            request_id,
            latency_ms,
            body = preview,
            "request failed"
        );
    } else {
        tracing::warn!(
            status = status.as_u16(),
            %method,
            %uri,
            request_id,
            latency_ms,
            body = preview,
            "request rejected"
        );
    }

    Response::from_parts(parts, body)
}

fn preview(bytes: &Bytes) -> String {
    if bytes.len() > MAX_LOGGED_BODY_BYTES {
        format!(
            "{}... (truncated, {} bytes total)",
            String::from_utf8_lossy(&bytes[..MAX_LOGGED_BODY_BYTES]),
            bytes.len()
        )
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}
