//! HTTP response building module
//!
//! Provides builders for the plain-text, JSON and file responses the handlers
//! produce. Builder failures are logged and degrade to an empty response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build a plain-text response
pub fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::from_static(body.as_bytes())))
        })
}

/// Build a compact JSON response
pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying raw file bytes
pub fn file_response(data: Vec<u8>, content_type: &str) -> Response<Full<Bytes>> {
    let content_length = data.len();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(Bytes::from(data)))
        .unwrap_or_else(|e| {
            log_build_error(StatusCode::OK, &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// 404 for unmatched routes
pub fn build_404_response() -> Response<Full<Bytes>> {
    text_response(StatusCode::NOT_FOUND, "Not Found")
}

/// 404 for unknown user ids
pub fn user_not_found() -> Response<Full<Bytes>> {
    text_response(StatusCode::NOT_FOUND, "User not found")
}

/// 404 for missing or unreadable files
pub fn file_not_found() -> Response<Full<Bytes>> {
    text_response(StatusCode::NOT_FOUND, "File not found")
}

/// 400 for bodies that are not a JSON user payload
pub fn invalid_json() -> Response<Full<Bytes>> {
    text_response(StatusCode::BAD_REQUEST, "Invalid JSON")
}

/// 400 for bodies that could not be read
pub fn build_400_response() -> Response<Full<Bytes>> {
    text_response(StatusCode::BAD_REQUEST, "Bad Request")
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    text_response(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large")
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
