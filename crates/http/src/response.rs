//! Plain-text response builders

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// Plain-text response carrying the canonical reason phrase, e.g. `Bad Request\n`.
pub fn status_text_response(status: StatusCode) -> Response {
    let body = format!("{}\n", status.canonical_reason().unwrap_or("Unknown Status"));

    let mut response = write_text(status, body);
    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

/// Write `body` verbatim as `text/plain`.
pub fn write_text(status: StatusCode, body: impl Into<String>) -> Response {
    let mut response = (status, body.into()).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
