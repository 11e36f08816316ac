//! Response building helpers.
//!
//! Every body this service produces is JSON, on the success path and the
//! failure path alike.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const APPLICATION_JSON: &str = "application/json";

/// Body returned when a request could not be answered.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable identifier.
    pub error: &'static str,
    /// Human readable rendering of the failure.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            error,
            message: message.into(),
        }
    }

    /// Render with the given status and a JSON content type.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Wrap an already serialized JSON document in a 200 response.
pub fn json_ok(body: Vec<u8>) -> Response {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))],
        body,
    )
        .into_response()
}
