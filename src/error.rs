// src/error.rs

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::storage::StoreError;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request, with the offending field when known
    BadRequest {
        message: String,
        field: Option<String>,
    },

    // 404 Not Found
    NotFound(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            field: None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON `{message, field?}` body with the matching status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Internal Server Error" }),
                )
            }
            AppError::BadRequest { message, field } => match field {
                Some(field) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "message": message, "field": field }),
                ),
                None => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            },
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "message": msg })),
        };

        (status, Json(body)).into_response()
    }
}

/// Converts store failures: validation problems become 400s, outages 500s.
/// Allows using `?` operator on storage calls.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { message, field } => AppError::BadRequest { message, field },
            StoreError::Unavailable(detail) => AppError::InternalServerError(detail),
        }
    }
}

/// A body that is JSON but not the expected shape. Names the field when
/// serde does.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        AppError::BadRequest {
            field: offending_field(&message),
            message,
        }
    }
}

/// A body axum could not read as JSON at all (bad syntax, wrong content
/// type). Always a 400 so clients get the same error shape.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(rejection.body_text())
    }
}

/// Pulls the field name out of serde's "missing field `x`" style messages.
fn offending_field(message: &str) -> Option<String> {
    if !message.starts_with("missing field") && !message.starts_with("unknown field") {
        return None;
    }
    let start = message.find('`')? + 1;
    let len = message[start..].find('`')?;
    Some(message[start..start + len].to_string())
}
