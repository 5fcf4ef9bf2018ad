//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting actix
//! handlers turn failures into the wire contract's `{"error": ...}`
//! envelope with a deterministic status code per error category.

use actix_web::error::JsonPayloadError;
use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde_json::{json, Value};
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::StoreUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Render the `{"error": ...}` body.
///
/// Validation failures carry their per-field list; 500-class errors are
/// redacted to a generic string and the detail stays in the logs.
fn response_body(err: &Error) -> Value {
    match err.code() {
        ErrorCode::StoreUnavailable => json!({ "error": "document store unavailable" }),
        ErrorCode::InternalError => json!({ "error": "internal server error" }),
        ErrorCode::InvalidRequest | ErrorCode::NotFound => match err.details() {
            Some(details) => json!({ "error": details }),
            None => json!({ "error": err.message() }),
        },
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            error!(code = ?self.code(), message = %self.message(), "request failed");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = TraceId::current() {
            builder.insert_header(("trace-id", id.to_string()));
        }
        builder.json(response_body(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak framework detail to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal("internal server error")
    }
}

/// Map body deserialisation failures onto the shared error envelope.
///
/// Registered via `web::JsonConfig` so a malformed body or a field of the
/// wrong type is a 400 in the contract shape instead of actix's default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid request body: {err}")).into()
}
