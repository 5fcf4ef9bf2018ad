//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types stay framework-agnostic, so the error envelope schema is
//! declared here in the adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for the error envelope.
///
/// `error` is a string for not-found and server failures, and a list of
/// `{field, message, code}` objects for validation failures.
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Failure description: a string or a per-field error list.
    error: serde_json::Value,
}
