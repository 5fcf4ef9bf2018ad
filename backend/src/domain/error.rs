//! Domain-level error type.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps them
//! to status codes and the `{"error": ...}` response envelope; nothing in
//! this module knows about actix.

use serde::Serialize;
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
///
/// The set is deliberately closed: every failure a handler can observe is
/// mapped onto exactly one of these categories, which in turn map
/// deterministically onto HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The requested user does not exist.
    NotFound,
    /// The document store could not be reached.
    StoreUnavailable,
    /// An unexpected error occurred inside the service.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is never blank; blank input is replaced at construction.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Messages originating in this crate are literals or formatted from
    /// non-empty parts, but store adapters forward driver-supplied text
    /// verbatim, so a blank message is substituted rather than rejected.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "unspecified error".to_owned();
        }
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details, e.g. the per-field validation list.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad payload")
    ///     .with_details(json!([{ "field": "name" }]));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
    #[case(Error::not_found("missing"), ErrorCode::NotFound)]
    #[case(Error::store_unavailable("down"), ErrorCode::StoreUnavailable)]
    #[case(Error::internal("boom"), ErrorCode::InternalError)]
    fn constructors_set_expected_code(#[case] error: Error, #[case] code: ErrorCode) {
        assert_eq!(error.code(), code);
    }

    #[test]
    fn with_details_round_trips() {
        let details = json!([{ "field": "email", "code": "invalid_email" }]);
        let error = Error::invalid_request("validation failed").with_details(details.clone());
        assert_eq!(error.details(), Some(&details));
        assert_eq!(error.to_string(), "validation failed");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_messages_fall_back_to_a_default(#[case] message: &str) {
        let error = Error::store_unavailable(message);
        assert_eq!(error.code(), ErrorCode::StoreUnavailable);
        assert_eq!(error.message(), "unspecified error");
    }

    #[test]
    fn error_codes_serialise_as_snake_case() {
        let encoded = serde_json::to_string(&ErrorCode::StoreUnavailable).expect("serialise");
        assert_eq!(encoded, "\"store_unavailable\"");
    }
}
