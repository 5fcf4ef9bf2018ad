//! Per-field validation helpers for inbound payloads.
//!
//! Validation failures are collected rather than short-circuited so a
//! client sees every offending field at once, as a list of
//! `{field, message, code}` objects under the response's `error` key.

use serde_json::{json, Value};

use crate::domain::{Error, UserValidationError};

/// One field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldError {
    field: &'static str,
    message: String,
    code: &'static str,
}

impl FieldError {
    fn to_value(&self) -> Value {
        json!({
            "field": self.field,
            "message": self.message,
            "code": self.code,
        })
    }
}

/// Failure for a field that must be present but was not.
pub(crate) fn missing_field(field: &'static str) -> FieldError {
    FieldError {
        field,
        message: format!("missing required field: {field}"),
        code: "missing",
    }
}

/// Failure for a field that was present but rejected by the domain.
pub(crate) fn invalid_field(field: &'static str, err: &UserValidationError) -> FieldError {
    let code = match err {
        UserValidationError::NameTooShort { .. } => "too_short",
        UserValidationError::NameTooLong { .. } => "too_long",
        UserValidationError::InvalidEmail => "invalid_email",
        UserValidationError::InvalidAge => "invalid_type",
        UserValidationError::EmptyId | UserValidationError::InvalidId => "invalid_id",
    };
    FieldError {
        field,
        message: err.to_string(),
        code,
    }
}

/// Fold collected field failures into one domain error.
pub(crate) fn validation_error(errors: Vec<FieldError>) -> Error {
    let details: Vec<Value> = errors.iter().map(FieldError::to_value).collect();
    Error::invalid_request("user payload failed validation").with_details(Value::Array(details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn missing_field_names_the_field() {
        let error = missing_field("email");
        assert_eq!(
            error.to_value(),
            json!({
                "field": "email",
                "message": "missing required field: email",
                "code": "missing",
            })
        );
    }

    #[test]
    fn invalid_field_carries_the_domain_message() {
        let error = invalid_field("name", &UserValidationError::NameTooShort { min: 2 });
        let value = error.to_value();
        assert_eq!(value["code"], "too_short");
        assert_eq!(value["message"], "name must be at least 2 characters");
    }

    #[test]
    fn validation_error_lists_every_failure() {
        let error = validation_error(vec![
            missing_field("name"),
            invalid_field("email", &UserValidationError::InvalidEmail),
        ]);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().and_then(Value::as_array).expect("details");
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["field"], "name");
        assert_eq!(details[1]["field"], "email");
    }
}
