//! Port for user persistence.
//!
//! The [`UserRepository`] trait is the contract between the HTTP handlers
//! and the document store. Adapters translate their native failures into
//! [`UserRepositoryError`], which the inbound layer maps onto HTTP status
//! codes deterministically.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId, UserPatch};

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The identifier does not match the store's id format.
    #[error("user id `{value}` is not a valid identifier")]
    MalformedId { value: String },
    /// No user exists with the given identifier.
    #[error("user `{id}` not found")]
    NotFound { id: String },
    /// The store could not be reached.
    #[error("document store unavailable: {message}")]
    Unavailable { message: String },
    /// The store rejected or failed the operation.
    #[error("document store query failed: {message}")]
    Query { message: String },
}

impl UserRepositoryError {
    pub fn malformed_id(value: impl Into<String>) -> Self {
        Self::MalformedId {
            value: value.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for user storage.
///
/// Implementations must be safe for concurrent use; one instance is shared
/// by every in-flight request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and return the store-assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserRepositoryError>;

    /// Fetch every user, materialised into a vector.
    async fn list(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Apply the present fields of `patch` to the user with `id`.
    ///
    /// Returns [`UserRepositoryError::NotFound`] when no user matches the
    /// identifier. A patch that matches the stored values is still a
    /// success. Callers must not pass an empty patch.
    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<(), UserRepositoryError>;

    /// Remove the user with `id`.
    ///
    /// Returns [`UserRepositoryError::NotFound`] when nothing was removed.
    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError>;
}
