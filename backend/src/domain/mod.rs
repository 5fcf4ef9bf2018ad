//! Domain types and ports.
//!
//! Purpose: define the strongly typed user entity used by the HTTP and
//! persistence layers, the repository port those layers meet at, and the
//! transport-agnostic error payload. Types here are immutable apart from
//! the explicit [`User::apply`] merge; invariants live in each type's
//! Rustdoc.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::user::{
    EmailAddress, NewUser, User, UserId, UserName, UserPatch, UserValidationError, USER_NAME_MAX,
    USER_NAME_MIN,
};

/// Convenient result alias for fallible domain operations.
pub type ApiResult<T> = Result<T, Error>;
