//! HTTP inbound adapter exposing the users REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub(crate) mod validation;

pub use error::{json_error_handler, ApiResult};
