//! Application middleware.

pub mod trace;
