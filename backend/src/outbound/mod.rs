//! Outbound adapters for external collaborators.

pub mod persistence;
