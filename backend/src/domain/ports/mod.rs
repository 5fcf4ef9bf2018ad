//! Domain ports implemented by outbound adapters.

mod user_repository;

pub use user_repository::{UserRepository, UserRepositoryError};

#[cfg(test)]
pub use user_repository::MockUserRepository;
