//! Document store adapters.
//!
//! Concrete implementations of the [`crate::domain::ports::UserRepository`]
//! port. The MongoDB adapter is the production path; the in-memory adapter
//! backs handler and integration tests. Both are thin: they translate
//! between store representations and domain types and map store failures
//! onto the port's error kinds, nothing more.

mod documents;
mod memory;
mod mongo_user_repository;

pub use memory::InMemoryUserRepository;
pub use mongo_user_repository::{connect, MongoUserRepository, USERS_COLLECTION};
