//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only
//! on the repository port and stay testable without a running store.

use std::sync::Arc;

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state around a repository implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::HttpState;
    /// use backend::outbound::persistence::InMemoryUserRepository;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserRepository::new()));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}
