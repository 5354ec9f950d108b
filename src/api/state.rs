//! Application state - Dependency injection container.
//!
//! Provides centralized access to the application services.

use std::sync::Arc;

use crate::infra::{UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
}

impl AppState {
    /// Create application state backed by a fresh in-memory store.
    pub fn new() -> Self {
        let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new());

        Self {
            user_service: Arc::new(UserManager::new(repo)),
        }
    }

    /// Create application state with a manually injected service.
    pub fn with_service(user_service: Arc<dyn UserService>) -> Self {
        Self { user_service }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
