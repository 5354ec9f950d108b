//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data storage,
//! following the Repository pattern for clean separation of concerns.

mod user_repository;

pub use user_repository::{UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
