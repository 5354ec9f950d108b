//! Infrastructure layer - Data storage
//!
//! This module holds the concrete storage backing the service layer.
//! Today that is a single in-memory repository guarded by a mutex.

pub mod repositories;

pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
