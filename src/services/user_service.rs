//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{User, UserPayload};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users ordered by name
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Get user by id
    async fn get_user(&self, id: u64) -> AppResult<User>;

    /// Create a new user; any id carried by the payload is discarded
    async fn create_user(&self, payload: UserPayload) -> AppResult<User>;

    /// Overwrite name and email of user `id` with the payload fields
    async fn update_user(&self, id: u64, payload: UserPayload) -> AppResult<()>;

    /// Delete user by id
    async fn delete_user(&self, id: u64) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn get_user(&self, id: u64) -> AppResult<User> {
        self.repo.get(id).await?.ok_or_not_found()
    }

    async fn create_user(&self, payload: UserPayload) -> AppResult<User> {
        // The store assigns the real id on insert.
        self.repo.add(payload.into_user(0)).await
    }

    async fn update_user(&self, id: u64, payload: UserPayload) -> AppResult<()> {
        // Existence is checked up front so a missing user surfaces as 404
        // rather than a silent no-op write.
        self.repo.get(id).await?.ok_or_not_found()?;
        // The path id wins over whatever id the payload carried.
        self.repo.update(payload.into_user(id)).await
    }

    async fn delete_user(&self, id: u64) -> AppResult<()> {
        self.repo.get(id).await?.ok_or_not_found()?;
        self.repo.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockUserRepository;

    fn test_user(id: u64) -> User {
        User {
            id,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
        }
    }

    fn test_payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .with(eq(7u64))
            .returning(|id| Ok(Some(test_user(id))));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(7).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.get_user(7).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_list_users_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Ok(vec![test_user(1), test_user(2)]));

        let service = UserManager::new(Arc::new(repo));
        let result = service.list_users().await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_user_discards_payload_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_add()
            .withf(|user| user.id == 0 && user.name == "Alice")
            .returning(|mut user| {
                user.id = 1;
                Ok(user)
            });

        let mut payload = test_payload("Alice", "alice@example.com");
        payload.id = Some(42);

        let service = UserManager::new(Arc::new(repo));
        let result = service.create_user(payload).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_update_user_writes_under_path_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .with(eq(7u64))
            .returning(|id| Ok(Some(test_user(id))));
        repo.expect_update()
            .withf(|user| user.id == 7 && user.name == "Alicia")
            .returning(|_| Ok(()));

        let mut payload = test_payload("Alicia", "alicia@example.com");
        payload.id = Some(999);

        let service = UserManager::new(Arc::new(repo));
        let result = service.update_user(7, payload).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_not_found_skips_write() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Ok(None));
        // No expect_update: the mock panics if the write happens.

        let service = UserManager::new(Arc::new(repo));
        let result = service
            .update_user(7, test_payload("Alicia", "alicia@example.com"))
            .await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_get()
            .with(eq(7u64))
            .returning(|id| Ok(Some(test_user(id))));
        repo.expect_delete().with(eq(7u64)).returning(|_| Ok(()));

        let service = UserManager::new(Arc::new(repo));
        let result = service.delete_user(7).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(repo));
        let result = service.delete_user(7).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), AppError::NotFound));
    }
}
