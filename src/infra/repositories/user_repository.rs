//! User repository backed by an in-memory collection.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::config::FIRST_USER_ID;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Captures the full capability set of the backing store: list, get, add,
/// update, delete. Payload validation and existence checks are the service
/// layer's job; implementations only manage records and identifiers.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List all users ordered by name ascending
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find user by id
    async fn get(&self, id: u64) -> AppResult<Option<User>>;

    /// Insert a user under the next sequential id (any id on `user` is ignored)
    async fn add(&self, user: User) -> AppResult<User>;

    /// Overwrite name and email of the record with `user.id`; no-op if absent
    async fn update(&self, user: User) -> AppResult<()>;

    /// Remove the record with `id`; no-op if absent
    async fn delete(&self, id: u64) -> AppResult<()>;
}

/// Concrete in-memory implementation of UserRepository.
///
/// A single mutex serializes all five operations, so `add`'s
/// assign-id-and-insert step is atomic and no interleaving can observe a
/// duplicate id or a torn record. Ids start at [`FIRST_USER_ID`] and are
/// never reused, even after deletes. Reads hand out fresh clones, never
/// references into the collection.
pub struct UserStore {
    inner: Mutex<StoreInner>,
}

struct StoreInner {
    users: Vec<User>,
    next_id: u64,
}

impl UserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                users: Vec::new(),
                next_id: FIRST_USER_ID,
            }),
        }
    }

    /// Acquire the collection lock.
    ///
    /// A poisoned lock means a writer panicked mid-mutation; that is the one
    /// internal fault this store can report.
    fn locked(&self) -> AppResult<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| AppError::internal("user store lock poisoned"))
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list(&self) -> AppResult<Vec<User>> {
        let inner = self.locked()?;
        let mut users = inner.users.clone();
        // Stable sort: equal names keep their insertion order.
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn get(&self, id: u64) -> AppResult<Option<User>> {
        let inner = self.locked()?;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn add(&self, mut user: User) -> AppResult<User> {
        let mut inner = self.locked()?;
        user.id = inner.next_id;
        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> AppResult<()> {
        let mut inner = self.locked()?;
        if let Some(existing) = inner.users.iter_mut().find(|u| u.id == user.id) {
            existing.name = user.name;
            existing.email = user.email;
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> AppResult<()> {
        let mut inner = self.locked()?;
        inner.users.retain(|u| u.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn draft(name: &str, email: &str) -> User {
        User {
            id: 0,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn add_assigns_sequential_ids_from_one() {
        let store = UserStore::new();

        let first = store.add(draft("Alice", "alice@example.com")).await.unwrap();
        let second = store.add(draft("Bob", "bob@example.com")).await.unwrap();
        let third = store.add(draft("Carol", "carol@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn add_ignores_caller_supplied_id() {
        let store = UserStore::new();

        let user = User {
            id: 42,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        let stored = store.add(user).await.unwrap();

        assert_eq!(stored.id, 1);
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_are_never_reused_after_delete() {
        let store = UserStore::new();

        let first = store.add(draft("Alice", "alice@example.com")).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.add(draft("Bob", "bob@example.com")).await.unwrap();

        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn list_sorts_by_name_keeping_insertion_order_for_ties() {
        let store = UserStore::new();

        store.add(draft("Bob", "bob-one@example.com")).await.unwrap();
        store.add(draft("Alice", "alice@example.com")).await.unwrap();
        store.add(draft("Bob", "bob-two@example.com")).await.unwrap();

        let users = store.list().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Bob"]);

        // The two Bobs keep the order they were inserted in.
        assert_eq!(users[1].email, "bob-one@example.com");
        assert_eq!(users[2].email, "bob-two@example.com");
    }

    #[tokio::test]
    async fn update_overwrites_name_and_email_in_place() {
        let store = UserStore::new();

        let user = store.add(draft("Alice", "alice@example.com")).await.unwrap();
        store
            .update(User {
                id: user.id,
                name: "Alicia".to_string(),
                email: "alicia@example.com".to_string(),
            })
            .await
            .unwrap();

        let stored = store.get(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Alicia");
        assert_eq!(stored.email, "alicia@example.com");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_a_silent_noop() {
        let store = UserStore::new();

        store
            .update(draft("Ghost", "ghost@example.com"))
            .await
            .unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_a_silent_noop() {
        let store = UserStore::new();

        store.delete(9).await.unwrap();

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reads_return_fresh_copies() {
        let store = UserStore::new();

        let user = store.add(draft("Alice", "alice@example.com")).await.unwrap();
        let mut copy = store.get(user.id).await.unwrap().unwrap();
        copy.name = "Mallory".to_string();

        let stored = store.get(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Alice");
    }

    #[tokio::test]
    async fn concurrent_adds_assign_unique_ids() {
        let store = Arc::new(UserStore::new());

        let mut handles = Vec::new();
        for n in 0..25 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .add(draft(&format!("user-{}", n), "user@example.com"))
                    .await
                    .unwrap()
                    .id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
    }
}
