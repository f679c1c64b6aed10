//! In-memory user store
//!
//! All access goes through the store's `RwLock`, so a read-modify-write such
//! as an update runs under a single write guard and cannot interleave with a
//! concurrent delete of the same record.

use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::model::{seed_users, User, UserPayload};

/// How new user ids are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Monotonic counter, a deleted id is never handed out again
    #[default]
    Sequential,
    /// `len + 1`, may collide with a live id after a delete
    LengthPlusOne,
}

/// Ordered list of users plus id bookkeeping
#[derive(Debug)]
struct UserList {
    users: Vec<User>,
    next_id: u64,
}

impl UserList {
    fn allocate_id(&mut self, strategy: IdStrategy) -> u64 {
        match strategy {
            IdStrategy::Sequential => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdStrategy::LengthPlusOne => u64::try_from(self.users.len())
                .unwrap_or(u64::MAX)
                .saturating_add(1),
        }
    }
}

/// User store shared between connection tasks
pub struct UserStore {
    inner: RwLock<UserList>,
    id_strategy: IdStrategy,
}

impl UserStore {
    /// Create a store holding `users` in the given order
    pub fn with_users(users: Vec<User>, id_strategy: IdStrategy) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(UserList { users, next_id }),
            id_strategy,
        }
    }

    /// Create a store holding the two startup records
    pub fn seeded(id_strategy: IdStrategy) -> Self {
        Self::with_users(seed_users(), id_strategy)
    }

    pub fn empty(id_strategy: IdStrategy) -> Self {
        Self::with_users(Vec::new(), id_strategy)
    }

    /// Snapshot of all users in insertion order
    pub async fn list(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    /// Append a new user and return it
    pub async fn create(&self, payload: UserPayload) -> User {
        let mut list = self.inner.write().await;
        let user = User {
            id: list.allocate_id(self.id_strategy),
            name: payload.name,
            email: payload.email,
        };
        list.users.push(user.clone());
        user
    }

    /// Apply `payload` to the first user with `id`, returning the updated record
    pub async fn update(&self, id: u64, payload: UserPayload) -> Option<User> {
        let mut list = self.inner.write().await;
        let user = list.users.iter_mut().find(|u| u.id == id)?;
        user.apply(payload);
        Some(user.clone())
    }

    /// Remove the first user with `id`, returning it
    pub async fn remove(&self, id: u64) -> Option<User> {
        let mut list = self.inner.write().await;
        let index = list.users.iter().position(|u| u.id == id)?;
        Some(list.users.remove(index))
    }
}

/// Wrapper for Arc<UserStore>
pub type SharedUserStore = Arc<UserStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(name: &str, email: &str) -> UserPayload {
        UserPayload {
            name: Some(json!(name)),
            email: Some(json!(email)),
        }
    }

    #[tokio::test]
    async fn test_create_after_seeds_gets_id_3() {
        let store = UserStore::seeded(IdStrategy::Sequential);
        let user = store.create(payload("A", "a@x.com")).await;
        assert_eq!(user, User::new(3, "A", "a@x.com"));
        assert_eq!(store.list().await.len(), 3);
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = UserStore::seeded(IdStrategy::Sequential);
        store.create(payload("C", "c@x.com")).await;
        store.create(payload("D", "d@x.com")).await;

        let names: Vec<_> = store
            .list()
            .await
            .into_iter()
            .filter_map(|u| u.name)
            .collect();
        assert_eq!(names, ["Nagendra", "Babu", "C", "D"]);
    }

    #[tokio::test]
    async fn test_sequential_never_reuses_deleted_id() {
        let store = UserStore::seeded(IdStrategy::Sequential);
        store.remove(1).await;
        let user = store.create(payload("A", "a@x.com")).await;
        assert_eq!(user.id, 3);
    }

    #[tokio::test]
    async fn test_length_plus_one_can_collide() {
        let store = UserStore::seeded(IdStrategy::LengthPlusOne);
        store.remove(1).await;
        let user = store.create(payload("A", "a@x.com")).await;
        assert_eq!(user.id, 2);

        let ids: Vec<_> = store.list().await.iter().map(|u| u.id).collect();
        assert_eq!(ids, [2, 2]);
    }

    #[tokio::test]
    async fn test_update_missing_leaves_store_unchanged() {
        let store = UserStore::seeded(IdStrategy::Sequential);
        assert!(store.update(999, payload("X", "x@x.com")).await.is_none());
        assert_eq!(store.list().await, seed_users());
    }

    #[tokio::test]
    async fn test_update_applies_in_place() {
        let store = UserStore::seeded(IdStrategy::Sequential);
        let updated = store
            .update(
                2,
                UserPayload {
                    name: Some(json!("B")),
                    email: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, User::new(2, "B", "babu@yopmail.com"));
        assert_eq!(store.list().await[1], updated);
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let store = UserStore::seeded(IdStrategy::Sequential);
        let removed = store.remove(1).await;
        assert_eq!(removed, Some(User::new(1, "Nagendra", "nagendra@yopmail.com")));
        assert!(store.remove(1).await.is_none());
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_store_starts_at_one() {
        let store = UserStore::empty(IdStrategy::Sequential);
        assert_eq!(store.create(UserPayload::default()).await.id, 1);
    }
}
