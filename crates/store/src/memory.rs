//! In-memory [`DocumentStore`] used by tests and local development.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crescendo_common::error::AppError;
use crescendo_common::types::{Group, User};

use crate::DocumentStore;

#[derive(Default)]
pub struct MemoryStore {
    groups: Mutex<HashMap<String, Group>>,
    users: Mutex<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_group(&self, id: impl Into<String>, group: Group) {
        self.groups.lock().unwrap().insert(id.into(), group);
    }

    pub fn insert_user(&self, id: impl Into<String>, user: User) {
        self.users.lock().unwrap().insert(id.into(), user);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        Ok(self.groups.lock().unwrap().get(group_id).cloned())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_group_is_none() {
        let store = MemoryStore::new();
        assert!(store.get_group("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inserted_records_are_returned() {
        let store = MemoryStore::new();
        store.insert_group(
            "g1",
            Group {
                name: "Indie Lovers".to_string(),
                telegram_chat_ids: vec!["c1".to_string()],
            },
        );
        store.insert_user(
            "u1",
            User {
                display_name: "Alice".to_string(),
            },
        );

        let group = store.get_group("g1").await.unwrap().unwrap();
        assert_eq!(group.name, "Indie Lovers");
        let user = store.get_user("u1").await.unwrap().unwrap();
        assert_eq!(user.display_name, "Alice");
    }
}
