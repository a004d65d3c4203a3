use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::auth::{
    error::AuthError,
    repo_types::{NewUser, User},
};

/// Account storage used by the auth flow.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Any account whose email or username matches.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthError>;

    /// Append a new account. The uniqueness check and the append happen
    /// atomically; a duplicate email or username yields `UserExists`.
    async fn insert(&self, new_user: NewUser) -> Result<User, AuthError>;
}

/// Process-lifetime user store.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.write().await;
        if users
            .iter()
            .any(|u| u.email == new_user.email || u.username == new_user.username)
        {
            return Err(AuthError::UserExists);
        }

        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
        };
        users.push(user.clone());
        debug!(user_id = id, username = %user.username, "user stored");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::Role;
    use std::sync::Arc;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            password_hash: "hash".into(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let store = InMemoryUserStore::new();
        let a = store.insert(new_user("a", "a@x.com")).await.unwrap();
        let b = store.insert(new_user("b", "b@x.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(b.role, Role::User);
    }

    #[tokio::test]
    async fn lookups() {
        let store = InMemoryUserStore::new();
        let a = store.insert(new_user("alice", "a@x.com")).await.unwrap();

        assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().email, "a@x.com");
        assert!(store.find_by_id(99).await.unwrap().is_none());
        assert!(store.find_by_email("a@x.com").await.unwrap().is_some());
        assert!(store.find_by_email("alice").await.unwrap().is_none());
        assert!(store
            .find_by_email_or_username("other@x.com", "alice")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_email_or_username("nobody@x.com", "nobody")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn rejects_duplicate_email_or_username() {
        let store = InMemoryUserStore::new();
        store.insert(new_user("alice", "a@x.com")).await.unwrap();

        let err = store.insert(new_user("alice2", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
        let err = store.insert(new_user("alice", "other@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_inserts_store_one_account() {
        let store = Arc::new(InMemoryUserStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert(new_user(&format!("racer{i}"), "race@x.com"))
                        .await
                })
            })
            .collect();

        let mut ok = 0;
        for h in handles {
            if h.await.unwrap().is_ok() {
                ok += 1;
            }
        }
        assert_eq!(ok, 1);
    }
}
