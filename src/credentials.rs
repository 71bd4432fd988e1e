/**
 * Credential Store
 * Enrolled patterns and symbol sequences, keyed by username
 */

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

use crate::error::AuthError;
use crate::gesture::GestureRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub pattern: GestureRecord,
    pub symbols: Vec<String>,
    pub created_at: u64,
    pub last_login: Option<u64>,
}

impl EnrolledUser {
    pub fn new(username: &str, email: &str, pattern: GestureRecord, symbols: Vec<String>) -> Self {
        let created_at = unix_now();
        Self {
            id: user_id(username, created_at),
            username: username.to_string(),
            email: email.to_string(),
            pattern,
            symbols,
            created_at,
            last_login: None,
        }
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

/// What callers get to see of an enrolled user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: u64,
    pub last_login: Option<u64>,
}

/// True iff both sequences have the same length and agree position by position.
pub fn sequences_equal<T: PartialEq>(stored: &[T], provided: &[T]) -> bool {
    stored.len() == provided.len() && stored.iter().zip(provided).all(|(s, p)| s == p)
}

pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn user_id(username: &str, created_at: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}:{}", username, created_at).as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

pub trait CredentialStore: Send + Sync {
    /// Fails with `UserExists` if the username or email is taken.
    fn insert(&self, user: EnrolledUser) -> impl Future<Output = Result<(), AuthError>> + Send;

    fn find_by_username(&self, username: &str) -> impl Future<Output = Option<EnrolledUser>> + Send;

    /// Stamps a successful authentication and returns the updated user.
    fn record_login(
        &self,
        username: &str,
        at: u64,
    ) -> impl Future<Output = Result<EnrolledUser, AuthError>> + Send;
}

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, EnrolledUser>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    async fn insert(&self, user: EnrolledUser) -> Result<(), AuthError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AuthError::UserExists);
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Option<EnrolledUser> {
        self.users.read().await.get(username).cloned()
    }

    async fn record_login(&self, username: &str, at: u64) -> Result<EnrolledUser, AuthError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(username).ok_or(AuthError::UserNotFound)?;
        user.last_login = Some(at);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Point;

    fn user(username: &str, email: &str) -> EnrolledUser {
        let pattern = GestureRecord::new(vec![Point::new(0.0, 0.0)], vec![0]).unwrap();
        EnrolledUser::new(username, email, pattern, vec!["a".into(), "b".into(), "c".into()])
    }

    #[test]
    fn test_sequences_equal() {
        assert!(sequences_equal(&["x", "y", "z"], &["x", "y", "z"]));
        assert!(!sequences_equal(&["x", "y", "z"], &["x", "z", "y"]));
        assert!(!sequences_equal(&["x", "y"], &["x", "y", "z"]));
        assert!(sequences_equal::<&str>(&[], &[]));
    }

    #[test]
    fn test_user_id_is_stable_hex() {
        let id = user_id("alice", 1_700_000_000);
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, user_id("alice", 1_700_000_000));
        assert_ne!(id, user_id("bob", 1_700_000_000));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates() {
        let store = InMemoryCredentialStore::new();
        store.insert(user("alice", "a@example.com")).await.unwrap();

        let dup_name = store.insert(user("alice", "other@example.com")).await;
        assert!(matches!(dup_name, Err(AuthError::UserExists)));

        let dup_email = store.insert(user("carol", "a@example.com")).await;
        assert!(matches!(dup_email, Err(AuthError::UserExists)));

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_record_login() {
        let store = InMemoryCredentialStore::new();
        store.insert(user("alice", "a@example.com")).await.unwrap();

        let updated = store.record_login("alice", 1234).await.unwrap();
        assert_eq!(updated.last_login, Some(1234));
        assert_eq!(
            store.find_by_username("alice").await.unwrap().last_login,
            Some(1234)
        );

        assert!(matches!(
            store.record_login("nobody", 1).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
