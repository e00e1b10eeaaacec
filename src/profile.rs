//! User profile storage
//!
//! The signed-in username and the user list live under fixed keys in the
//! text store.
//!
//! SECURITY: passwords are stored and compared in plaintext. This keeps
//! the persisted layout inspectable and portable, but it means anyone who
//! can read the store file can read every password. Do not put real
//! credentials here.

use crate::config::{CURRENT_USER_KEY, USERS_KEY};
use crate::error::Result;
use crate::store::TextStore;
use serde::{Deserialize, Serialize};

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    /// Plaintext, see the module warning.
    pub password: String,
}

/// Store for the user list and the current session.
pub struct ProfileStore<T: TextStore> {
    store: T,
}

impl<T: TextStore> ProfileStore<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn current_user(&self) -> Option<String> {
        self.store.get(CURRENT_USER_KEY)
    }

    pub fn set_current_user(&self, username: &str) -> Result<()> {
        self.store.set(CURRENT_USER_KEY, username)
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.remove(CURRENT_USER_KEY)
    }

    pub fn users(&self) -> Vec<UserRecord> {
        match self.store.get(USERS_KEY) {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!("User list is corrupt, starting empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        }
    }

    /// Add a user, or replace the record with the same username.
    pub fn upsert_user(&self, user: UserRecord) -> Result<()> {
        let mut users = self.users();
        users.retain(|u| u.username != user.username);
        users.push(user);
        let blob = serde_json::to_string(&users)?;
        self.store.set(USERS_KEY, &blob)
    }

    /// Plaintext comparison against the stored record.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users()
            .iter()
            .any(|u| u.username == username && u.password == password)
    }
}
