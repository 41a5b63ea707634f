//! User Storage
//! Mission: Hold the read-only table of accounts allowed to log in

use crate::auth::models::CredentialRecord;
use crate::auth::password;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Immutable in-memory user store, populated once at start-up
#[derive(Debug)]
pub struct UserStore {
    users: HashMap<String, CredentialRecord>,
}

/// On-disk layout of a users file
#[derive(Debug, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<CredentialRecord>,
}

impl UserStore {
    /// Build a store from explicit records, enforcing unique non-empty usernames
    pub fn from_records(records: Vec<CredentialRecord>) -> Result<Self> {
        let mut users = HashMap::with_capacity(records.len());

        for record in records {
            if record.username.is_empty() {
                bail!("User record with empty username");
            }
            if users.contains_key(&record.username) {
                bail!("Duplicate username: {}", record.username);
            }
            users.insert(record.username.clone(), record);
        }

        Ok(Self { users })
    }

    /// The two built-in accounts: `user` (USER) and `admin` (ADMIN)
    pub fn with_default_users() -> Self {
        let defaults = vec![
            CredentialRecord::new("user", &password::encode_noop("password"), ["USER"]),
            CredentialRecord::new("admin", &password::encode_noop("admin123"), ["ADMIN"]),
        ];

        let users = defaults
            .into_iter()
            .map(|record| (record.username.clone(), record))
            .collect();

        warn!("⚠️  Built-in users (user, admin) store plain-text passwords. Use USERS_FILE in production!");

        Self { users }
    }

    /// Load a store from a TOML file of `[[users]]` tables
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read users file {}", path.display()))?;
        let parsed: UsersFile = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse users file {}", path.display()))?;

        let store = Self::from_records(parsed.users)?;
        info!("🔐 Loaded {} users from {}", store.len(), path.display());
        Ok(store)
    }

    /// Get user by username (case-sensitive, empty never matches)
    pub fn find_by_username(&self, username: &str) -> Option<&CredentialRecord> {
        if username.is_empty() {
            return None;
        }
        self.users.get(username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Usernames in sorted order
    pub fn usernames(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
