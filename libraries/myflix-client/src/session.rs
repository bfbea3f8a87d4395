//! Locally persisted session state.
//!
//! The session mirrors a login response into a key-value store: the
//! serialized user under [`USER_KEY`] and the raw token under [`TOKEN_KEY`].
//! The client reads the token from here before every authenticated call.

use crate::error::{ClientError, Result};
use crate::types::{LoginResponse, User};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Key holding the JSON-serialized user.
pub const USER_KEY: &str = "user";
/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// String key-value storage backing a [`Session`].
///
/// `set_entries` and `remove_entries` apply all of their keys or none.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<()>;
    fn remove_entries(&self, keys: &[&str]) -> Result<()>;
}

/// Process-local store, forgotten on exit.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ClientError::Session("session store lock poisoned".into()))
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.entries()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// Store persisted as a flat JSON object of string values.
///
/// The whole file is rewritten on every change. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| {
            ClientError::Session(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            ClientError::Session(format!("corrupt session file {}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ClientError::Session(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| {
            ClientError::Session(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_entries(&[(key, value)])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_entries(&[key])
    }

    fn set_entries(&self, entries: &[(&str, &str)]) -> Result<()> {
        let mut map = self.read_all()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), (*value).to_string());
        }
        self.write_all(&map)
    }

    fn remove_entries(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.read_all()?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() != before {
            self.write_all(&map)?;
        }
        Ok(())
    }
}

/// The authenticated user and token, backed by a [`SessionStore`].
///
/// Established by a successful login, cleared by logout or account deletion,
/// overwritten by the next login.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Session persisted to a JSON file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSessionStore::new(path)))
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY)
    }

    /// The stored user, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        match self.store.get(USER_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| ClientError::Session(format!("stored user is unreadable: {}", e))),
            None => Ok(None),
        }
    }

    pub fn is_active(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// Write exactly the user and token of a login response.
    pub fn establish(&self, login: &LoginResponse) -> Result<()> {
        let user = serde_json::to_string(&login.user)
            .map_err(|e| ClientError::Session(e.to_string()))?;
        self.store
            .set_entries(&[(USER_KEY, user.as_str()), (TOKEN_KEY, login.token.as_str())])?;
        info!(username = %login.user.username, "Session established");
        Ok(())
    }

    /// Replace the stored user with a fresher copy of the same account.
    ///
    /// Returns whether anything was written; other accounts are ignored.
    pub fn refresh_user(&self, user: &User) -> Result<bool> {
        let is_current = self
            .current_user()?
            .is_some_and(|stored| stored.id == user.id);
        if !is_current {
            return Ok(false);
        }
        let json =
            serde_json::to_string(user).map_err(|e| ClientError::Session(e.to_string()))?;
        self.store.set(USER_KEY, &json)?;
        Ok(true)
    }

    /// Forget the stored user and token.
    pub fn clear(&self) -> Result<()> {
        self.store.remove_entries(&[USER_KEY, TOKEN_KEY])?;
        debug!("Session cleared");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").field("store", &"<SessionStore>").finish()
    }
}
