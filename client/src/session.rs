//! Credential holder for the CLI.
//!
//! The token is carried explicitly by `AuthSession` and handed to the
//! API client; nothing reads it from ambient process state. Between CLI
//! invocations the session is persisted as a JSON file under the user's
//! config directory.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::UserInfo;

/// An authenticated session: the bearer token plus who it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

impl AuthSession {
    pub fn new(token: String, user: &UserInfo) -> Self {
        Self {
            token,
            user_id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

/// Loads and saves `AuthSession` at a fixed path.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location (`~/.config/voltgrid/session.json`).
    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("voltgrid")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session, if any. A missing file is `Ok(None)`.
    pub fn load(&self) -> io::Result<Option<AuthSession>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let session = serde_json::from_str(&contents)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                Ok(Some(session))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, session: &AuthSession) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, contents)
    }

    /// Remove the saved session. Missing file is not an error.
    pub fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir()
            .join(format!("voltgrid-session-test-{}-{}", name, std::process::id()))
            .join("session.json");
        SessionStore::new(path)
    }

    #[test]
    fn save_load_clear_round_trip() {
        let store = temp_store("round-trip");
        assert!(store.load().unwrap().is_none());

        let session = AuthSession {
            token: "tok".to_string(),
            user_id: "u1".to_string(),
            email: "a@example.com".to_string(),
        };
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.email, "a@example.com");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine
        store.clear().unwrap();
    }
}
