use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::user::User;

/// The persisted auth session: the API token plus the profile it belongs
/// to. Written after login, cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    /// CSRF token handed out alongside the auth token
    #[serde(default)]
    pub csrf: Option<String>,
    pub user: User,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("could not write session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Disk-backed session store under the platform config directory.
pub struct SessionStore {
    dir: PathBuf,
}

const SESSION_FILE: &str = "session.json";

impl SessionStore {
    /// Store rooted at `~/.config/taskdeck` (or the platform equivalent)
    pub fn open() -> Result<Self, SessionError> {
        let dir = dirs::config_dir()
            .ok_or(SessionError::NoConfigDir)?
            .join("taskdeck");
        Ok(SessionStore { dir })
    }

    /// Store rooted at an explicit directory (tests, `--config-dir`)
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        SessionStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Hydrate the saved session. Missing or corrupt files read as "not
    /// logged in" rather than an error.
    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(self.dir.join(SESSION_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Persist a session, replacing the file atomically so a crash never
    /// leaves a half-written token behind.
    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(session)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(self.dir.join(SESSION_FILE))
            .map_err(|e| SessionError::Io(e.error))?;
        Ok(())
    }

    /// Forget the saved session (logout). Removing a file that is already
    /// gone is fine.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(self.dir.join(SESSION_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            token: "abc123".into(),
            csrf: Some("csrf456".into()),
            user: serde_json::from_str(
                r#"{"id": 1, "username": "abaker", "first_name": "Alice", "last_name": "Baker"}"#,
            )
            .unwrap(),
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::at(dir.path());
        store.save(&sample_session()).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.token, "abc123");
        assert_eq!(loaded.csrf.as_deref(), Some("csrf456"));
        assert_eq!(loaded.user.username, "abaker");
    }

    #[test]
    fn load_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(SessionStore::at(dir.path()).load().is_none());
    }

    #[test]
    fn load_corrupt_is_none() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        assert!(SessionStore::at(dir.path()).load().is_none());
    }

    #[test]
    fn clear_removes_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::at(dir.path());
        store.save(&sample_session()).unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        // second clear is a no-op
        store.clear().unwrap();
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("taskdeck");
        let store = SessionStore::at(&nested);
        store.save(&sample_session()).unwrap();
        assert!(store.load().is_some());
    }
}
