use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::modules::admins::model::AdminProfile;

/// The persisted authentication state: both tokens plus the profile of the
/// signed-in administrator, exactly as returned by login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access: String,
    pub refresh: String,
    pub admin: AdminProfile,
}

/// File-backed session storage. A session written by one process run is
/// picked up by the next, so a restart does not force a new login.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted session, if any. A file that fails to parse is
    /// treated as absent and removed, so a corrupt session never wedges the
    /// client into a broken state.
    pub fn load(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding corrupt session file");
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_session() -> Session {
        Session {
            access: "access-token".into(),
            refresh: "refresh-token".into(),
            admin: AdminProfile {
                id: Uuid::new_v4(),
                username: "admin".into(),
                email: "admin@admin.com".into(),
                created_at: Utc::now(),
            },
        }
    }

    fn temp_store(name: &str) -> SessionStore {
        let path = std::env::temp_dir().join(format!("campus-session-{}-{}.json", name, Uuid::new_v4()));
        SessionStore::new(path)
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("roundtrip");
        let session = sample_session();
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));
        store.clear();
    }

    #[test]
    fn missing_file_loads_as_none() {
        let store = temp_store("missing");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let store = temp_store("corrupt");
        fs::write(&store.path, "{not json").unwrap();
        assert_eq!(store.load(), None);
        assert!(!store.path.exists());
    }

    #[test]
    fn clear_removes_the_file() {
        let store = temp_store("clear");
        store.save(&sample_session()).unwrap();
        store.clear();
        assert_eq!(store.load(), None);
    }
}
