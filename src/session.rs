use crate::api::models::UserResponse;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Logged-in user persisted between runs, the CLI counterpart of the web
/// client's `riot_user` storage key.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: UserResponse,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(user: UserResponse) -> Self {
        StoredSession {
            user,
            saved_at: Utc::now(),
        }
    }

    fn session_path() -> PathBuf {
        let dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".draftlab");

        let _ = fs::create_dir_all(&dir);

        dir.join("riot_user.json")
    }

    pub fn load() -> Option<Self> {
        Self::load_from(&Self::session_path())
    }

    fn load_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::session_path())
    }

    fn save_to(&self, path: &Path) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize session: {}", e)))?;

        fs::write(path, json)
            .map_err(|e| AppError::JsonError(format!("Failed to write session: {}", e)))?;

        Ok(())
    }

    pub fn clear() {
        let _ = fs::remove_file(Self::session_path());
    }
}

/// Pick the Riot ID a command should act on: an explicitly given one wins,
/// otherwise fall back to the persisted session.
pub fn resolve_riot_id(explicit: Option<String>, stored: Option<StoredSession>) -> Option<String> {
    explicit.or_else(|| stored.map(|session| session.user.riot_id))
}
