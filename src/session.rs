//! Client-side session store for StudyLog.
//!
//! The presence of a session record is the only "logged in" signal. There is
//! no expiry and no server-side revalidation. The record lives in a single
//! JSON file, or only in memory when no path is given.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::{User, ADMIN_ROLE};
use crate::Result;

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID as known to the user directory.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role string.
    pub role: String,
}

impl SessionUser {
    /// Check if the session belongs to an admin.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// The user ID as the numeric form the application backend expects.
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.parse().ok()
    }
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

/// Owner of the session record with read/write/clear operations.
#[derive(Debug, Default)]
pub struct SessionStore {
    path: Option<PathBuf>,
    current: Option<SessionUser>,
}

impl SessionStore {
    /// Create a store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a file-backed store, reading any existing record.
    ///
    /// An unreadable or malformed file is treated as "logged out".
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let current = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<SessionUser>(&content) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Ignoring malformed session file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read session file {}: {}", path.display(), e);
                None
            }
        };

        Self {
            path: Some(path),
            current,
        }
    }

    /// Current session record, if logged in.
    pub fn current(&self) -> Option<&SessionUser> {
        self.current.as_ref()
    }

    /// Check if a session record is present.
    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Check if the session belongs to an admin.
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(SessionUser::is_admin)
    }

    /// Store a session record, replacing any previous one.
    pub fn set(&mut self, user: SessionUser) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, serde_json::to_string(&user)?)?;
        }
        info!("Session started for {}", user.email);
        self.current = Some(user);
        Ok(())
    }

    /// Remove the session record.
    pub fn clear(&mut self) -> Result<()> {
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        if let Some(user) = self.current.take() {
            debug!("Session cleared for {}", user.email);
        }
        Ok(())
    }
}
