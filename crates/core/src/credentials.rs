//! Session credential cache
//!
//! Persists the issued session between launches so the startup auth probe
//! can run credentialed. Written once per login, removed once per logout,
//! mirroring the cookie discipline on the wire. Token values are never
//! logged.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::models::Session;

/// On-disk store for the current session
#[derive(Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Cache in the platform data directory
    pub fn open_default() -> Self {
        let path = ProjectDirs::from("dev", "onyx", "haven")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .unwrap_or_else(|| PathBuf::from("session.json"));
        Self { path }
    }

    /// Cache at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist the session, replacing any previous one
    #[instrument(skip(self, session))]
    pub fn store(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), "session cached");
        Ok(())
    }

    /// Load the cached session
    ///
    /// Expired and unreadable caches are removed and reported as absent.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let session: Session = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "discarding unreadable session cache");
                self.clear()?;
                return Ok(None);
            }
        };
        if !session.is_valid() {
            debug!("cached session expired");
            self.clear()?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Remove the cached session
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
