//! Saved terminal sessions.
//!
//! A session is the repository state, the dialect it was created under and
//! the command history, stored as one JSON document.
//!
//! # Public API
//! - [`SavedSession`]: The persisted envelope
//! - [`HistoryEntry`]: One command and its output
//! - [`SessionStore`]: Load, save and clear the envelope on disk

use crate::core::dialect::Dialect;
use crate::core::dirs::get_cache_directory;
use crate::core::error::{GitSimError, Result};
use crate::core::state::RepositoryState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Fixed key the session is stored under
pub const SESSION_KEY: &str = "git-gud-session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub command: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub dialect_mode: Dialect,
    pub repository_state: RepositoryState,
    #[serde(default)]
    pub command_history: Vec<HistoryEntry>,
}

impl SavedSession {
    pub fn new(dialect_mode: Dialect, repository_state: RepositoryState) -> Self {
        Self {
            dialect_mode,
            repository_state,
            command_history: Vec::new(),
        }
    }

    /// Append a history entry, dropping the oldest beyond `limit`
    pub fn record(&mut self, command: &str, output: &str, limit: usize) {
        self.command_history.push(HistoryEntry {
            command: command.to_string(),
            output: output.to_string(),
        });
        if self.command_history.len() > limit {
            let excess = self.command_history.len() - limit;
            self.command_history.drain(..excess);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform cache directory
    pub fn default_location() -> Result<Self> {
        let dir = get_cache_directory()?;
        Ok(Self::new(dir.join(format!("{SESSION_KEY}.json"))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved session; a corrupt file is removed and treated as absent
    pub fn load(&self) -> Result<Option<SavedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| GitSimError::session_read_failed(&self.path, source))?;

        match serde_json::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(source) => {
                let err = GitSimError::session_parse_failed(&self.path, source);
                log::warn!("Discarding saved session: {err}");
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &SavedSession) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|source| GitSimError::session_directory_creation_failed(dir, source))?;
        }
        let content =
            serde_json::to_string(session).map_err(GitSimError::session_serialization_failed)?;
        std::fs::write(&self.path, content)
            .map_err(|source| GitSimError::session_write_failed(&self.path, source))?;
        log::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Remove the saved session; succeeds when none exists
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
