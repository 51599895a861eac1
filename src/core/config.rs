use crate::core::dialect::Dialect;
use crate::core::dirs::get_config_directory;
use crate::core::error::GitSimError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SimConfig {
    pub default_dialect: Dialect,
    /// Save the session envelope after every command
    pub persist_session: bool,
    /// Maximum number of history entries kept in a saved session
    pub history_limit: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_dialect: Dialect::Posix,
            persist_session: true,
            history_limit: 500,
        }
    }
}

impl SimConfig {
    pub fn config_path() -> Result<PathBuf, GitSimError> {
        Ok(get_config_directory()?.join(CONFIG_FILE))
    }

    pub fn load_or_create() -> Result<Self, GitSimError> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    pub fn load_or_create_at(path: &Path) -> Result<Self, GitSimError> {
        if path.exists() {
            return Self::load_from(path);
        }
        let config = Self::default();
        config.save_to(path)?;
        log::debug!("Wrote default configuration to {}", path.display());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, GitSimError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| GitSimError::config_parse_failed(path, source))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), GitSimError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
