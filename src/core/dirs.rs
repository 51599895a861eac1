use crate::core::error::GitSimError;
use std::path::PathBuf;

const APP_DIR: &str = "git-sim";

pub fn get_config_directory() -> Result<PathBuf, GitSimError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(GitSimError::ConfigDirectoryNotFound)
}

pub fn get_cache_directory() -> Result<PathBuf, GitSimError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Caches")),
        _ => dirs::cache_dir(),
    };

    base.map(|dir| dir.join(APP_DIR))
        .ok_or(GitSimError::SessionDirectoryNotFound)
}
