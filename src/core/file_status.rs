//! Type-safe per-file status classification.
//!
//! # Public API
//! - [`FileStatus`]: How a path differs between HEAD, the staging area and the working tree
//! - [`StatusEntry`]: One classified path, staged or not

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileStatus {
    /// New file, not in HEAD
    Added,
    /// Content differs from the comparison base
    Modified,
    /// Path gone from the working tree or staged for removal
    Deleted,
    /// Present only in the working tree
    Untracked,
    /// Conflicted during a merge
    Unmerged,
}

impl FileStatus {
    /// Two-letter short-format code; `staged` picks the column
    pub fn short_code(&self, staged: bool) -> String {
        let letter = match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Untracked => return "??".to_string(),
            FileStatus::Unmerged => return "UU".to_string(),
        };
        if staged {
            format!("{letter} ")
        } else {
            format!(" {letter}")
        }
    }

    /// Label used by the long status format
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Added => "new file",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
            FileStatus::Untracked => "untracked",
            FileStatus::Unmerged => "both modified",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub path: String,
    pub status: FileStatus,
    pub staged: bool,
}

impl StatusEntry {
    pub fn new(path: impl Into<String>, status: FileStatus, staged: bool) -> Self {
        Self {
            path: path.into(),
            status,
            staged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_codes() {
        assert_eq!(FileStatus::Added.short_code(true), "A ");
        assert_eq!(FileStatus::Modified.short_code(false), " M");
        assert_eq!(FileStatus::Untracked.short_code(false), "??");
        assert_eq!(FileStatus::Unmerged.short_code(true), "UU");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(FileStatus::Added.to_string(), "new file");
        assert_eq!(FileStatus::Deleted.to_string(), "deleted");
    }
}
