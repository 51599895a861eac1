//! Shell dialect selection.
//!
//! The simulator speaks either a POSIX-like shell or a DOS-like one. The
//! dialect decides shell verbs, error wording, the prompt and the paths shown
//! to the user. Sessions persist it under the names `unix` and `windows`.

use crate::core::error::GitSimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    #[serde(rename = "unix", alias = "posix")]
    Posix,
    #[serde(rename = "windows", alias = "dos")]
    Dos,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Posix => "posix",
            Self::Dos => "dos",
        }
    }

    /// Directory the user appears to be in
    pub fn home(&self) -> &'static str {
        match self {
            Self::Posix => "/home/student/git-gud",
            Self::Dos => "C:\\Users\\Student\\git-gud",
        }
    }

    /// Location reported by `git init`
    pub fn repository_root(&self) -> &'static str {
        match self {
            Self::Posix => "/home/student/git-gud",
            Self::Dos => "C:/Users/Student/git-gud",
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::Posix => "student@git-gud:~/git-gud$".to_string(),
            Self::Dos => format!("{}>", self.home()),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = GitSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "posix" | "unix" | "bash" => Ok(Self::Posix),
            "dos" | "windows" | "cmd" => Ok(Self::Dos),
            _ => Err(GitSimError::UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("posix".parse::<Dialect>().unwrap(), Dialect::Posix);
        assert_eq!("Windows".parse::<Dialect>().unwrap(), Dialect::Dos);
        assert!("zsh".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Dialect::Dos).unwrap(), "\"windows\"");
        let parsed: Dialect = serde_json::from_str("\"posix\"").unwrap();
        assert_eq!(parsed, Dialect::Posix);
    }

    #[test]
    fn test_prompts() {
        assert!(Dialect::Posix.prompt().ends_with('$'));
        assert_eq!(Dialect::Dos.prompt(), "C:\\Users\\Student\\git-gud>");
    }
}
