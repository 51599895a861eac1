//! Domain-specific error types and error handling utilities.
//!
//! Command failures are ordinary values: every handler returns a [`CommandError`]
//! whose `Display` text is exactly what the simulated terminal prints. The
//! dispatcher turns those into output strings, so nothing escapes the command
//! boundary as a panic.
//!
//! # Public API
//! - [`GitError`]: precondition failures of the version-control verbs
//! - [`ShellError`]: failures of the POSIX and DOS shell verbs
//! - [`TreeError`]: dialect-neutral working-tree failures, mapped to [`ShellError`] by each dialect
//! - [`CommandError`]: either of the above, as returned by the dispatcher layers
//! - [`GitSimError`]: crate-level error for sessions, configuration and I/O
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitSimError>`

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the version-control command layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    #[error("fatal: not a git repository (or any of the parent directories): .git")]
    NotARepository,

    #[error("fatal: your current branch '{0}' does not point to a valid commit")]
    BrokenHead(String),

    #[error("usage: git <command> [<args>]")]
    MissingCommand,

    #[error("git: '{0}' is not a git command. See 'git --help'.")]
    NotAGitCommand(String),

    // add
    #[error("fatal: pathspec '{0}' did not match any files")]
    PathspecNoMatch(String),

    // commit
    #[error("error: you need to resolve your current index first")]
    UnresolvedIndex,

    #[error("fatal: You have nothing to amend.")]
    NothingToAmend,

    // branch / checkout
    #[error("fatal: A branch named '{0}' already exists.")]
    BranchExists(String),

    #[error("fatal: '{0}' is not a valid branch name.")]
    InvalidBranchName(String),

    #[error("fatal: missing branch name")]
    MissingBranchName,

    #[error("fatal: branch name required")]
    BranchNameRequired,

    #[error("error: branch '{0}' not found.")]
    BranchNotFound(String),

    #[error("error: Cannot delete branch '{0}' checked out")]
    CannotDeleteCurrentBranch(String),

    #[error("error: Cannot delete branch '{0}' while it is being merged")]
    CannotDeleteMergingBranch(String),

    #[error("error: pathspec '{0}' did not match any file(s) known to git")]
    UnknownPathspec(String),

    #[error("fatal: '{start}' is not a commit and a branch '{branch}' cannot be created from it")]
    InvalidStartPoint { start: String, branch: String },

    // log
    #[error("fatal: ambiguous argument '{0}': unknown revision or path not in the working tree.")]
    AmbiguousArgument(String),

    #[error("fatal: '{0}': not an integer")]
    InvalidCount(String),

    // merge
    #[error("fatal: No branch specified.")]
    NoBranchSpecified,

    #[error("merge: {0} - not something we can merge")]
    NotSomethingWeCanMerge(String),

    #[error("fatal: You have not concluded your merge (MERGE_HEAD exists).")]
    MergeNotConcluded,

    // stash
    #[error("error: unknown subcommand: {0}")]
    UnknownSubcommand(String),

    // revert
    #[error("fatal: bad revision '{0}'")]
    BadRevision(String),

    #[error("fatal: cannot revert the initial empty commit")]
    RevertRootCommit,

    // tag
    #[error("error: tag '{0}' not found.")]
    TagNotFound(String),

    // clean
    #[error(
        "fatal: clean.requireForce defaults to true and neither -i, -n, nor -f given; refusing to clean"
    )]
    CleanRequiresForce,

    // rebase
    #[error("fatal: needed a single revision")]
    NeedSingleRevision,

    #[error("fatal: invalid upstream '{0}'")]
    InvalidUpstream(String),

    // cherry-pick
    #[error("fatal: empty commit set passed")]
    EmptyCommitSet,

    #[error("fatal: bad object {0}")]
    BadObject(String),

    #[error("error: short object ID {0} is ambiguous")]
    AmbiguousObjectId(String),
}

/// Failures of the shell command layer, worded per dialect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    // POSIX-like wording
    #[error("bash: command not found: {0}")]
    CommandNotFound(String),

    #[error("bash: syntax error near unexpected token `newline'")]
    SyntaxErrorNewline,

    #[error("bash: {0}: No such file or directory")]
    RedirectNoSuchFile(String),

    #[error("bash: {0}: Is a directory")]
    RedirectIsDirectory(String),

    #[error("{cmd}: missing file operand")]
    MissingFileOperand { cmd: String },

    #[error("{cmd}: missing operand")]
    MissingOperand { cmd: String },

    #[error("{cmd}: missing destination file operand")]
    MissingDestination { cmd: String },

    #[error("{cmd}: {path}: No such file or directory")]
    NoSuchFile { cmd: String, path: String },

    #[error("{cmd}: {path}: Is a directory")]
    IsADirectory { cmd: String, path: String },

    #[error("ls: cannot access '{0}': No such file or directory")]
    CannotAccess(String),

    #[error("touch: cannot touch '{0}': No such file or directory")]
    CannotTouch(String),

    #[error("mkdir: cannot create directory ‘{0}’: File exists")]
    DirectoryExists(String),

    #[error("mkdir: cannot create directory ‘{0}’: No such file or directory")]
    DirectoryParentMissing(String),

    #[error("mkdir: cannot create directory ‘{0}’: Not a directory")]
    DirectoryParentNotDirectory(String),

    #[error("rm: cannot remove '{0}': No such file or directory")]
    CannotRemove(String),

    #[error("rm: cannot remove '{0}': Is a directory")]
    RemoveIsDirectory(String),

    #[error("{cmd}: cannot stat '{path}': No such file or directory")]
    CannotStat { cmd: String, path: String },

    #[error("cp: -r not specified; omitting directory '{0}'")]
    OmittingDirectory(String),

    #[error("{cmd}: cannot overwrite non-directory '{dest}' with directory '{src}'")]
    OverwriteNonDirectory {
        cmd: String,
        src: String,
        dest: String,
    },

    #[error("{cmd}: cannot overwrite directory '{dest}' with non-directory")]
    OverwriteDirectory { cmd: String, dest: String },

    #[error("cp: cannot copy a directory, '{src}', into itself, '{dest}'")]
    CopyIntoItself { src: String, dest: String },

    #[error("mv: cannot move '{src}' to a subdirectory of itself, '{dest}'")]
    MoveIntoItself { src: String, dest: String },

    #[error("mv: cannot move '{src}' to '{dest}': Directory not empty")]
    MoveDirectoryNotEmpty { src: String, dest: String },

    #[error("{cmd}: cannot create regular file '{path}': No such file or directory")]
    CannotCreateFile { cmd: String, path: String },

    // DOS-like wording
    #[error("'{0}' is not recognized as an internal or external command,\noperable program or batch file.")]
    NotRecognized(String),

    #[error("The syntax of the command is incorrect.")]
    SyntaxIncorrect,

    #[error("The system cannot find the file specified.")]
    FileNotFound,

    #[error("The system cannot find the path specified.")]
    PathNotFound,

    #[error("Could Not Find C:\\Users\\Student\\git-gud\\{0}")]
    CouldNotFind(String),

    #[error("A subdirectory or file {0} already exists.")]
    SubdirectoryExists(String),

    #[error("The directory name is invalid.")]
    InvalidDirectoryName,

    #[error("The directory is not empty.")]
    DirectoryNotEmpty,

    #[error("Access is denied.")]
    AccessDenied,

    #[error("A duplicate file name exists, or the file\ncannot be found.")]
    DuplicateFileName,

    #[error("Invalid number of parameters")]
    InvalidParameterCount,

    #[error("File not found - {0}\n0 File(s) copied")]
    XcopyFileNotFound(String),

    #[error("Invalid path\n0 File(s) copied")]
    InvalidPath,
}

/// Dialect-neutral failures of working-tree manipulation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("{0}: no such file or directory")]
    NotFound(String),

    #[error("{0}: is a directory")]
    IsDirectory(String),

    #[error("{0}: not a directory")]
    NotDirectory(String),

    #[error("{0}: already exists")]
    AlreadyExists(String),

    #[error("{0}: parent directory does not exist")]
    ParentMissing(String),

    #[error("{0}: directory is not empty")]
    DirectoryNotEmpty(String),

    #[error("{0}: is a directory and recursion was not requested")]
    RecursionRequired(String),

    #[error("cannot place '{src}' inside itself at '{dest}'")]
    IntoItself { src: String, dest: String },

    #[error("cannot overwrite non-directory '{dest}' with directory '{src}'")]
    OverwriteNonDirectory { src: String, dest: String },
}

/// Error returned by the command layers below the dispatcher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Shell(#[from] ShellError),
}

/// Crate-level error for everything outside command interpretation
#[derive(Error, Debug)]
pub enum GitSimError {
    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown dialect '{0}'. Expected 'posix' or 'dos'")]
    UnknownDialect(String),

    // Session store errors
    #[error("Could not find a directory to store the session in")]
    SessionDirectoryNotFound,

    #[error("Failed to create session directory '{path}': {source}")]
    SessionDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize session data: {source}")]
    SessionSerializationFailed { source: serde_json::Error },

    #[error("Failed to write session file '{path}': {source}")]
    SessionWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read session file '{path}': {source}")]
    SessionReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse session file '{path}': {source}")]
    SessionParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Configuration errors
    #[error("Could not find a configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read script '{path}': {source}")]
    ScriptReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using GitSimError
pub type Result<T> = std::result::Result<T, GitSimError>;

impl GitSimError {
    /// Create a session directory creation failed error
    pub fn session_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::SessionDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a session serialization failed error
    pub fn session_serialization_failed(source: serde_json::Error) -> Self {
        Self::SessionSerializationFailed { source }
    }

    /// Create a session write failed error
    pub fn session_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SessionWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a session read failed error
    pub fn session_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SessionReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a session parse failed error
    pub fn session_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SessionParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a script read failed error
    pub fn script_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ScriptReadFailed {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_error_display_matches_terminal_text() {
        assert_eq!(
            GitError::PathspecNoMatch("nope.txt".to_string()).to_string(),
            "fatal: pathspec 'nope.txt' did not match any files"
        );
        assert_eq!(
            GitError::UnresolvedIndex.to_string(),
            "error: you need to resolve your current index first"
        );
    }

    #[test]
    fn test_shell_error_display_per_dialect() {
        assert_eq!(
            ShellError::CommandNotFound("vim".to_string()).to_string(),
            "bash: command not found: vim"
        );
        assert_eq!(
            ShellError::NotRecognized("vim".to_string()).to_string(),
            "'vim' is not recognized as an internal or external command,\noperable program or batch file."
        );
        assert_eq!(
            ShellError::CouldNotFind("src\\a.txt".to_string()).to_string(),
            "Could Not Find C:\\Users\\Student\\git-gud\\src\\a.txt"
        );
    }

    #[test]
    fn test_command_error_is_transparent() {
        let err: CommandError = GitError::NotARepository.into();
        assert_eq!(err.to_string(), GitError::NotARepository.to_string());

        let err: CommandError = ShellError::SyntaxIncorrect.into();
        assert_eq!(err.to_string(), "The syntax of the command is incorrect.");
    }

    #[test]
    fn test_session_read_failed() {
        let path = std::path::PathBuf::from("/test/session.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = GitSimError::session_read_failed(&path, io_err);
        assert!(err.to_string().contains("/test/session.json"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_session_parse_failed() {
        let path = std::path::PathBuf::from("/test/session.json");
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = GitSimError::session_parse_failed(&path, json_err);
        assert!(err.to_string().contains("Failed to parse"));
    }
}
