//! git-sim - an in-memory git and shell simulator for interactive lessons.
//!
//! The simulator interprets a learner's command lines against a virtual
//! repository: a working tree, staging area, commit graph and branch set that
//! never touch the disk. It speaks two shell dialects (POSIX and DOS).
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`Simulator`] and its [`CommandResult`] envelope
//! - The repository data model ([`RepositoryState`] and its parts)
//! - Session persistence and configuration
//! - Error handling and result types
//!
//! [`lessons`] evaluates lesson goals against a state snapshot and
//! [`explain`] is the seam for an external explanation service.

pub mod commands;
pub mod core;
pub mod explain;
pub mod lessons;
pub mod shell;

pub use core::{
    // Dispatcher
    Action,
    Clock,
    CommandResult,
    Dialect,
    Simulator,
    SteppingClock,
    SystemClock,

    // Repository model
    content_hash,
    Commit,
    FileState,
    MergeInProgress,
    RepositoryState,
    StagedEntry,
    StashEntry,

    // Errors
    CommandError,
    GitError,
    GitSimError,
    Result,
    ShellError,

    // Persistence
    HistoryEntry,
    SavedSession,
    SessionStore,
    SimConfig,
};
