//! Core functionality for the git-sim simulator.
//!
//! This module holds the repository data model, the command dispatcher and
//! the ambient pieces around it: errors, time, paths, sessions, configuration
//! and terminal output.

pub mod clock;
pub mod config;
pub mod context;
pub mod dialect;
pub mod dirs;
pub mod error;
pub mod file_status;
pub mod hasher;
pub mod output;
pub mod paths;
pub mod session;
pub mod simulator;
pub mod state;

// === Error handling ===
pub use error::{CommandError, GitError, GitSimError, Result, ShellError};

// === Repository model ===
pub use state::{Commit, FileState, MergeInProgress, RepositoryState, StagedEntry, StashEntry};
pub use file_status::{FileStatus, StatusEntry};
pub use hasher::content_hash;

// === Dispatcher ===
pub use clock::{Clock, SteppingClock, SystemClock};
pub use dialect::Dialect;
pub use simulator::{Action, CommandResult, Simulator};

// === Persistence and configuration ===
pub use config::SimConfig;
pub use session::{HistoryEntry, SavedSession, SessionStore, SESSION_KEY};

// === Output formatting ===
pub use output::{
    format_progress, format_prompt, print_command_output, print_error, print_info,
    print_section_header, print_success,
};
