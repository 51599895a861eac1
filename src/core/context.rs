//! Shared context handed to every command handler.
//!
//! [`CommandContext`] bundles the mutable repository state with the clock and
//! dialect of the running simulator, and centralizes the precondition checks
//! most verbs start with.
//!
//! # Public API
//! - [`CommandContext`]: Borrowed state, clock and dialect for one command
//!
//! # Preconditions
//! - **Repository**: every verb except `init` needs an initialized repository
//! - **Merge**: history-rewriting verbs refuse to run while a merge is pending

use crate::core::{
    clock::Clock,
    dialect::Dialect,
    error::GitError,
    state::{Commit, FileState, RepositoryState},
};

pub struct CommandContext<'a> {
    pub state: &'a mut RepositoryState,
    pub clock: &'a dyn Clock,
    pub dialect: Dialect,
}

impl<'a> CommandContext<'a> {
    pub fn new(state: &'a mut RepositoryState, clock: &'a dyn Clock, dialect: Dialect) -> Self {
        Self {
            state,
            clock,
            dialect,
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn require_repository(&self) -> Result<(), GitError> {
        if self.state.is_initialized() {
            Ok(())
        } else {
            Err(GitError::NotARepository)
        }
    }

    pub fn require_no_merge(&self) -> Result<(), GitError> {
        match self.state.merge_in_progress {
            Some(_) => Err(GitError::UnresolvedIndex),
            None => Ok(()),
        }
    }

    /// Id of the commit the checked-out branch points at
    pub fn head_tip(&self) -> Result<String, GitError> {
        self.state
            .head_tip()
            .map(str::to_string)
            .ok_or_else(|| GitError::BrokenHead(self.state.head.clone()))
    }

    pub fn head_commit(&self) -> Result<&Commit, GitError> {
        self.state
            .head_commit()
            .ok_or_else(|| GitError::BrokenHead(self.state.head.clone()))
    }

    /// Write `content` to the working tree at `path`, stamped with the current time
    pub fn write_file(&mut self, path: &str, content: impl Into<String>) {
        let file = FileState::new(content, self.now());
        self.state.working_directory.insert(path.to_string(), file);
        self.state.ensure_parent_directories(path);
    }
}
