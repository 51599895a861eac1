//! Command-line interpreter over an in-memory repository.
//!
//! [`Simulator`] owns the repository state and routes each input line to the
//! version-control layer (`git ...`) or the shell layer of its dialect.
//!
//! # Public API
//! - [`Simulator`]: Holds state, dialect and clock; executes command lines
//! - [`CommandResult`]: Output text, resulting state and an optional terminal action
//! - [`Action`]: Side effects the terminal must perform (clearing the screen)
//!
//! # Execution Rules
//! - **Chaining**: `a && b` runs `b` only when `a` succeeded; outputs are joined with newlines
//! - **Atomicity**: a failing command leaves the state exactly as before that command
//! - **Merge resolution**: writing a conflicted file without markers marks it resolved

use crate::commands;
use crate::core::{
    clock::{Clock, SystemClock},
    context::CommandContext,
    dialect::Dialect,
    error::CommandError,
    state::{has_conflict_markers, RepositoryState},
};
use crate::shell::{self, ShellReply};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub output: String,
    pub state: RepositoryState,
    pub action: Option<Action>,
    /// Whether a command in the line failed
    pub failed: bool,
}

pub struct Simulator {
    state: RepositoryState,
    dialect: Dialect,
    clock: Box<dyn Clock>,
}

impl Simulator {
    pub fn new(dialect: Dialect) -> Self {
        Self::with_clock(dialect, Box::new(SystemClock))
    }

    pub fn with_clock(dialect: Dialect, clock: Box<dyn Clock>) -> Self {
        Self {
            state: RepositoryState::new(),
            dialect,
            clock,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    /// Copy of the current repository state
    pub fn get_state(&self) -> RepositoryState {
        self.state.clone()
    }

    pub fn state(&self) -> &RepositoryState {
        &self.state
    }

    /// Replace the repository state with a copy of `state`
    pub fn set_state(&mut self, state: &RepositoryState) {
        self.state = state.clone();
    }

    /// Execute one input line; never panics on bad input
    pub fn execute(&mut self, line: &str) -> CommandResult {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut outputs: Vec<String> = Vec::new();
        let mut action = None;
        let mut failed = false;

        for segment in tokens.split(|token| *token == "&&") {
            if segment.is_empty() {
                continue;
            }
            match self.run_segment(segment) {
                Ok(ShellReply::Text(text)) => {
                    if !text.is_empty() {
                        outputs.push(text);
                    }
                }
                Ok(ShellReply::Clear) => action = Some(Action::Clear),
                Err(err) => {
                    outputs.push(err.to_string());
                    failed = true;
                    break;
                }
            }
        }

        CommandResult {
            output: outputs.join("\n"),
            state: self.state.clone(),
            action,
            failed,
        }
    }

    fn run_segment(&mut self, tokens: &[&str]) -> Result<ShellReply, CommandError> {
        let snapshot = self.state.clone();
        let outcome = self.dispatch(tokens);
        log::debug!(
            "Dispatched {} ({} tokens, failed: {})",
            tokens.first().copied().unwrap_or_default(),
            tokens.len(),
            outcome.is_err()
        );
        if outcome.is_err() {
            self.state = snapshot;
        }
        outcome
    }

    fn dispatch(&mut self, tokens: &[&str]) -> Result<ShellReply, CommandError> {
        let Some((verb, args)) = tokens.split_first() else {
            return Ok(ShellReply::Text(String::new()));
        };
        let mut ctx = CommandContext::new(&mut self.state, self.clock.as_ref(), self.dialect);

        let is_git = match self.dialect {
            Dialect::Posix => *verb == "git",
            Dialect::Dos => verb.eq_ignore_ascii_case("git"),
        };
        if is_git {
            let output = commands::run(&mut ctx, args)?;
            return Ok(ShellReply::Text(output));
        }

        let outcome = shell::run(&mut ctx, verb, args)?;
        if let Some(path) = &outcome.written {
            resolve_if_clean(ctx.state, path);
        }
        Ok(outcome.reply)
    }
}

/// Drop `path` from the pending merge's conflicts once its markers are gone
fn resolve_if_clean(state: &mut RepositoryState, path: &str) {
    let clean = state
        .working_directory
        .get(path)
        .is_some_and(|file| !has_conflict_markers(&file.content));
    if let Some(merge) = state.merge_in_progress.as_mut() {
        if clean && merge.resolve(path) {
            log::debug!("Conflict in {path} resolved by overwrite");
        }
    }
}
