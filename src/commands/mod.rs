//! Version-control verbs.
//!
//! Each submodule implements one `git` subcommand against a
//! [`CommandContext`]. [`run`] routes the tokens that follow `git` to the
//! matching handler after checking the shared preconditions.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod cherry_pick;
pub mod clean;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod rebase;
pub mod revert;
pub mod stash;
pub mod status;
pub mod tag;

pub use add::execute_add;
pub use branch::execute_branch;
pub use checkout::execute_checkout;
pub use cherry_pick::execute_cherry_pick;
pub use clean::execute_clean;
pub use commit::{execute_commit, CommitOptions};
pub use init::execute_init;
pub use self::log::execute_log;
pub use merge::execute_merge;
pub use rebase::execute_rebase;
pub use revert::execute_revert;
pub use stash::execute_stash;
pub use status::{collect_status, execute_status};
pub use tag::execute_tag;

use crate::core::{context::CommandContext, error::GitError};

/// Subcommands understood by [`run`]
pub const SUBCOMMANDS: &[&str] = &[
    "init",
    "add",
    "commit",
    "branch",
    "checkout",
    "log",
    "status",
    "merge",
    "stash",
    "revert",
    "tag",
    "clean",
    "rebase",
    "cherry-pick",
];

/// Run the `git` subcommand in `args` (the tokens after `git`)
pub fn run(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(GitError::MissingCommand);
    };
    if !SUBCOMMANDS.contains(subcommand) {
        return Err(GitError::NotAGitCommand(subcommand.to_string()));
    }
    if *subcommand != "init" {
        ctx.require_repository()?;
    }

    ::log::debug!("git {subcommand} {rest:?}");
    match *subcommand {
        "init" => execute_init(ctx),
        "add" => execute_add(ctx, rest),
        "commit" => execute_commit(ctx, rest),
        "branch" => execute_branch(ctx, rest),
        "checkout" => execute_checkout(ctx, rest),
        "log" => execute_log(ctx, rest),
        "status" => execute_status(ctx, rest),
        "merge" => execute_merge(ctx, rest),
        "stash" => execute_stash(ctx, rest),
        "revert" => execute_revert(ctx, rest),
        "tag" => execute_tag(ctx, rest),
        "clean" => execute_clean(ctx, rest),
        "rebase" => execute_rebase(ctx, rest),
        "cherry-pick" => execute_cherry_pick(ctx, rest),
        other => Err(GitError::NotAGitCommand(other.to_string())),
    }
}

/// Reject names git would refuse as branch or tag names
pub(crate) fn validate_ref_name(name: &str) -> Result<(), GitError> {
    let invalid = name.is_empty()
        || name.starts_with('-')
        || name.starts_with('/')
        || name.ends_with('/')
        || name.ends_with('.')
        || name.ends_with(".lock")
        || name.contains("..")
        || name.contains("//")
        || name.contains("@{")
        || name == "HEAD"
        || name
            .chars()
            .any(|c| c.is_control() || matches!(c, ' ' | '~' | '^' | ':' | '?' | '*' | '[' | '\\'));
    if invalid {
        Err(GitError::InvalidBranchName(name.to_string()))
    } else {
        Ok(())
    }
}
