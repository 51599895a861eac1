use crate::commands::commit::{create_commit, CommitOptions};
use crate::core::{context::CommandContext, error::GitError, state::StagedEntry};

/// Record a new commit restoring the snapshot before HEAD
///
/// Only `HEAD` can be reverted. The working tree is refreshed to the new tip.
pub fn execute_revert(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    ctx.require_no_merge()?;
    let target = args
        .iter()
        .find(|arg| !arg.starts_with('-'))
        .copied()
        .unwrap_or("HEAD");
    if target != "HEAD" {
        return Err(GitError::BadRevision(target.to_string()));
    }

    let tip = ctx.head_commit()?.clone();
    let Some(parent) = tip.first_parent() else {
        return Err(GitError::RevertRootCommit);
    };
    let parent_files = ctx
        .state
        .commits
        .get(parent)
        .map(|commit| commit.files.clone())
        .unwrap_or_default();

    ctx.state.staging_area.clear();
    for path in tip.files.keys() {
        if !parent_files.contains_key(path) {
            ctx.state
                .staging_area
                .insert(path.clone(), StagedEntry::Deleted);
        }
    }
    for (path, file) in parent_files {
        ctx.state
            .staging_area
            .insert(path, StagedEntry::Present(file));
    }

    let summary = create_commit(
        ctx,
        CommitOptions::with_message(format!("Revert \"{}\"", tip.message)),
    )?;
    let new_tip = ctx.head_tip()?;
    ctx.state.checkout_tree(&new_tip);
    Ok(summary)
}
