use crate::commands::validate_ref_name;
use crate::core::{context::CommandContext, error::GitError, paths, state::FileState};

/// Switch branches, create-and-switch with `-b`, or restore a tracked file
///
/// Switching replaces the working tree with the target commit's snapshot and
/// clears the staging area. Uncommitted edits are overwritten.
pub fn execute_checkout(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    ctx.require_no_merge()?;

    if let Some(index) = args.iter().position(|arg| *arg == "-b") {
        let name = args.get(index + 1).ok_or(GitError::MissingBranchName)?;
        return create_and_switch(ctx, name, args.get(index + 2).copied());
    }

    let target = match args {
        ["--", path, ..] => return restore_path(ctx, path),
        [target, ..] => *target,
        [] => return Err(GitError::MissingBranchName),
    };

    if ctx.state.branches.contains_key(target) {
        return switch_branch(ctx, target);
    }
    restore_path(ctx, target)
}

fn switch_branch(ctx: &mut CommandContext, name: &str) -> Result<String, GitError> {
    if ctx.state.head == name {
        return Ok(format!("Already on '{name}'"));
    }
    let tip = ctx
        .state
        .branch_tip(name)
        .ok_or_else(|| GitError::UnknownPathspec(name.to_string()))?
        .to_string();
    ctx.state.head = name.to_string();
    ctx.state.checkout_tree(&tip);
    log::debug!("Checked out {name} at {tip}");
    Ok(format!("Switched to branch '{name}'"))
}

fn create_and_switch(
    ctx: &mut CommandContext,
    name: &str,
    start: Option<&str>,
) -> Result<String, GitError> {
    if ctx.state.branches.contains_key(name) {
        return Err(GitError::BranchExists(name.to_string()));
    }
    validate_ref_name(name)?;

    let current = ctx.head_tip()?;
    let target = match start {
        Some(start) => ctx
            .state
            .resolve_revision(start)
            .ok_or_else(|| GitError::InvalidStartPoint {
                start: start.to_string(),
                branch: name.to_string(),
            })?
            .to_string(),
        None => current.clone(),
    };

    ctx.state.branches.insert(name.to_string(), target.clone());
    ctx.state.head = name.to_string();
    if target != current {
        ctx.state.checkout_tree(&target);
    }
    Ok(format!("Switched to a new branch '{name}'"))
}

/// Discard working-tree edits to a tracked file, preferring staged content over HEAD
fn restore_path(ctx: &mut CommandContext, raw: &str) -> Result<String, GitError> {
    let path = paths::normalize(raw, ctx.dialect);
    let staged = ctx
        .state
        .staging_area
        .get(&path)
        .and_then(|entry| entry.file())
        .cloned();
    let committed = ctx.head_commit()?.files.get(&path).cloned();

    let Some(source) = staged.or(committed) else {
        return Err(GitError::UnknownPathspec(raw.to_string()));
    };
    let restored = FileState::new(source.content, ctx.now());
    ctx.state.working_directory.insert(path.clone(), restored);
    ctx.state.ensure_parent_directories(&path);
    Ok("Updated 1 path from the index".to_string())
}
