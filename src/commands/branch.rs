use crate::commands::validate_ref_name;
use crate::core::{context::CommandContext, error::GitError};

/// List, create or delete branches
///
/// - `git branch` lists every branch, marking the current one with `*`
/// - `git branch <name> [<start>]` creates a branch without switching to it
/// - `git branch -d <name>` deletes a branch other than the current one
pub fn execute_branch(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    match args {
        [] => Ok(list_branches(ctx)),
        [flag, rest @ ..] if matches!(*flag, "-d" | "-D" | "--delete") => {
            let name = rest.first().ok_or(GitError::BranchNameRequired)?;
            delete_branch(ctx, name)
        }
        [name, rest @ ..] => create_branch(ctx, name, rest.first().copied()),
    }
}

fn list_branches(ctx: &CommandContext) -> String {
    ctx.state
        .branches
        .keys()
        .map(|name| {
            if *name == ctx.state.head {
                format!("* {name}")
            } else {
                format!("  {name}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn create_branch(
    ctx: &mut CommandContext,
    name: &str,
    start: Option<&str>,
) -> Result<String, GitError> {
    if ctx.state.branches.contains_key(name) {
        return Err(GitError::BranchExists(name.to_string()));
    }
    validate_ref_name(name)?;

    let target = match start {
        Some(start) => ctx
            .state
            .resolve_revision(start)
            .ok_or_else(|| GitError::InvalidStartPoint {
                start: start.to_string(),
                branch: name.to_string(),
            })?
            .to_string(),
        None => ctx.head_tip()?,
    };
    log::debug!("Creating branch {name} at {target}");
    ctx.state.branches.insert(name.to_string(), target);
    Ok(String::new())
}

fn delete_branch(ctx: &mut CommandContext, name: &str) -> Result<String, GitError> {
    if name == ctx.state.head {
        return Err(GitError::CannotDeleteCurrentBranch(name.to_string()));
    }
    // A pending merge commit takes its second parent from this branch
    let merging = ctx
        .state
        .merge_in_progress
        .as_ref()
        .is_some_and(|merge| merge.branch_to_merge == name);
    if merging {
        return Err(GitError::CannotDeleteMergingBranch(name.to_string()));
    }
    let Some(tip) = ctx.state.branches.remove(name) else {
        return Err(GitError::BranchNotFound(name.to_string()));
    };
    Ok(format!("Deleted branch {name} (was {tip})."))
}
