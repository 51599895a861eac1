use crate::commands::commit::allocate_commit_id;
use crate::core::{context::CommandContext, error::GitError, state::Commit};
use std::collections::HashSet;

/// Replay the current branch's own commits on top of another branch
///
/// History is treated as linear: the fork point is the first commit on the
/// current branch's first-parent chain that also lies on the upstream's
/// first-parent chain. Each replayed commit keeps its message and re-applies
/// the paths it changed relative to its own parent on top of the new base.
/// Conflicts are not detected; the replayed side wins.
pub fn execute_rebase(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    ctx.require_no_merge()?;
    let upstream = *args
        .iter()
        .find(|arg| !arg.starts_with('-'))
        .ok_or(GitError::NeedSingleRevision)?;
    let base_tip = ctx
        .state
        .resolve_revision(upstream)
        .ok_or_else(|| GitError::InvalidUpstream(upstream.to_string()))?
        .to_string();
    let branch = ctx.state.head.clone();
    let tip = ctx.head_tip()?;
    let up_to_date = format!("Current branch {branch} is up to date.");
    if tip == base_tip {
        return Ok(up_to_date);
    }

    let upstream_chain: HashSet<String> =
        ctx.state.first_parent_chain(&base_tip).into_iter().collect();

    if upstream_chain.contains(&tip) {
        ctx.state.branches.insert(branch.clone(), base_tip.clone());
        ctx.state.checkout_tree(&base_tip);
        return Ok(format!(
            "Fast-forwarded {branch} to {upstream}.\nSuccessfully rebased and updated refs/heads/{branch}."
        ));
    }

    // Own commits, newest first, stopping at the fork point
    let mut replay: Vec<Commit> = Vec::new();
    for id in ctx.state.first_parent_chain(&tip) {
        if upstream_chain.contains(&id) {
            break;
        }
        let Some(commit) = ctx.state.commits.get(&id) else {
            break;
        };
        if commit.parents.contains(&base_tip) {
            return Ok(up_to_date);
        }
        replay.push(commit.clone());
    }
    if replay.is_empty() {
        return Ok(up_to_date);
    }

    let mut base = base_tip;
    for original in replay.iter().rev() {
        let mut files = ctx
            .state
            .commits
            .get(&base)
            .map(|commit| commit.files.clone())
            .unwrap_or_default();
        let parent_files = original
            .first_parent()
            .and_then(|parent| ctx.state.commits.get(parent))
            .map(|commit| commit.files.clone())
            .unwrap_or_default();
        for (path, file) in &original.files {
            if parent_files.get(path).map(|old| &old.content) != Some(&file.content) {
                files.insert(path.clone(), file.clone());
            }
        }
        for path in parent_files.keys() {
            if !original.files.contains_key(path) {
                files.remove(path);
            }
        }

        let timestamp = ctx.now();
        let parents = vec![base.clone()];
        let id = allocate_commit_id(ctx.state, &original.message, &parents, &files, timestamp);
        log::debug!("Replayed {} as {id}", original.id);
        ctx.state.commits.insert(
            id.clone(),
            Commit {
                id: id.clone(),
                message: original.message.clone(),
                parents,
                files,
                timestamp,
            },
        );
        base = id;
    }

    ctx.state.branches.insert(branch.clone(), base.clone());
    ctx.state.checkout_tree(&base);
    log::info!("Rebased {} commit(s) of {branch} onto {upstream}", replay.len());
    Ok(format!("Successfully rebased and updated refs/heads/{branch}."))
}
