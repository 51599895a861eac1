use crate::commands::commit::{create_commit, CommitOptions};
use crate::core::{
    context::CommandContext,
    error::GitError,
    state::{FileState, MergeInProgress, StagedEntry},
};

/// Merge another branch into the current one
///
/// Files only the other branch has are brought in and staged. Files both
/// sides have with different content become conflicts: the working copy
/// receives conflict markers and the merge stays pending until every
/// conflicted path is staged again. Without conflicts the merge commit is
/// recorded immediately.
pub fn execute_merge(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    if ctx.state.merge_in_progress.is_some() {
        return Err(GitError::MergeNotConcluded);
    }
    let name = *args.first().ok_or(GitError::NoBranchSpecified)?;
    let other_tip = ctx
        .state
        .branch_tip(name)
        .ok_or_else(|| GitError::NotSomethingWeCanMerge(name.to_string()))?
        .to_string();
    let head_tip = ctx.head_tip()?;
    if name == ctx.state.head || other_tip == head_tip {
        return Ok("Already up to date.".to_string());
    }

    let ours = ctx.head_commit()?.files.clone();
    let theirs = ctx
        .state
        .commits
        .get(&other_tip)
        .map(|commit| commit.files.clone())
        .unwrap_or_default();

    let mut conflicts = Vec::new();
    for (path, incoming) in &theirs {
        match ours.get(path) {
            None => {
                ctx.state
                    .working_directory
                    .insert(path.clone(), incoming.clone());
                ctx.state
                    .staging_area
                    .insert(path.clone(), StagedEntry::Present(incoming.clone()));
                ctx.state.ensure_parent_directories(path);
            }
            Some(current) if current.content != incoming.content => conflicts.push(path.clone()),
            Some(_) => {}
        }
    }

    if conflicts.is_empty() {
        ctx.state.merge_in_progress = Some(MergeInProgress::new(name, Vec::new()));
        let summary = create_commit(ctx, CommitOptions::default())?;
        return Ok(format!("Merge made by the 'ort' strategy.\n{summary}"));
    }

    let timestamp = ctx.now();
    let mut report = Vec::new();
    for path in &conflicts {
        let content = format!(
            "<<<<<<< HEAD\n{}\n=======\n{}\n>>>>>>> {name}",
            ours[path].content, theirs[path].content
        );
        ctx.state
            .working_directory
            .insert(path.clone(), FileState::new(content, timestamp));
        report.push(format!(
            "Auto-merging {path}\nCONFLICT (content): Merge conflict in {path}"
        ));
    }
    log::info!("Merge of {name} stopped on {} conflict(s)", conflicts.len());
    ctx.state.merge_in_progress = Some(MergeInProgress::new(name, conflicts));

    report.push("Automatic merge failed; fix conflicts and then commit the result.".to_string());
    Ok(report.join("\n"))
}
