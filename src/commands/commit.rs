use crate::core::{
    context::CommandContext,
    error::GitError,
    hasher::content_hash,
    state::{Commit, FileState, RepositoryState, StagedEntry, ROOT_COMMIT_ID},
};
use std::collections::BTreeMap;

const DEFAULT_MESSAGE: &str = "Unnamed commit";

/// Parsed `git commit` arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    pub message: Option<String>,
    pub amend: bool,
}

impl CommitOptions {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            amend: false,
        }
    }

    /// `-m` takes every following token up to the next flag; double quotes are dropped
    pub fn parse(args: &[&str]) -> Self {
        let amend = args.contains(&"--amend");
        let message = args
            .iter()
            .position(|arg| *arg == "-m" || *arg == "--message")
            .map(|index| {
                args[index + 1..]
                    .iter()
                    .take_while(|arg| !arg.starts_with("--"))
                    .copied()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .replace('"', "")
            })
            .filter(|message| !message.is_empty());
        Self { message, amend }
    }
}

pub fn execute_commit(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    create_commit(ctx, CommitOptions::parse(args))
}

/// Record the staging area on top of HEAD (or in place of HEAD when amending)
///
/// Also concludes a pending merge by recording the merged branch tip as a
/// second parent. Returns the `[branch id] message` summary line.
pub(crate) fn create_commit(
    ctx: &mut CommandContext,
    options: CommitOptions,
) -> Result<String, GitError> {
    if let Some(merge) = &ctx.state.merge_in_progress {
        if !merge.is_resolved() {
            return Err(GitError::UnresolvedIndex);
        }
    }
    let merging = ctx.state.merge_in_progress.clone();
    let head = ctx.state.head.clone();

    if ctx.state.staging_area.is_empty() && merging.is_none() && !options.amend {
        return Ok(format!(
            "On branch {head}\nnothing to commit, working tree clean"
        ));
    }

    let tip = ctx.head_commit()?.clone();
    let (parents, mut files, message) = if options.amend {
        if tip.is_root() {
            return Err(GitError::NothingToAmend);
        }
        let message = options.message.unwrap_or_else(|| tip.message.clone());
        (tip.parents.clone(), tip.files, message)
    } else if let Some(merge) = merging {
        let other = ctx
            .state
            .branch_tip(&merge.branch_to_merge)
            .ok_or_else(|| GitError::BranchNotFound(merge.branch_to_merge.clone()))?
            .to_string();
        let message = options.message.unwrap_or_else(|| {
            format!("Merge branch '{}' into {head}", merge.branch_to_merge)
        });
        (vec![tip.id.clone(), other], tip.files, message)
    } else {
        let message = options
            .message
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        (vec![tip.id.clone()], tip.files, message)
    };

    for (path, entry) in &ctx.state.staging_area {
        match entry {
            StagedEntry::Present(file) => {
                files.insert(path.clone(), file.clone());
            }
            StagedEntry::Deleted => {
                files.remove(path);
            }
        }
    }

    let timestamp = ctx.now();
    let id = allocate_commit_id(ctx.state, &message, &parents, &files, timestamp);
    let commit = Commit {
        id: id.clone(),
        message: message.clone(),
        parents,
        files,
        timestamp,
    };
    ctx.state.commits.insert(id.clone(), commit);
    ctx.state.branches.insert(head.clone(), id.clone());
    ctx.state.staging_area.clear();
    ctx.state.merge_in_progress = None;

    log::debug!("Created commit {id} on {head}");
    Ok(format!("[{head} {id}] {message}"))
}

/// Derive an unused id for a commit with the given content
pub(crate) fn allocate_commit_id(
    state: &RepositoryState,
    message: &str,
    parents: &[String],
    files: &BTreeMap<String, FileState>,
    timestamp: i64,
) -> String {
    let snapshot = serde_json::to_string(files).unwrap_or_default();
    let seed = format!("{message}{}{snapshot}{timestamp}", parents.join(","));

    let mut id = content_hash(&seed);
    let mut salt = 0u32;
    while id == ROOT_COMMIT_ID || state.commits.contains_key(&id) {
        salt += 1;
        log::warn!("Commit id {id} already taken, salting ({salt})");
        id = content_hash(&format!("{seed}#{salt}"));
    }
    id
}
