use crate::core::{
    context::CommandContext,
    error::GitError,
    paths,
    state::{RepositoryState, StagedEntry},
};
use std::collections::BTreeSet;

/// Which paths a pathspec selects
enum Scope<'a> {
    Exact(&'a str),
    Directory(&'a str),
    Everything,
}

impl Scope<'_> {
    fn covers(&self, path: &str) -> bool {
        match self {
            Scope::Exact(target) => path == *target,
            Scope::Directory(dir) => paths::is_below(path, dir),
            Scope::Everything => true,
        }
    }
}

fn scope_for<'a>(state: &RepositoryState, pathspec: &'a str) -> Scope<'a> {
    if state.is_file(pathspec) {
        Scope::Exact(pathspec)
    } else if state.is_directory(pathspec) {
        Scope::Directory(pathspec)
    } else if pathspec == "." || pathspec == "*" || pathspec == "-A" || pathspec == "--all" {
        Scope::Everything
    } else {
        Scope::Exact(pathspec)
    }
}

/// Stage working-tree content, and removals of tracked paths, matching the pathspec
pub fn execute_add(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    let Some(raw) = args.first() else {
        return Ok("Nothing specified, nothing added.".to_string());
    };
    let pathspec = paths::normalize(raw, ctx.dialect);
    let scope = scope_for(ctx.state, &pathspec);

    let present: Vec<String> = ctx
        .state
        .working_directory
        .keys()
        .filter(|path| scope.covers(path))
        .cloned()
        .collect();

    // Tracked means known to HEAD or currently staged with content
    let head_files = &ctx.head_commit()?.files;
    let mut tracked: BTreeSet<&String> = head_files.keys().collect();
    tracked.extend(
        ctx.state
            .staging_area
            .iter()
            .filter(|(_, entry)| !entry.is_deleted())
            .map(|(path, _)| path),
    );
    let removed: Vec<(String, bool)> = tracked
        .into_iter()
        .filter(|path| scope.covers(path) && !ctx.state.is_file(path))
        .map(|path| (path.clone(), head_files.contains_key(path.as_str())))
        .collect();

    if present.is_empty() && removed.is_empty() {
        return Err(GitError::PathspecNoMatch(raw.to_string()));
    }

    for path in &present {
        let file = ctx.state.working_directory[path].clone();
        ctx.state
            .staging_area
            .insert(path.clone(), StagedEntry::Present(file));
    }
    for (path, in_head) in &removed {
        if *in_head {
            ctx.state
                .staging_area
                .insert(path.clone(), StagedEntry::Deleted);
        } else {
            ctx.state.staging_area.remove(path);
        }
    }

    if let Some(merge) = ctx.state.merge_in_progress.as_mut() {
        for path in present.iter().chain(removed.iter().map(|(path, _)| path)) {
            if merge.resolve(path) {
                log::debug!("Marked {path} as resolved");
            }
        }
    }

    log::debug!(
        "Staged {} path(s) and {} removal(s) for '{pathspec}'",
        present.len(),
        removed.len()
    );
    Ok(String::new())
}
