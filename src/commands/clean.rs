use crate::core::{context::CommandContext, error::GitError};

/// Remove untracked files; requires `-f`, or `-n` for a dry run
///
/// Untracked means neither committed in HEAD nor staged.
pub fn execute_clean(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    let has_short_flag = |flag: char| {
        args.iter()
            .any(|arg| arg.len() > 1 && arg.starts_with('-') && !arg.starts_with("--") && arg.contains(flag))
    };
    let force = has_short_flag('f') || args.contains(&"--force");
    let dry_run = has_short_flag('n') || args.contains(&"--dry-run");
    if !force && !dry_run {
        return Err(GitError::CleanRequiresForce);
    }

    let head_files = &ctx.head_commit()?.files;
    let untracked: Vec<String> = ctx
        .state
        .working_directory
        .keys()
        .filter(|path| !head_files.contains_key(*path) && !ctx.state.staging_area.contains_key(*path))
        .cloned()
        .collect();

    if dry_run {
        return Ok(untracked
            .iter()
            .map(|path| format!("Would remove {path}"))
            .collect::<Vec<_>>()
            .join("\n"));
    }

    for path in &untracked {
        ctx.state.working_directory.remove(path);
    }
    log::debug!("Cleaned {} untracked file(s)", untracked.len());
    Ok(untracked
        .iter()
        .map(|path| format!("Removing {path}"))
        .collect::<Vec<_>>()
        .join("\n"))
}
