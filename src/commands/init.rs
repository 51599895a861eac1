use crate::core::{
    context::CommandContext,
    error::GitError,
    state::{Commit, RepositoryState, DEFAULT_BRANCH, GIT_DIR, ROOT_COMMIT_ID},
};

/// Create a fresh repository, discarding whatever state existed before
pub fn execute_init(ctx: &mut CommandContext) -> Result<String, GitError> {
    if ctx.state.is_initialized() {
        log::info!("Reinitializing repository, previous history is discarded");
    }

    let timestamp = ctx.now();
    let mut state = RepositoryState::new();
    state
        .commits
        .insert(ROOT_COMMIT_ID.to_string(), Commit::root(timestamp));
    state
        .branches
        .insert(DEFAULT_BRANCH.to_string(), ROOT_COMMIT_ID.to_string());
    state.head = DEFAULT_BRANCH.to_string();
    state.directories.insert(GIT_DIR.to_string());
    *ctx.state = state;

    Ok(format!(
        "Initialized empty Git repository in {}/.git/",
        ctx.dialect.repository_root()
    ))
}
