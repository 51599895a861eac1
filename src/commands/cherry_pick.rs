use crate::commands::commit::{create_commit, CommitOptions};
use crate::core::{
    context::CommandContext,
    error::GitError,
    state::{Commit, FileState, StagedEntry},
};
use std::collections::BTreeMap;

/// Apply the changes a single commit introduced as a new commit on HEAD
///
/// The commit is looked up by a unique id prefix. Files the picked commit
/// added or changed relative to its first parent are written to the working
/// tree and staged unless HEAD already has that content; the new commit
/// reuses the picked commit's message.
pub fn execute_cherry_pick(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    ctx.require_no_merge()?;
    let prefix = *args.first().ok_or(GitError::EmptyCommitSet)?;
    let picked = find_by_prefix(ctx, prefix)?.clone();

    let parent_files = picked
        .first_parent()
        .and_then(|parent| ctx.state.commits.get(parent))
        .map(|commit| commit.files.clone())
        .unwrap_or_default();
    let head_files = ctx.head_commit()?.files.clone();

    for (path, file) in &picked.files {
        let same_content = |files: &BTreeMap<String, FileState>| {
            files
                .get(path)
                .is_some_and(|before| before.content == file.content)
        };
        // Skip paths the commit left alone and paths HEAD already carries
        if same_content(&parent_files) || same_content(&head_files) {
            continue;
        }
        ctx.state
            .working_directory
            .insert(path.clone(), file.clone());
        ctx.state
            .staging_area
            .insert(path.clone(), StagedEntry::Present(file.clone()));
        ctx.state.ensure_parent_directories(path);
    }

    log::debug!("Cherry-picking {}", picked.id);
    create_commit(ctx, CommitOptions::with_message(picked.message))
}

fn find_by_prefix<'c>(ctx: &'c CommandContext, prefix: &str) -> Result<&'c Commit, GitError> {
    if let Some(exact) = ctx.state.commits.get(prefix).filter(|commit| !commit.is_root()) {
        return Ok(exact);
    }
    let matches: Vec<&Commit> = ctx
        .state
        .commits
        .values()
        .filter(|commit| !commit.is_root() && commit.id.starts_with(prefix))
        .collect();
    match matches.as_slice() {
        [] => Err(GitError::BadObject(prefix.to_string())),
        [only] => Ok(only),
        _ => Err(GitError::AmbiguousObjectId(prefix.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::Fixture;
    use crate::core::error::GitError;

    #[test]
    fn test_cherry_pick_by_prefix() {
        let mut fixture = Fixture::initialized();
        fixture.commit_file("README.md", "base\n", "base");
        fixture.git("checkout -b feature").unwrap();
        fixture.commit_file("unwanted.txt", "no\n", "unwanted");
        let wanted = fixture.commit_file("wanted.txt", "yes\n", "Important fix");
        fixture.git("checkout main").unwrap();
        let main_tip = fixture.tip();

        fixture.git(&format!("cherry-pick {}", &wanted[..6])).unwrap();
        let tip = fixture.state.head_commit().unwrap().clone();
        assert_eq!(tip.message, "Important fix");
        assert_eq!(tip.parents, vec![main_tip]);
        assert!(tip.files.contains_key("wanted.txt"));
        assert!(!tip.files.contains_key("unwanted.txt"));
        assert!(fixture.state.is_file("wanted.txt"));
    }

    #[test]
    fn test_cherry_pick_errors() {
        let mut fixture = Fixture::initialized();
        assert_eq!(fixture.git("cherry-pick"), Err(GitError::EmptyCommitSet));
        assert_eq!(
            fixture.git("cherry-pick zzzzzzz"),
            Err(GitError::BadObject("zzzzzzz".to_string()))
        );
        assert_eq!(
            fixture.git("cherry-pick root"),
            Err(GitError::BadObject("root".to_string()))
        );
    }

    #[test]
    fn test_cherry_pick_twice_is_a_no_op() {
        let mut fixture = Fixture::initialized();
        fixture.git("checkout -b feature").unwrap();
        let wanted = fixture.commit_file("wanted.txt", "yes\n", "wanted");
        fixture.git("checkout main").unwrap();

        fixture.git(&format!("cherry-pick {wanted}")).unwrap();
        let commits = fixture.state.commits.len();
        let tip = fixture.tip();

        assert_eq!(
            fixture.git(&format!("cherry-pick {wanted}")).unwrap(),
            "On branch main\nnothing to commit, working tree clean"
        );
        assert_eq!(fixture.state.commits.len(), commits);
        assert_eq!(fixture.tip(), tip);
    }
}
