use crate::core::{
    context::CommandContext,
    error::GitError,
    file_status::{FileStatus, StatusEntry},
    state::{FileState, MergeInProgress, RepositoryState, StagedEntry},
};
use std::collections::BTreeMap;

/// Classify every path that differs between HEAD, staging and the working tree
///
/// Staged entries are compared to HEAD; unstaged ones compare the working
/// tree to the staged content when present, otherwise to HEAD. Entries come
/// out grouped staged, unstaged, untracked, each sorted by path.
pub fn collect_status(state: &RepositoryState) -> Vec<StatusEntry> {
    let empty = BTreeMap::new();
    let head_files: &BTreeMap<String, FileState> = state
        .head_commit()
        .map(|commit| &commit.files)
        .unwrap_or(&empty);

    let mut staged = Vec::new();
    for (path, entry) in &state.staging_area {
        let status = match (entry, head_files.get(path)) {
            (StagedEntry::Deleted, Some(_)) => FileStatus::Deleted,
            (StagedEntry::Deleted, None) => continue,
            (StagedEntry::Present(_), None) => FileStatus::Added,
            (StagedEntry::Present(file), Some(committed)) if file.content != committed.content => {
                FileStatus::Modified
            }
            (StagedEntry::Present(_), Some(_)) => continue,
        };
        staged.push(StatusEntry::new(path.clone(), status, true));
    }

    let mut unstaged = Vec::new();
    let mut untracked = Vec::new();
    for (path, file) in &state.working_directory {
        let base = match state.staging_area.get(path) {
            Some(StagedEntry::Present(content)) => Some(content),
            Some(StagedEntry::Deleted) => None,
            None => head_files.get(path),
        };
        match base {
            Some(base) if base.content != file.content => {
                unstaged.push(StatusEntry::new(path.clone(), FileStatus::Modified, false));
            }
            Some(_) => {}
            None => untracked.push(StatusEntry::new(path.clone(), FileStatus::Untracked, false)),
        }
    }

    // Tracked paths that vanished from the working tree without a staged removal
    let mut vanished: Vec<&String> = head_files
        .keys()
        .filter(|path| !state.staging_area.contains_key(*path))
        .chain(
            state
                .staging_area
                .iter()
                .filter(|(_, entry)| !entry.is_deleted())
                .map(|(path, _)| path),
        )
        .filter(|path| !state.is_file(path))
        .collect();
    vanished.sort();
    vanished.dedup();
    for path in vanished {
        unstaged.push(StatusEntry::new(path.clone(), FileStatus::Deleted, false));
    }
    unstaged.sort_by(|a, b| a.path.cmp(&b.path));

    staged.into_iter().chain(unstaged).chain(untracked).collect()
}

pub fn execute_status(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    let short = args.iter().any(|arg| matches!(*arg, "-s" | "--short"));
    if short {
        return Ok(render_short(ctx.state));
    }
    Ok(render_long(ctx.state))
}

/// Long-format report, as printed by `git status`
pub(crate) fn render_long(state: &RepositoryState) -> String {
    let head = &state.head;
    if let Some(merge) = &state.merge_in_progress {
        return render_merge(head, merge);
    }

    let entries = collect_status(state);
    let mut output = format!("On branch {head}\n");
    if entries.is_empty() {
        output.push_str("\nnothing to commit, working tree clean");
        return output;
    }

    let section = |entries: &[&StatusEntry]| -> String {
        entries
            .iter()
            .map(|entry| format!("\t{:<12}{}", format!("{}:", entry.status.label()), entry.path))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let staged: Vec<&StatusEntry> = entries.iter().filter(|e| e.staged).collect();
    let unstaged: Vec<&StatusEntry> = entries
        .iter()
        .filter(|e| !e.staged && e.status != FileStatus::Untracked)
        .collect();
    let untracked: Vec<&StatusEntry> = entries
        .iter()
        .filter(|e| e.status == FileStatus::Untracked)
        .collect();

    if !staged.is_empty() {
        output.push_str("\nChanges to be committed:\n");
        output.push_str("  (use \"git restore --staged <file>...\" to unstage)\n");
        output.push_str(&section(&staged));
        output.push('\n');
    }
    if !unstaged.is_empty() {
        output.push_str("\nChanges not staged for commit:\n");
        output.push_str("  (use \"git add <file>...\" to update what will be committed)\n");
        output.push_str(&section(&unstaged));
        output.push('\n');
    }
    if !untracked.is_empty() {
        output.push_str("\nUntracked files:\n");
        output.push_str("  (use \"git add <file>...\" to include in what will be committed)\n");
        let lines: Vec<String> = untracked.iter().map(|e| format!("\t{}", e.path)).collect();
        output.push_str(&lines.join("\n"));
        output.push('\n');
    }
    output.trim_end().to_string()
}

fn render_merge(head: &str, merge: &MergeInProgress) -> String {
    if merge.is_resolved() {
        return format!(
            "On branch {head}\nAll conflicts fixed but you are still merging.\n  (use \"git commit\" to conclude merge)"
        );
    }
    let lines: Vec<String> = merge
        .conflicting_files
        .iter()
        .map(|path| format!("\t{}: {path}", FileStatus::Unmerged.label()))
        .collect();
    format!(
        "On branch {head}\nYou have unmerged paths.\n  (fix conflicts and run \"git commit\")\n\nUnmerged paths:\n  (use \"git add <file>...\" to mark resolution)\n{}",
        lines.join("\n")
    )
}

fn render_short(state: &RepositoryState) -> String {
    if let Some(merge) = &state.merge_in_progress {
        return merge
            .conflicting_files
            .iter()
            .map(|path| format!("{} {path}", FileStatus::Unmerged.short_code(false)))
            .collect::<Vec<_>>()
            .join("\n");
    }
    collect_status(state)
        .iter()
        .map(|entry| format!("{} {}", entry.status.short_code(entry.staged), entry.path))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;

    #[test]
    fn test_clean_tree() {
        let mut fixture = Fixture::initialized();
        assert_eq!(
            fixture.git("status").unwrap(),
            "On branch main\n\nnothing to commit, working tree clean"
        );
    }

    #[test]
    fn test_untracked_then_staged() {
        let mut fixture = Fixture::initialized();
        fixture.write("README.md", "Hello\n");

        let output = fixture.git("status").unwrap();
        assert_eq!(
            output,
            "On branch main\n\nUntracked files:\n  (use \"git add <file>...\" to include in what will be committed)\n\tREADME.md"
        );

        fixture.git("add README.md").unwrap();
        let output = fixture.git("status").unwrap();
        assert_eq!(
            output,
            "On branch main\n\nChanges to be committed:\n  (use \"git restore --staged <file>...\" to unstage)\n\tnew file:   README.md"
        );
    }

    #[test]
    fn test_modified_against_staged_content() {
        let mut fixture = Fixture::initialized();
        fixture.commit_file("a.txt", "1\n", "one");
        fixture.write("a.txt", "2\n");
        fixture.git("add a.txt").unwrap();
        fixture.write("a.txt", "3\n");

        let entries = collect_status(&fixture.state);
        assert_eq!(
            entries,
            vec![
                StatusEntry::new("a.txt", FileStatus::Modified, true),
                StatusEntry::new("a.txt", FileStatus::Modified, false),
            ]
        );
    }

    #[test]
    fn test_deletions() {
        let mut fixture = Fixture::initialized();
        fixture.commit_file("a.txt", "a", "one");
        fixture.commit_file("b.txt", "b", "two");
        fixture.state.working_directory.remove("a.txt");
        fixture.state.working_directory.remove("b.txt");
        fixture.git("add b.txt").unwrap();

        let output = fixture.git("status").unwrap();
        assert!(output.contains("Changes to be committed:"));
        assert!(output.contains("\tdeleted:    b.txt"));
        assert!(output.contains("Changes not staged for commit:"));
        assert!(output.contains("\tdeleted:    a.txt"));
    }

    #[test]
    fn test_short_format() {
        let mut fixture = Fixture::initialized();
        fixture.commit_file("a.txt", "a", "one");
        fixture.write("a.txt", "changed");
        fixture.write("new.txt", "n");

        assert_eq!(fixture.git("status -s").unwrap(), " M a.txt\n?? new.txt");
    }

    #[test]
    fn test_merge_status() {
        let mut fixture = Fixture::initialized();
        fixture.state.merge_in_progress = Some(MergeInProgress::new(
            "feature",
            vec!["README.md".to_string()],
        ));
        let output = fixture.git("status").unwrap();
        assert!(output.contains("You have unmerged paths."));
        assert!(output.ends_with("\tboth modified: README.md"));

        fixture.state.merge_in_progress = Some(MergeInProgress::new("feature", vec![]));
        let output = fixture.git("status").unwrap();
        assert!(output.contains("All conflicts fixed but you are still merging."));
    }
}
