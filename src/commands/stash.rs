use crate::commands::status::render_long;
use crate::core::{context::CommandContext, error::GitError, state::StashEntry};
use std::collections::BTreeMap;

/// Shelve working-tree changes on a stack and bring them back later
pub fn execute_stash(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    ctx.require_no_merge()?;
    match args.first().copied().unwrap_or("push") {
        "push" | "save" => push(ctx),
        "pop" => apply(ctx, true),
        "apply" => apply(ctx, false),
        "list" => Ok(list(ctx)),
        "drop" => drop_top(ctx),
        "clear" => {
            ctx.state.stash.clear();
            Ok(String::new())
        }
        other => Err(GitError::UnknownSubcommand(other.to_string())),
    }
}

fn push(ctx: &mut CommandContext) -> Result<String, GitError> {
    let head_files = ctx.head_commit()?.files.clone();
    let changed: BTreeMap<_, _> = ctx
        .state
        .working_directory
        .iter()
        .filter(|(path, file)| {
            head_files
                .get(*path)
                .map_or(true, |committed| committed.content != file.content)
        })
        .map(|(path, file)| (path.clone(), file.clone()))
        .collect();
    if changed.is_empty() {
        return Ok("No local changes to save".to_string());
    }

    let message = format!("WIP on {}", ctx.state.head);
    ctx.state.stash.push(StashEntry {
        message: message.clone(),
        files: changed,
    });
    let directories = ctx.state.directories.clone();
    ctx.state.replace_working_tree(head_files);
    ctx.state.directories.extend(directories);
    ctx.state.staging_area.clear();

    Ok(format!("Saved working directory and index state {message}"))
}

fn apply(ctx: &mut CommandContext, remove: bool) -> Result<String, GitError> {
    let Some(entry) = ctx.state.stash.last().cloned() else {
        return Ok("No stash entries found.".to_string());
    };
    for (path, file) in entry.files {
        ctx.state.ensure_parent_directories(&path);
        ctx.state.working_directory.insert(path, file);
    }

    let mut output = render_long(ctx.state);
    if remove {
        ctx.state.stash.pop();
        output.push_str("\nDropped refs/stash@{0}");
    }
    Ok(output)
}

fn list(ctx: &CommandContext) -> String {
    ctx.state
        .stash
        .iter()
        .rev()
        .enumerate()
        .map(|(index, entry)| format!("stash@{{{index}}}: {}", entry.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn drop_top(ctx: &mut CommandContext) -> Result<String, GitError> {
    match ctx.state.stash.pop() {
        Some(_) => Ok("Dropped refs/stash@{0}".to_string()),
        None => Ok("No stash entries found.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::test_support::Fixture;
    use crate::core::error::GitError;

    #[test]
    fn test_push_and_pop_round_trip() {
        let mut fixture = Fixture::initialized();
        fixture.commit_file("a.txt", "committed\n", "one");
        fixture.write("a.txt", "edited\n");
        fixture.write("new.txt", "new\n");

        let output = fixture.git("stash").unwrap();
        assert_eq!(output, "Saved working directory and index state WIP on main");
        assert_eq!(fixture.state.working_directory["a.txt"].content, "committed\n");
        assert!(!fixture.state.is_file("new.txt"));
        assert_eq!(fixture.state.stash.len(), 1);

        let output = fixture.git("stash pop").unwrap();
        assert!(output.ends_with("Dropped refs/stash@{0}"));
        assert!(output.contains("modified:   a.txt"));
        assert_eq!(fixture.state.working_directory["a.txt"].content, "edited\n");
        assert!(fixture.state.is_file("new.txt"));
        assert!(fixture.state.stash.is_empty());
    }

    #[test]
    fn test_apply_keeps_entry_and_list() {
        let mut fixture = Fixture::initialized();
        fixture.write("a.txt", "x");
        fixture.git("stash push").unwrap();
        fixture.git("stash apply").unwrap();

        assert_eq!(fixture.state.stash.len(), 1);
        assert_eq!(fixture.git("stash list").unwrap(), "stash@{0}: WIP on main");

        assert_eq!(fixture.git("stash drop").unwrap(), "Dropped refs/stash@{0}");
        assert_eq!(fixture.git("stash list").unwrap(), "");
    }

    #[test]
    fn test_nothing_to_stash_or_pop() {
        let mut fixture = Fixture::initialized();
        assert_eq!(fixture.git("stash").unwrap(), "No local changes to save");
        assert_eq!(fixture.git("stash pop").unwrap(), "No stash entries found.");
    }

    #[test]
    fn test_unknown_subcommand() {
        let mut fixture = Fixture::initialized();
        assert_eq!(
            fixture.git("stash show"),
            Err(GitError::UnknownSubcommand("show".to_string()))
        );
    }
}
