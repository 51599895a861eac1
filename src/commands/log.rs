use crate::core::{
    clock::format_log_date,
    context::CommandContext,
    error::GitError,
    state::{Commit, RepositoryState, ROOT_COMMIT_ID},
};

const AUTHOR: &str = "Git Gud <git.gud@example.com>";

#[derive(Debug, Default, PartialEq, Eq)]
struct LogOptions {
    revision: Option<String>,
    limit: Option<usize>,
    oneline: bool,
    graph: bool,
}

impl LogOptions {
    fn parse(args: &[&str]) -> Result<Self, GitError> {
        let mut options = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match *arg {
                "--oneline" => options.oneline = true,
                "--graph" => options.graph = true,
                "-n" | "--max-count" => {
                    let value = iter.next().ok_or_else(|| GitError::InvalidCount(String::new()))?;
                    options.limit = Some(parse_count(value)?);
                }
                flag if flag.starts_with("--max-count=") => {
                    options.limit = Some(parse_count(&flag["--max-count=".len()..])?);
                }
                flag if flag.len() > 1
                    && flag.starts_with('-')
                    && flag[1..].chars().all(|c| c.is_ascii_digit()) =>
                {
                    options.limit = Some(parse_count(&flag[1..])?);
                }
                flag if flag.starts_with('-') => {
                    log::debug!("Ignoring unsupported log option {flag}");
                }
                revision => {
                    if options.revision.is_none() {
                        options.revision = Some(revision.to_string());
                    }
                }
            }
        }
        Ok(options)
    }
}

fn parse_count(value: &str) -> Result<usize, GitError> {
    value
        .parse()
        .map_err(|_| GitError::InvalidCount(value.to_string()))
}

/// Show history along first parents, newest first, excluding the root commit
pub fn execute_log(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    let options = LogOptions::parse(args)?;
    let (label, tip) = match &options.revision {
        Some(revision) => {
            let tip = ctx
                .state
                .resolve_revision(revision)
                .ok_or_else(|| GitError::AmbiguousArgument(revision.clone()))?;
            (revision.clone(), tip.to_string())
        }
        None => (ctx.state.head.clone(), ctx.head_tip()?),
    };

    if tip == ROOT_COMMIT_ID {
        return Ok(format!(
            "fatal: your current branch '{label}' does not have any commits yet"
        ));
    }

    let state: &RepositoryState = ctx.state;
    let limit = options.limit.unwrap_or(usize::MAX);
    let commits: Vec<&Commit> = state
        .first_parent_chain(&tip)
        .iter()
        .filter(|id| id.as_str() != ROOT_COMMIT_ID)
        .take(limit)
        .filter_map(|id| state.commits.get(id))
        .collect();

    let separator = if options.oneline { "\n" } else { "\n\n" };
    Ok(commits
        .iter()
        .map(|commit| render_commit(state, commit, &options))
        .collect::<Vec<_>>()
        .join(separator))
}

fn render_commit(state: &RepositoryState, commit: &Commit, options: &LogOptions) -> String {
    let tags = state.tags_for(&commit.id);
    let prefix = if options.graph { "* " } else { "" };

    if options.oneline {
        let decoration = if tags.is_empty() {
            String::new()
        } else {
            let names: Vec<String> = tags.iter().map(|tag| format!("tag: {tag}")).collect();
            format!(" ({})", names.join(", "))
        };
        return format!("{prefix}{}{decoration} {}", commit.id, commit.message);
    }

    let mut block = format!("{prefix}commit {}\n", commit.id);
    if !tags.is_empty() {
        let names: Vec<String> = tags.iter().map(|tag| format!("tag: {tag}")).collect();
        block.push_str(&names.join(", "));
        block.push('\n');
    }
    block.push_str(&format!("Author: {AUTHOR}\n"));
    block.push_str(&format!("Date:   {}\n\n", format_log_date(commit.timestamp)));
    block.push_str(&format!("    {}", commit.message));
    block
}
