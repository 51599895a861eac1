//! POSIX-like shell verbs: ls, touch, echo, cat, mkdir, rm, cp, mv, pwd, clear.

use crate::core::{
    clock::format_listing_date,
    context::CommandContext,
    dialect::Dialect,
    error::{ShellError, TreeError},
    paths,
};
use crate::shell::{
    echo_text,
    tree::{self, Entry, EntryKind},
    ShellReply,
};
use std::collections::BTreeSet;

/// Single-letter flags and the remaining operands, normalised
fn split_flags(args: &[&str]) -> (BTreeSet<char>, Vec<String>) {
    let mut flags = BTreeSet::new();
    let mut operands = Vec::new();
    for arg in args {
        match arg.strip_prefix('-') {
            Some(letters) if !letters.is_empty() && !letters.starts_with('-') => {
                flags.extend(letters.chars());
            }
            _ => operands.push(paths::normalize(arg, Dialect::Posix)),
        }
    }
    (flags, operands)
}

pub(crate) fn run(ctx: &mut CommandContext, verb: &str, args: &[&str]) -> Result<ShellReply, ShellError> {
    let text = match verb {
        "ls" => list(ctx, args)?,
        "touch" => touch(ctx, args)?,
        "echo" => echo_text(args, Dialect::Posix),
        "cat" => cat(ctx, args)?,
        "mkdir" => make_directory(ctx, args)?,
        "rm" => remove(ctx, args)?,
        "cp" => copy(ctx, args)?,
        "mv" => move_path(ctx, args)?,
        "pwd" => Dialect::Posix.home().to_string(),
        "clear" => return Ok(ShellReply::Clear),
        other => return Err(ShellError::CommandNotFound(other.to_string())),
    };
    Ok(ShellReply::Text(text))
}

fn list(ctx: &CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (flags, operands) = split_flags(args);
    let show_hidden = flags.contains(&'a');
    let long = flags.contains(&'l');

    let mut entries: Vec<Entry> = match operands.first().map(String::as_str) {
        None | Some(".") => tree::children(ctx.state, "", ctx.now()),
        Some(path) if ctx.state.is_directory(path) => tree::children(ctx.state, path, ctx.now()),
        Some(path) => match ctx.state.working_directory.get(path) {
            Some(file) => vec![Entry {
                name: path.to_string(),
                kind: EntryKind::File,
                size: file.size(),
                timestamp: file.timestamp,
            }],
            None => return Err(ShellError::CannotAccess(path.to_string())),
        },
    };
    entries.retain(|entry| show_hidden || !entry.is_hidden());
    if flags.contains(&'t') {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.name.cmp(&b.name)));
    }

    if !long {
        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        return Ok(names.join("  "));
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|entry| {
            let mode = match entry.kind {
                EntryKind::Directory => "drwxr-xr-x",
                EntryKind::File => "-rw-r--r--",
            };
            format!(
                "{mode} 1 student student {:>5} {} {}",
                entry.size,
                format_listing_date(entry.timestamp),
                entry.name
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

fn touch(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, operands) = split_flags(args);
    if operands.is_empty() {
        return Err(ShellError::MissingFileOperand {
            cmd: "touch".to_string(),
        });
    }
    for path in &operands {
        let timestamp = ctx.now();
        tree::touch(ctx.state, path, timestamp).map_err(|_| ShellError::CannotTouch(path.clone()))?;
    }
    Ok(String::new())
}

fn cat(ctx: &CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, operands) = split_flags(args);
    if operands.is_empty() {
        return Err(ShellError::MissingFileOperand {
            cmd: "cat".to_string(),
        });
    }
    let mut output = String::new();
    for path in &operands {
        if ctx.state.is_directory(path) {
            return Err(ShellError::IsADirectory {
                cmd: "cat".to_string(),
                path: path.clone(),
            });
        }
        let file = ctx
            .state
            .working_directory
            .get(path)
            .ok_or_else(|| ShellError::NoSuchFile {
                cmd: "cat".to_string(),
                path: path.clone(),
            })?;
        output.push_str(&file.content);
    }
    Ok(output)
}

fn make_directory(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (flags, operands) = split_flags(args);
    if operands.is_empty() {
        return Err(ShellError::MissingOperand {
            cmd: "mkdir".to_string(),
        });
    }
    let parents = flags.contains(&'p');
    for path in &operands {
        tree::make_directory(ctx.state, path, parents).map_err(|err| match err {
            TreeError::AlreadyExists(_) => ShellError::DirectoryExists(path.clone()),
            TreeError::NotDirectory(_) => ShellError::DirectoryParentNotDirectory(path.clone()),
            _ => ShellError::DirectoryParentMissing(path.clone()),
        })?;
    }
    Ok(String::new())
}

fn remove(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (flags, operands) = split_flags(args);
    if operands.is_empty() {
        return Err(ShellError::MissingOperand {
            cmd: "rm".to_string(),
        });
    }
    let recursive = flags.contains(&'r') || flags.contains(&'R');
    let force = flags.contains(&'f');
    for path in &operands {
        match tree::remove(ctx.state, path, recursive) {
            Ok(()) => {}
            Err(TreeError::NotFound(_)) if force => {}
            Err(TreeError::IsDirectory(_)) => {
                return Err(ShellError::RemoveIsDirectory(path.clone()))
            }
            Err(_) => return Err(ShellError::CannotRemove(path.clone())),
        }
    }
    Ok(String::new())
}

/// Shared operand handling of cp and mv
fn source_and_destination(cmd: &str, args: &[&str]) -> Result<(BTreeSet<char>, String, String), ShellError> {
    let (flags, operands) = split_flags(args);
    match operands.as_slice() {
        [] => Err(ShellError::MissingFileOperand {
            cmd: cmd.to_string(),
        }),
        [src, dest] => Ok((flags, src.clone(), dest.clone())),
        _ => Err(ShellError::MissingDestination {
            cmd: cmd.to_string(),
        }),
    }
}

fn copy(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (flags, src, dest) = source_and_destination("cp", args)?;
    let recursive = flags.contains(&'r') || flags.contains(&'R');
    let target = tree::resolve_target(ctx.state, &src, &dest);
    let timestamp = ctx.now();

    tree::copy(ctx.state, &src, &target, recursive, timestamp)
        .map(|_| String::new())
        .map_err(|err| transfer_error("cp", err, &src, &target))
}

fn move_path(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, src, dest) = source_and_destination("mv", args)?;
    let target = tree::resolve_target(ctx.state, &src, &dest);

    tree::move_path(ctx.state, &src, &target)
        .map(|_| String::new())
        .map_err(|err| transfer_error("mv", err, &src, &target))
}

fn transfer_error(cmd: &str, err: TreeError, src: &str, target: &str) -> ShellError {
    match err {
        TreeError::NotFound(_) => ShellError::CannotStat {
            cmd: cmd.to_string(),
            path: src.to_string(),
        },
        TreeError::RecursionRequired(_) => ShellError::OmittingDirectory(src.to_string()),
        TreeError::OverwriteNonDirectory { .. } => ShellError::OverwriteNonDirectory {
            cmd: cmd.to_string(),
            src: src.to_string(),
            dest: target.to_string(),
        },
        TreeError::IsDirectory(_) => ShellError::OverwriteDirectory {
            cmd: cmd.to_string(),
            dest: target.to_string(),
        },
        TreeError::IntoItself { .. } if cmd == "mv" => ShellError::MoveIntoItself {
            src: src.to_string(),
            dest: target.to_string(),
        },
        TreeError::IntoItself { .. } => ShellError::CopyIntoItself {
            src: src.to_string(),
            dest: target.to_string(),
        },
        TreeError::DirectoryNotEmpty(_) => ShellError::MoveDirectoryNotEmpty {
            src: src.to_string(),
            dest: target.to_string(),
        },
        _ => ShellError::CannotCreateFile {
            cmd: cmd.to_string(),
            path: target.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::SteppingClock;
    use crate::core::state::{MergeInProgress, RepositoryState, StagedEntry, FileState};

    struct Shell {
        state: RepositoryState,
        clock: SteppingClock,
    }

    impl Shell {
        fn new() -> Self {
            Self {
                state: RepositoryState::new(),
                clock: SteppingClock::default(),
            }
        }

        fn run(&mut self, line: &str) -> Result<ShellReply, ShellError> {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let mut ctx = CommandContext::new(&mut self.state, &self.clock, Dialect::Posix);
            run(&mut ctx, tokens[0], &tokens[1..])
        }

        fn text(&mut self, line: &str) -> String {
            match self.run(line).unwrap() {
                ShellReply::Text(text) => text,
                ShellReply::Clear => panic!("unexpected clear"),
            }
        }
    }

    #[test]
    fn test_touch_ls_cat() {
        let mut shell = Shell::new();
        shell.text("touch b.txt a.txt");
        shell.text("mkdir docs");
        assert_eq!(shell.text("ls"), "a.txt  b.txt  docs");
        assert_eq!(shell.text("cat a.txt"), "");
        assert_eq!(
            shell.run("cat ghost.txt"),
            Err(ShellError::NoSuchFile {
                cmd: "cat".to_string(),
                path: "ghost.txt".to_string()
            })
        );
        assert_eq!(
            shell.run("cat docs").unwrap_err().to_string(),
            "cat: docs: Is a directory"
        );
    }

    #[test]
    fn test_ls_hidden_and_long() {
        let mut shell = Shell::new();
        shell.state.directories.insert(".git".to_string());
        shell.text("touch .env visible.txt");
        assert_eq!(shell.text("ls"), "visible.txt");
        assert_eq!(shell.text("ls -a"), ".env  .git  visible.txt");

        let long = shell.text("ls -la");
        let lines: Vec<&str> = long.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("drwxr-xr-x 1 student student  4096 "));
        assert!(lines[2].starts_with("-rw-r--r-- 1 student student     0 "));
        assert!(lines[2].ends_with(" visible.txt"));

        assert_eq!(
            shell.run("ls nowhere").unwrap_err().to_string(),
            "ls: cannot access 'nowhere': No such file or directory"
        );
    }

    #[test]
    fn test_mkdir_errors() {
        let mut shell = Shell::new();
        shell.text("mkdir src");
        assert_eq!(
            shell.run("mkdir src").unwrap_err().to_string(),
            "mkdir: cannot create directory ‘src’: File exists"
        );
        assert_eq!(
            shell.run("mkdir a/b").unwrap_err().to_string(),
            "mkdir: cannot create directory ‘a/b’: No such file or directory"
        );
        shell.text("mkdir -p a/b/c");
        assert!(shell.state.is_directory("a/b"));
        assert_eq!(
            shell.run("mkdir").unwrap_err().to_string(),
            "mkdir: missing operand"
        );
    }

    #[test]
    fn test_rm_variants() {
        let mut shell = Shell::new();
        shell.text("mkdir -p d/e");
        shell.text("touch d/e/f.txt x.txt");

        assert_eq!(
            shell.run("rm d").unwrap_err().to_string(),
            "rm: cannot remove 'd': Is a directory"
        );
        assert_eq!(
            shell.run("rm ghost").unwrap_err().to_string(),
            "rm: cannot remove 'ghost': No such file or directory"
        );
        shell.text("rm -f ghost");
        shell.text("rm -rf d");
        shell.text("rm x.txt");
        assert!(shell.state.working_directory.is_empty());
        assert!(shell.state.directories.is_empty());
    }

    #[test]
    fn test_rm_prunes_staging_and_conflicts() {
        let mut shell = Shell::new();
        shell.text("touch a.txt");
        shell.state.staging_area.insert(
            "a.txt".to_string(),
            StagedEntry::Present(FileState::new("", 0)),
        );
        shell.state.merge_in_progress =
            Some(MergeInProgress::new("feature", vec!["a.txt".to_string()]));

        shell.text("rm a.txt");
        assert!(shell.state.staging_area.is_empty());
        assert!(shell.state.merge_in_progress.unwrap().is_resolved());
    }

    #[test]
    fn test_cp_and_mv() {
        let mut shell = Shell::new();
        shell.text("mkdir docs");
        shell.state.working_directory.insert("a.txt".to_string(), FileState::new("A\n", 0));

        shell.text("cp a.txt b.txt");
        assert_eq!(shell.state.working_directory["b.txt"].content, "A\n");

        shell.text("cp a.txt docs");
        assert!(shell.state.is_file("docs/a.txt"));

        assert_eq!(
            shell.run("cp docs manual").unwrap_err().to_string(),
            "cp: -r not specified; omitting directory 'docs'"
        );
        shell.text("cp -r docs manual");
        assert!(shell.state.is_file("manual/a.txt"));

        shell.text("mv b.txt docs/");
        assert!(shell.state.is_file("docs/b.txt"));
        assert!(!shell.state.is_file("b.txt"));

        assert_eq!(
            shell.run("mv ghost x").unwrap_err().to_string(),
            "mv: cannot stat 'ghost': No such file or directory"
        );
        assert_eq!(
            shell.run("cp a.txt").unwrap_err().to_string(),
            "cp: missing destination file operand"
        );
        assert_eq!(
            shell.run("mv docs docs/inner").unwrap_err().to_string(),
            "mv: cannot move 'docs' to a subdirectory of itself, 'docs/inner'"
        );
    }

    #[test]
    fn test_pwd_clear_and_unknown() {
        let mut shell = Shell::new();
        assert_eq!(shell.text("pwd"), "/home/student/git-gud");
        assert_eq!(shell.run("clear"), Ok(ShellReply::Clear));
        assert_eq!(
            shell.run("vim").unwrap_err().to_string(),
            "bash: command not found: vim"
        );
    }
}
