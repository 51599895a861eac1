//! DOS-like shell verbs: dir, echo, type, md, del, rd, copy, xcopy, move, ren, cd, cls.
//!
//! Verbs are case-insensitive, switches start with `/` and paths may use
//! backslashes.

use crate::core::{
    clock::format_dos_date,
    context::CommandContext,
    dialect::Dialect,
    error::{ShellError, TreeError},
    paths,
};
use crate::shell::{
    echo_text,
    tree::{self, EntryKind},
    ShellReply,
};
use std::collections::BTreeSet;

/// Lower-cased switch letters and the remaining operands, normalised
fn split_switches(args: &[&str]) -> (BTreeSet<char>, Vec<String>) {
    let mut switches = BTreeSet::new();
    let mut operands = Vec::new();
    for arg in args {
        match arg.strip_prefix('/') {
            Some(letters) if !letters.is_empty() => {
                switches.extend(letters.chars().filter(|c| *c != '/').map(|c| c.to_ascii_lowercase()));
            }
            _ => operands.push(paths::normalize(arg, Dialect::Dos)),
        }
    }
    (switches, operands)
}

pub(crate) fn run(ctx: &mut CommandContext, verb: &str, args: &[&str]) -> Result<ShellReply, ShellError> {
    let text = match verb.to_ascii_lowercase().as_str() {
        "dir" => list(ctx, args)?,
        "echo" if args.is_empty() => "ECHO is on.".to_string(),
        "echo" => echo_text(args, Dialect::Dos),
        "echo." => String::new(),
        "type" => show(ctx, args)?,
        "md" | "mkdir" => make_directory(ctx, args)?,
        "del" | "erase" => delete(ctx, args)?,
        "rd" | "rmdir" => remove_directory(ctx, args)?,
        "copy" => copy(ctx, args)?,
        "xcopy" => xcopy(ctx, args)?,
        "move" => move_path(ctx, args)?,
        "ren" | "rename" => rename(ctx, args)?,
        "cd" | "chdir" => change_directory(args)?,
        "cls" => return Ok(ShellReply::Clear),
        _ => return Err(ShellError::NotRecognized(verb.to_string())),
    };
    Ok(ShellReply::Text(text))
}

fn list(ctx: &CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (switches, operands) = split_switches(args);
    let show_hidden = switches.contains(&'a');
    let dir = operands.first().map(String::as_str).unwrap_or("");
    let dir = if dir == "." { "" } else { dir };

    let location = if dir.is_empty() {
        Dialect::Dos.home().to_string()
    } else {
        format!("{}\\{}", Dialect::Dos.home(), paths::to_dos(dir))
    };
    let mut output = format!(
        " Volume in drive C has no label.\n Volume Serial Number is 1A2B-3C4D\n\n Directory of {location}\n\n"
    );

    let now = ctx.now();
    let mut entries = if dir.is_empty() || ctx.state.is_directory(dir) {
        tree::children(ctx.state, dir, now)
    } else {
        Vec::new()
    };
    entries.retain(|entry| show_hidden || !entry.is_hidden());
    if entries.is_empty() {
        output.push_str("File Not Found");
        return Ok(output);
    }

    let mut files = 0;
    let mut directories = 0;
    let mut bytes = 0;
    for entry in &entries {
        let date = format_dos_date(entry.timestamp);
        match entry.kind {
            EntryKind::Directory => {
                directories += 1;
                output.push_str(&format!("{date}    <DIR>          {}\n", entry.name));
            }
            EntryKind::File => {
                files += 1;
                bytes += entry.size;
                output.push_str(&format!("{date}    {:>14} {}\n", entry.size, entry.name));
            }
        }
    }
    output.push_str(&format!("{files:>16} File(s) {bytes:>14} bytes\n"));
    output.push_str(&format!("{directories:>16} Dir(s)"));
    Ok(output)
}

fn show(ctx: &CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, operands) = split_switches(args);
    let [path] = operands.as_slice() else {
        return Err(ShellError::SyntaxIncorrect);
    };
    if path.eq_ignore_ascii_case("nul") {
        return Ok(String::new());
    }
    if ctx.state.is_directory(path) {
        return Err(ShellError::AccessDenied);
    }
    ctx.state
        .working_directory
        .get(path)
        .map(|file| file.content.clone())
        .ok_or(ShellError::FileNotFound)
}

fn make_directory(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, operands) = split_switches(args);
    if operands.is_empty() {
        return Err(ShellError::SyntaxIncorrect);
    }
    for path in &operands {
        tree::make_directory(ctx.state, path, false).map_err(|err| match err {
            TreeError::AlreadyExists(_) => ShellError::SubdirectoryExists(paths::to_dos(path)),
            _ => ShellError::PathNotFound,
        })?;
    }
    Ok(String::new())
}

fn delete(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, operands) = split_switches(args);
    if operands.is_empty() {
        return Err(ShellError::SyntaxIncorrect);
    }
    for path in &operands {
        if !ctx.state.is_file(path) {
            return Err(ShellError::CouldNotFind(paths::to_dos(path)));
        }
        tree::remove(ctx.state, path, false)
            .map_err(|_| ShellError::CouldNotFind(paths::to_dos(path)))?;
    }
    Ok(String::new())
}

fn remove_directory(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (switches, operands) = split_switches(args);
    if operands.is_empty() {
        return Err(ShellError::SyntaxIncorrect);
    }
    let recursive = switches.contains(&'s');
    for path in &operands {
        if !ctx.state.is_directory(path) {
            return Err(if ctx.state.is_file(path) {
                ShellError::InvalidDirectoryName
            } else {
                ShellError::FileNotFound
            });
        }
        if !recursive && tree::has_children(ctx.state, path) {
            return Err(ShellError::DirectoryNotEmpty);
        }
        tree::remove(ctx.state, path, true).map_err(|_| ShellError::FileNotFound)?;
    }
    Ok(String::new())
}

fn two_operands(args: &[&str]) -> Result<(BTreeSet<char>, String, String), ShellError> {
    let (switches, operands) = split_switches(args);
    match operands.as_slice() {
        [src, dest] => Ok((switches, src.clone(), dest.clone())),
        _ => Err(ShellError::SyntaxIncorrect),
    }
}

fn copy(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, src, dest) = two_operands(args)?;
    if !ctx.state.is_file(&src) {
        return Err(ShellError::FileNotFound);
    }
    let target = tree::resolve_target(ctx.state, &src, &dest);
    let timestamp = ctx.now();
    tree::copy(ctx.state, &src, &target, false, timestamp).map_err(|err| match err {
        TreeError::IsDirectory(_) => ShellError::AccessDenied,
        _ => ShellError::PathNotFound,
    })?;
    Ok("        1 file(s) copied.".to_string())
}

/// Copies directory contents into the destination, recursing with `/s` or `/e`
fn xcopy(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (switches, operands) = split_switches(args);
    let [src, dest] = operands.as_slice() else {
        return Err(ShellError::InvalidParameterCount);
    };
    let recursive = switches.contains(&'s') || switches.contains(&'e');
    let timestamp = ctx.now();

    let result = if ctx.state.is_file(src) {
        let target = tree::resolve_target(ctx.state, src, dest);
        tree::copy(ctx.state, src, &target, false, timestamp)
    } else if !ctx.state.is_directory(src) {
        return Err(ShellError::XcopyFileNotFound(paths::to_dos(src)));
    } else if recursive {
        tree::copy(ctx.state, src, dest, true, timestamp)
    } else {
        tree::copy_shallow(ctx.state, src, dest, timestamp)
    };
    let copied = result.map_err(|_| ShellError::InvalidPath)?;

    Ok(format!("{copied} File(s) copied"))
}

fn move_path(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, src, dest) = two_operands(args)?;
    if !ctx.state.path_exists(&src) {
        return Err(ShellError::FileNotFound);
    }
    let target = tree::resolve_target(ctx.state, &src, &dest);
    let kind = tree::move_path(ctx.state, &src, &target).map_err(|err| match err {
        TreeError::ParentMissing(_) => ShellError::PathNotFound,
        _ => ShellError::AccessDenied,
    })?;
    Ok(match kind {
        EntryKind::File => "        1 file(s) moved.".to_string(),
        EntryKind::Directory => "        1 dir(s) moved.".to_string(),
    })
}

/// Rename in place; the new name must not contain a path
fn rename(ctx: &mut CommandContext, args: &[&str]) -> Result<String, ShellError> {
    let (_, src, name) = two_operands(args)?;
    if name.contains('/') {
        return Err(ShellError::SyntaxIncorrect);
    }
    if !ctx.state.path_exists(&src) {
        return Err(ShellError::FileNotFound);
    }
    let target = paths::join(paths::parent_path(&src), &name);
    if ctx.state.path_exists(&target) {
        return Err(ShellError::DuplicateFileName);
    }
    tree::move_path(ctx.state, &src, &target).map_err(|_| ShellError::DuplicateFileName)?;
    Ok(String::new())
}

/// Only the repository root is reachable
fn change_directory(args: &[&str]) -> Result<String, ShellError> {
    match args {
        [] | ["."] => Ok(Dialect::Dos.home().to_string()),
        _ => Err(ShellError::PathNotFound),
    }
}
