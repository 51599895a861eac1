//! Working-tree manipulation shared by both shell dialects.
//!
//! Operations work on normalised paths and report failures as [`TreeError`];
//! each dialect turns those into its own wording. Removing or moving paths
//! also drops their staging entries and pending conflict bookkeeping.

use crate::core::{
    error::TreeError,
    paths,
    state::{FileState, RepositoryState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntryKind {
    File,
    Directory,
}

/// Direct child of a directory, as shown by listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub size: usize,
    pub timestamp: i64,
}

impl Entry {
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

fn require_parent(state: &RepositoryState, path: &str) -> Result<(), TreeError> {
    if state.parent_exists(path) {
        Ok(())
    } else {
        Err(TreeError::ParentMissing(path.to_string()))
    }
}

/// Create or replace a file, or append to it
pub(crate) fn write_file(
    state: &mut RepositoryState,
    path: &str,
    content: &str,
    append: bool,
    timestamp: i64,
) -> Result<(), TreeError> {
    if state.is_directory(path) {
        return Err(TreeError::IsDirectory(path.to_string()));
    }
    require_parent(state, path)?;

    let mut new_content = String::new();
    if append {
        if let Some(existing) = state.working_directory.get(path) {
            new_content.push_str(&existing.content);
        }
    }
    new_content.push_str(content);
    state
        .working_directory
        .insert(path.to_string(), FileState::new(new_content, timestamp));
    Ok(())
}

/// Create an empty file or refresh the timestamp of an existing one
pub(crate) fn touch(
    state: &mut RepositoryState,
    path: &str,
    timestamp: i64,
) -> Result<(), TreeError> {
    if state.is_directory(path) {
        return Ok(());
    }
    require_parent(state, path)?;
    state
        .working_directory
        .entry(path.to_string())
        .and_modify(|file| file.timestamp = timestamp)
        .or_insert_with(|| FileState::new("", timestamp));
    Ok(())
}

/// Create a directory; with `parents`, missing ancestors too and existing directories are fine
pub(crate) fn make_directory(
    state: &mut RepositoryState,
    path: &str,
    parents: bool,
) -> Result<(), TreeError> {
    if state.is_directory(path) {
        return if parents {
            Ok(())
        } else {
            Err(TreeError::AlreadyExists(path.to_string()))
        };
    }
    if state.is_file(path) {
        return Err(TreeError::AlreadyExists(path.to_string()));
    }
    if parents {
        if let Some(blocking) = paths::ancestors(path).find(|dir| state.is_file(dir)) {
            return Err(TreeError::NotDirectory(blocking.to_string()));
        }
        state.ensure_parent_directories(path);
    } else {
        require_parent(state, path)?;
    }
    state.directories.insert(path.to_string());
    Ok(())
}

/// Whether a directory holds any file or subdirectory
pub(crate) fn has_children(state: &RepositoryState, dir: &str) -> bool {
    state
        .working_directory
        .keys()
        .any(|path| paths::is_below(path, dir))
        || state.directories.iter().any(|path| paths::is_below(path, dir))
}

/// Remove a file, or with `recursive` a directory and everything below it
pub(crate) fn remove(
    state: &mut RepositoryState,
    path: &str,
    recursive: bool,
) -> Result<(), TreeError> {
    if state.is_file(path) {
        state.working_directory.remove(path);
        state.forget_paths(&[path.to_string()]);
        return Ok(());
    }
    if !state.is_directory(path) {
        return Err(TreeError::NotFound(path.to_string()));
    }
    if !recursive {
        return Err(TreeError::IsDirectory(path.to_string()));
    }

    let removed: Vec<String> = state
        .working_directory
        .keys()
        .filter(|file| paths::is_below(file, path))
        .cloned()
        .collect();
    for file in &removed {
        state.working_directory.remove(file);
    }
    state.directories.retain(|dir| !paths::is_within(dir, path));
    state.forget_paths(&removed);
    Ok(())
}

/// Final destination of a copy or move: inside `dest` when it is an existing directory
pub(crate) fn resolve_target(state: &RepositoryState, src: &str, dest: &str) -> String {
    if state.is_directory(dest) {
        paths::join(dest, paths::base_name(src))
    } else {
        dest.to_string()
    }
}

/// Copy `src` to exactly `target`; directories need `recursive` and merge into an existing target
///
/// Returns the number of files copied.
pub(crate) fn copy(
    state: &mut RepositoryState,
    src: &str,
    target: &str,
    recursive: bool,
    timestamp: i64,
) -> Result<usize, TreeError> {
    if let Some(file) = state.working_directory.get(src).cloned() {
        if state.is_directory(target) {
            return Err(TreeError::IsDirectory(target.to_string()));
        }
        require_parent(state, target)?;
        state
            .working_directory
            .insert(target.to_string(), FileState::new(file.content, timestamp));
        return Ok(1);
    }
    if !state.is_directory(src) {
        return Err(TreeError::NotFound(src.to_string()));
    }
    if !recursive {
        return Err(TreeError::RecursionRequired(src.to_string()));
    }
    if state.is_file(target) {
        return Err(TreeError::OverwriteNonDirectory {
            src: src.to_string(),
            dest: target.to_string(),
        });
    }
    if paths::is_within(target, src) {
        return Err(TreeError::IntoItself {
            src: src.to_string(),
            dest: target.to_string(),
        });
    }
    require_parent(state, target)?;

    let files: Vec<(String, FileState)> = state
        .working_directory
        .iter()
        .filter(|(path, _)| paths::is_below(path, src))
        .map(|(path, file)| {
            (
                paths::rebase(path, src, target),
                FileState::new(file.content.clone(), timestamp),
            )
        })
        .collect();
    let directories: Vec<String> = state
        .directories
        .iter()
        .filter(|dir| paths::is_below(dir, src))
        .map(|dir| paths::rebase(dir, src, target))
        .collect();

    let copied = files.len();
    state.directories.insert(target.to_string());
    state.directories.extend(directories);
    state.working_directory.extend(files);
    Ok(copied)
}

/// Copy only the files directly inside directory `src` into directory `target`
pub(crate) fn copy_shallow(
    state: &mut RepositoryState,
    src: &str,
    target: &str,
    timestamp: i64,
) -> Result<usize, TreeError> {
    if !state.is_directory(src) {
        return Err(TreeError::NotFound(src.to_string()));
    }
    if state.is_file(target) {
        return Err(TreeError::OverwriteNonDirectory {
            src: src.to_string(),
            dest: target.to_string(),
        });
    }
    require_parent(state, target)?;

    let files: Vec<(String, FileState)> = children(state, src, timestamp)
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::File)
        .filter_map(|entry| {
            let from = paths::join(src, &entry.name);
            state.working_directory.get(&from).map(|file| {
                (
                    paths::join(target, &entry.name),
                    FileState::new(file.content.clone(), timestamp),
                )
            })
        })
        .collect();
    let copied = files.len();
    state.directories.insert(target.to_string());
    state.working_directory.extend(files);
    Ok(copied)
}

/// Move `src` to exactly `target`, keeping file timestamps
pub(crate) fn move_path(
    state: &mut RepositoryState,
    src: &str,
    target: &str,
) -> Result<EntryKind, TreeError> {
    if src == target {
        return if state.path_exists(src) {
            Ok(kind_of(state, src))
        } else {
            Err(TreeError::NotFound(src.to_string()))
        };
    }

    if let Some(file) = state.working_directory.get(src).cloned() {
        if state.is_directory(target) {
            return Err(TreeError::IsDirectory(target.to_string()));
        }
        require_parent(state, target)?;
        state.working_directory.remove(src);
        state.working_directory.insert(target.to_string(), file);
        state.forget_paths(&[src.to_string()]);
        return Ok(EntryKind::File);
    }
    if !state.is_directory(src) {
        return Err(TreeError::NotFound(src.to_string()));
    }
    if paths::is_within(target, src) {
        return Err(TreeError::IntoItself {
            src: src.to_string(),
            dest: target.to_string(),
        });
    }
    if state.is_file(target) {
        return Err(TreeError::OverwriteNonDirectory {
            src: src.to_string(),
            dest: target.to_string(),
        });
    }
    if state.is_directory(target) {
        return Err(TreeError::DirectoryNotEmpty(target.to_string()));
    }
    require_parent(state, target)?;

    let moved: Vec<String> = state
        .working_directory
        .keys()
        .filter(|path| paths::is_below(path, src))
        .cloned()
        .collect();
    for path in &moved {
        if let Some(file) = state.working_directory.remove(path) {
            state
                .working_directory
                .insert(paths::rebase(path, src, target), file);
        }
    }
    let directories: Vec<String> = state
        .directories
        .iter()
        .filter(|dir| paths::is_within(dir, src))
        .cloned()
        .collect();
    for dir in &directories {
        state.directories.remove(dir);
        state.directories.insert(paths::rebase(dir, src, target));
    }
    state.forget_paths(&moved);
    Ok(EntryKind::Directory)
}

fn kind_of(state: &RepositoryState, path: &str) -> EntryKind {
    if state.is_directory(path) {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

/// Direct children of `dir` (empty for the root), sorted by name
///
/// A directory reports the newest timestamp below it, or `fallback` when empty.
pub(crate) fn children(state: &RepositoryState, dir: &str, fallback: i64) -> Vec<Entry> {
    let is_child = |path: &str| paths::parent_path(path) == dir && path != dir;

    let mut entries: Vec<Entry> = state
        .working_directory
        .iter()
        .filter(|(path, _)| is_child(path.as_str()))
        .map(|(path, file)| Entry {
            name: paths::base_name(path).to_string(),
            kind: EntryKind::File,
            size: file.size(),
            timestamp: file.timestamp,
        })
        .collect();

    entries.extend(
        state
            .directories
            .iter()
            .filter(|path| is_child(path.as_str()))
            .map(|path| Entry {
                name: paths::base_name(path).to_string(),
                kind: EntryKind::Directory,
                size: 4096,
                timestamp: state
                    .working_directory
                    .iter()
                    .filter(|(file, _)| paths::is_below(file, path))
                    .map(|(_, file)| file.timestamp)
                    .max()
                    .unwrap_or(fallback),
            }),
    );
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
