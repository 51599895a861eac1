//! Helpers for the slash-separated, repository-relative paths used as keys
//! of the working tree.

use crate::core::dialect::Dialect;

/// Directory part of `path`, empty for top-level entries
pub fn parent_path(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[..index],
        None => "",
    }
}

/// Last component of `path`
pub fn base_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

/// Join a directory and a name; an empty directory means the root
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Whether `path` equals `dir` or lies somewhere beneath it
pub fn is_within(path: &str, dir: &str) -> bool {
    path == dir
        || path
            .strip_prefix(dir)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Whether `path` lies strictly beneath `dir`
pub fn is_below(path: &str, dir: &str) -> bool {
    path != dir && is_within(path, dir)
}

/// Move `path` from under `from` to under `to`; `path` must be within `from`
pub fn rebase(path: &str, from: &str, to: &str) -> String {
    format!("{to}{}", &path[from.len()..])
}

/// Every proper ancestor directory of `path`, nearest first
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    let mut current = parent_path(path);
    std::iter::from_fn(move || {
        if current.is_empty() {
            return None;
        }
        let dir = current;
        current = parent_path(current);
        Some(dir)
    })
}

/// Normalise a user-typed path into a working-tree key
///
/// DOS separators are converted, leading `./` segments and trailing slashes
/// are dropped. A bare `.` stays as-is.
pub fn normalize(raw: &str, dialect: Dialect) -> String {
    let mut path = match dialect {
        Dialect::Dos => raw.replace('\\', "/"),
        Dialect::Posix => raw.to_string(),
    };
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

/// Render a working-tree key with DOS separators
pub fn to_dos(path: &str) -> String {
    path.replace('/', "\\")
}
