//! Common assertion helpers for simulator output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// `[<branch> <id>] <message>` as printed by a successful commit
pub fn commit_line(branch: &str, message: &str) -> impl Predicate<str> {
    let pattern = format!(
        r"^\[{} [0-9a-f]{{7}}(#\d+)?\] {}$",
        regex_escape(branch),
        regex_escape(message)
    );
    predicates::str::is_match(pattern).expect("valid commit line pattern")
}

/// Output of a failed precondition check
pub fn fatal() -> impl Predicate<str> {
    predicates::str::starts_with("fatal:").or(predicates::str::starts_with("error:"))
}

pub fn not_a_repository() -> impl Predicate<str> {
    predicates::str::contains("fatal: not a git repository (or any of the parent directories): .git")
}

/// Checks for an entry in a long `git status` listing
pub fn has_status(label: &str, path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("\t{:<12}{}", format!("{label}:"), path))
}

pub fn clean_tree() -> impl Predicate<str> {
    predicates::str::ends_with("nothing to commit, working tree clean")
}

fn regex_escape(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let escape = "\\.+*?()|[]{}^$".contains(c);
            escape.then_some('\\').into_iter().chain(std::iter::once(c))
        })
        .collect()
}
