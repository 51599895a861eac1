//! Repository state data structures.
//!
//! Everything the simulator knows about a repository lives in one
//! [`RepositoryState`] value: the commit graph, branch and tag references, the
//! staging area, the working tree and the bookkeeping for stashes and merges.
//! The value is plain data; it serializes to the camelCase JSON layout used by
//! persisted sessions.
//!
//! # Public API
//! - [`FileState`]: Content of one file plus its last-modification time
//! - [`Commit`]: Immutable snapshot with parents and a full file map
//! - [`StagedEntry`]: Staged content or a staged deletion
//! - [`StashEntry`]: One saved set of working-tree changes
//! - [`MergeInProgress`]: Pending merge and its still-conflicted files
//! - [`RepositoryState`]: The complete aggregate
//!
//! # Invariants
//! - `head` names an existing branch once the repository is initialized
//! - every branch and tag references an existing commit id
//! - every directory recorded in `directories` has its parent recorded too

use crate::core::paths;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Id of the synthetic commit every repository starts from
pub const ROOT_COMMIT_ID: &str = "root";
/// Message of the synthetic root commit
pub const ROOT_COMMIT_MESSAGE: &str = "Initial empty commit";
/// Branch created by `git init`
pub const DEFAULT_BRANCH: &str = "main";
/// Metadata directory present in every initialized repository
pub const GIT_DIR: &str = ".git";

const CONFLICT_START: &str = "<<<<<<<";
const CONFLICT_END: &str = ">>>>>>>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileState {
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl FileState {
    pub fn new(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            content: content.into(),
            timestamp,
        }
    }

    /// Size in bytes as shown by directory listings
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    /// First entry is the mainline parent; merges carry a second one
    pub parents: Vec<String>,
    /// Complete snapshot, not a delta
    pub files: BTreeMap<String, FileState>,
    pub timestamp: i64,
}

impl Commit {
    pub fn root(timestamp: i64) -> Self {
        Self {
            id: ROOT_COMMIT_ID.to_string(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
            parents: Vec::new(),
            files: BTreeMap::new(),
            timestamp,
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_COMMIT_ID
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// Entry of the staging area
///
/// Serialized either as a plain [`FileState`] or as `{"status": "deleted"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StagedEntryRepr", into = "StagedEntryRepr")]
pub enum StagedEntry {
    Present(FileState),
    Deleted,
}

impl StagedEntry {
    pub fn file(&self) -> Option<&FileState> {
        match self {
            Self::Present(file) => Some(file),
            Self::Deleted => None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StagedEntryRepr {
    Deleted { status: DeletedMarker },
    Present(FileState),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DeletedMarker {
    Deleted,
}

impl From<StagedEntryRepr> for StagedEntry {
    fn from(repr: StagedEntryRepr) -> Self {
        match repr {
            StagedEntryRepr::Deleted { .. } => Self::Deleted,
            StagedEntryRepr::Present(file) => Self::Present(file),
        }
    }
}

impl From<StagedEntry> for StagedEntryRepr {
    fn from(entry: StagedEntry) -> Self {
        match entry {
            StagedEntry::Deleted => Self::Deleted {
                status: DeletedMarker::Deleted,
            },
            StagedEntry::Present(file) => Self::Present(file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashEntry {
    pub message: String,
    pub files: BTreeMap<String, FileState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeInProgress {
    pub branch_to_merge: String,
    pub conflicting_files: Vec<String>,
}

impl MergeInProgress {
    pub fn new(branch_to_merge: impl Into<String>, conflicting_files: Vec<String>) -> Self {
        Self {
            branch_to_merge: branch_to_merge.into(),
            conflicting_files,
        }
    }

    /// Drop `path` from the conflict list, returning whether it was listed
    pub fn resolve(&mut self, path: &str) -> bool {
        let before = self.conflicting_files.len();
        self.conflicting_files.retain(|file| file != path);
        before != self.conflicting_files.len()
    }

    pub fn is_resolved(&self) -> bool {
        self.conflicting_files.is_empty()
    }

    pub fn is_conflicted(&self, path: &str) -> bool {
        self.conflicting_files.iter().any(|file| file == path)
    }
}

/// Whether `content` still carries merge conflict markers
pub fn has_conflict_markers(content: &str) -> bool {
    content.contains(CONFLICT_START) || content.contains(CONFLICT_END)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryState {
    pub commits: BTreeMap<String, Commit>,
    pub branches: BTreeMap<String, String>,
    /// Name of the checked-out branch; empty before `git init`
    #[serde(rename = "HEAD")]
    pub head: String,
    pub staging_area: BTreeMap<String, StagedEntry>,
    pub working_directory: BTreeMap<String, FileState>,
    pub directories: BTreeSet<String>,
    /// Most recent entry last
    pub stash: Vec<StashEntry>,
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub merge_in_progress: Option<MergeInProgress>,
}

impl RepositoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        !self.head.is_empty() && self.branches.contains_key(&self.head)
    }

    pub fn branch_tip(&self, name: &str) -> Option<&str> {
        self.branches.get(name).map(String::as_str)
    }

    pub fn head_tip(&self) -> Option<&str> {
        self.branch_tip(&self.head)
    }

    pub fn head_commit(&self) -> Option<&Commit> {
        self.head_tip().and_then(|id| self.commits.get(id))
    }

    /// Resolve `HEAD`, a branch name or a tag name to a commit id
    pub fn resolve_revision(&self, revision: &str) -> Option<&str> {
        if revision == "HEAD" {
            return self.head_tip();
        }
        self.branch_tip(revision)
            .or_else(|| self.tags.get(revision).map(String::as_str))
            .filter(|id| self.commits.contains_key(*id))
    }

    /// Ids on the first-parent chain starting at `start`, newest first
    pub fn first_parent_chain(&self, start: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut cursor = Some(start.to_string());
        while let Some(id) = cursor {
            let Some(commit) = self.commits.get(&id) else {
                break;
            };
            cursor = commit.first_parent().map(str::to_string);
            chain.push(id);
        }
        chain
    }

    /// Tag names pointing at `commit_id`, sorted
    pub fn tags_for(&self, commit_id: &str) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|(_, target)| target.as_str() == commit_id)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.working_directory.contains_key(path)
    }

    pub fn is_directory(&self, path: &str) -> bool {
        self.directories.contains(path)
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.is_file(path) || self.is_directory(path)
    }

    /// Whether the directory holding `path` exists; the root always does
    pub fn parent_exists(&self, path: &str) -> bool {
        let parent = paths::parent_path(path);
        parent.is_empty() || self.is_directory(parent)
    }

    /// Record every ancestor directory of `path`
    pub fn ensure_parent_directories(&mut self, path: &str) {
        for dir in paths::ancestors(path) {
            self.directories.insert(dir.to_string());
        }
    }

    /// Replace the working tree with `files`, rebuilding the directory set
    pub fn replace_working_tree(&mut self, files: BTreeMap<String, FileState>) {
        let mut directories: BTreeSet<String> = BTreeSet::new();
        if self.is_initialized() {
            directories.insert(GIT_DIR.to_string());
        }
        for path in files.keys() {
            directories.extend(paths::ancestors(path).map(str::to_string));
        }
        self.working_directory = files;
        self.directories = directories;
    }

    /// Make the working tree mirror `commit_id` and empty the staging area
    pub fn checkout_tree(&mut self, commit_id: &str) {
        let files = self
            .commits
            .get(commit_id)
            .map(|commit| commit.files.clone())
            .unwrap_or_default();
        self.replace_working_tree(files);
        self.staging_area.clear();
    }

    /// Forget staging and conflict bookkeeping for paths that left the tree
    pub fn forget_paths(&mut self, removed: &[String]) {
        for path in removed {
            self.staging_area.remove(path);
        }
        if let Some(merge) = self.merge_in_progress.as_mut() {
            merge
                .conflicting_files
                .retain(|file| !removed.contains(file));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initialized() -> RepositoryState {
        let mut state = RepositoryState::new();
        state
            .commits
            .insert(ROOT_COMMIT_ID.to_string(), Commit::root(0));
        state
            .branches
            .insert(DEFAULT_BRANCH.to_string(), ROOT_COMMIT_ID.to_string());
        state.head = DEFAULT_BRANCH.to_string();
        state.directories.insert(GIT_DIR.to_string());
        state
    }

    #[test]
    fn test_staged_entry_serialization() {
        let present = StagedEntry::Present(FileState::new("hi\n", 5));
        let json = serde_json::to_string(&present).unwrap();
        assert_eq!(json, r#"{"content":"hi\n","timestamp":5}"#);

        let deleted = serde_json::to_string(&StagedEntry::Deleted).unwrap();
        assert_eq!(deleted, r#"{"status":"deleted"}"#);

        let parsed: StagedEntry = serde_json::from_str(&deleted).unwrap();
        assert!(parsed.is_deleted());
    }

    #[test]
    fn test_state_json_uses_session_field_names() {
        let state = initialized();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["HEAD"], "main");
        assert!(json.get("stagingArea").is_some());
        assert!(json.get("workingDirectory").is_some());
        assert_eq!(json.get("mergeInProgress"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_merge_in_progress_resolution() {
        let mut merge = MergeInProgress::new("feature", vec!["a.txt".into(), "b.txt".into()]);
        assert!(merge.resolve("a.txt"));
        assert!(!merge.resolve("a.txt"));
        assert!(!merge.is_resolved());
        assert!(merge.resolve("b.txt"));
        assert!(merge.is_resolved());
    }

    #[test]
    fn test_conflict_markers() {
        assert!(has_conflict_markers("<<<<<<< HEAD\na\n=======\nb\n>>>>>>> f"));
        assert!(!has_conflict_markers("resolved"));
    }

    #[test]
    fn test_replace_working_tree_rebuilds_directories() {
        let mut state = initialized();
        let mut files = BTreeMap::new();
        files.insert("src/lib/mod.rs".to_string(), FileState::new("", 0));
        state.replace_working_tree(files);

        assert!(state.is_directory(".git"));
        assert!(state.is_directory("src"));
        assert!(state.is_directory("src/lib"));
        assert!(state.is_file("src/lib/mod.rs"));
    }

    #[test]
    fn test_resolve_revision_prefers_branches() {
        let mut state = initialized();
        state.tags.insert("v1".to_string(), ROOT_COMMIT_ID.to_string());
        assert_eq!(state.resolve_revision("HEAD"), Some(ROOT_COMMIT_ID));
        assert_eq!(state.resolve_revision("v1"), Some(ROOT_COMMIT_ID));
        assert_eq!(state.resolve_revision("missing"), None);
    }
}
