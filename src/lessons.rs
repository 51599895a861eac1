//! Built-in lesson catalogue.
//!
//! Twelve experiments, each a list of exercises with per-dialect steps and a
//! goal predicate over a repository snapshot. [`evaluate`] reports which
//! goals a state satisfies; it never mutates the state.
//!
//! # Public API
//! - [`experiments`]: The full catalogue in course order
//! - [`Experiment`], [`Exercise`], [`Step`]: Catalogue entries
//! - [`evaluate`]: Goal progress for a state

use crate::core::{dialect::Dialect, state::Commit, state::RepositoryState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub command: &'static str,
    pub description: &'static str,
}

const fn step(command: &'static str, description: &'static str) -> Step {
    Step {
        command,
        description,
    }
}

pub type Goal = fn(&RepositoryState) -> bool;

#[derive(Clone, Copy)]
pub struct Exercise {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub posix_steps: &'static [Step],
    pub dos_steps: &'static [Step],
    pub goal: Goal,
}

impl Exercise {
    pub fn steps(&self, dialect: Dialect) -> &'static [Step] {
        match dialect {
            Dialect::Posix => self.posix_steps,
            Dialect::Dos => self.dos_steps,
        }
    }

    pub fn is_complete(&self, state: &RepositoryState) -> bool {
        (self.goal)(state)
    }
}

impl std::fmt::Debug for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exercise")
            .field("id", &self.id)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Experiment {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub exercises: &'static [Exercise],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseProgress {
    pub experiment_id: &'static str,
    pub exercise_id: &'static str,
    pub title: &'static str,
    pub completed: bool,
}

pub fn experiments() -> &'static [Experiment] {
    EXPERIMENTS
}

/// Goal status of every exercise, in course order
pub fn evaluate(state: &RepositoryState) -> Vec<ExerciseProgress> {
    EXPERIMENTS
        .iter()
        .flat_map(|experiment| {
            experiment.exercises.iter().map(|exercise| ExerciseProgress {
                experiment_id: experiment.id,
                exercise_id: exercise.id,
                title: exercise.title,
                completed: exercise.is_complete(state),
            })
        })
        .collect()
}

fn tip<'a>(state: &'a RepositoryState, branch: &str) -> Option<&'a Commit> {
    state.commits.get(state.branch_tip(branch)?)
}

fn head<'a>(state: &'a RepositoryState) -> Option<&'a Commit> {
    state.head_commit()
}

fn has_file(commit: Option<&Commit>, path: &str) -> bool {
    commit.is_some_and(|commit| commit.files.contains_key(path))
}

fn has_message(commit: Option<&Commit>, message: &str) -> bool {
    commit.is_some_and(|commit| commit.message == message)
}

fn is_merge(commit: Option<&Commit>) -> bool {
    commit.is_some_and(|commit| commit.parents.len() > 1)
}

fn working_file<'a>(state: &'a RepositoryState, path: &str) -> Option<&'a str> {
    state
        .working_directory
        .get(path)
        .map(|file| file.content.as_str())
}

/// Neither branch tip lies on the other's first-parent history
fn diverged(state: &RepositoryState, left: &str, right: &str) -> bool {
    let (Some(left), Some(right)) = (state.branch_tip(left), state.branch_tip(right)) else {
        return false;
    };
    left != right
        && !state.first_parent_chain(left).iter().any(|id| id == right)
        && !state.first_parent_chain(right).iter().any(|id| id == left)
}

static EXPERIMENTS: &[Experiment] = &[
    Experiment {
        id: "exp1",
        title: "Experiment 1: The Basics",
        description: "Learn the foundational commands to initialize a repository, track files, and save your work.",
        exercises: &[
            Exercise {
                id: "init",
                title: "Initialize a Repository",
                description: "Every Git project lives in a repository. This creates a hidden `.git` directory where Git stores all its tracking information.",
                posix_steps: &[step("git init", "Creates an empty Git repository in the current directory.")],
                dos_steps: &[step("git init", "Creates an empty Git repository in the current directory.")],
                goal: |state| !state.commits.is_empty() && state.branches.contains_key("main"),
            },
            Exercise {
                id: "first-commit",
                title: "Your First Commit",
                description: "The basic Git workflow is to modify files, add them to the \"staging area\", and then commit them to your repository history.",
                posix_steps: &[
                    step("echo \"Hello Git\" > README.md", "Create a new file with some content."),
                    step("git status", "Check the status. Git sees the new file but lists it as \"untracked\"."),
                    step("git add README.md", "Add the file to the staging area to be tracked."),
                    step("git status", "Check the status again. The file is now staged and ready to be committed."),
                    step("git commit -m \"Initial commit\"", "Save the staged snapshot to your project history."),
                    step("git log", "View the history. You should see your new commit."),
                ],
                dos_steps: &[
                    step("echo Hello Git > README.md", "Create a new file with some content."),
                    step("git status", "Check the status. Git sees the new file but lists it as \"untracked\"."),
                    step("git add README.md", "Add the file to the staging area to be tracked."),
                    step("git status", "Check the status again. The file is now staged and ready to be committed."),
                    step("git commit -m \"Initial commit\"", "Saves the staged changes to the repository with a message."),
                    step("git log", "View the history. You should see your new commit."),
                ],
                goal: |state| {
                    let main = tip(state, "main");
                    has_message(main, "Initial commit") && has_file(main, "README.md")
                },
            },
        ],
    },
    Experiment {
        id: "exp2",
        title: "Experiment 2: Branching",
        description: "Branches allow you to work on different features in parallel without affecting the main codebase.",
        exercises: &[
            Exercise {
                id: "branching",
                title: "Create and Switch Branches",
                description: "Create a new branch for a feature, and then switch to it to begin your work. This creates a separate line of development.",
                posix_steps: &[
                    step("git branch feature/new-login", "Creates a new branch called \"feature/new-login\"."),
                    step("git branch", "List all branches. The asterisk (*) marks the active branch (main)."),
                    step("git checkout feature/new-login", "Switches your current working context to the new branch."),
                    step("git branch", "List the branches again. Notice the active branch has changed."),
                ],
                dos_steps: &[
                    step("git branch feature/new-login", "Creates a new branch called \"feature/new-login\"."),
                    step("git branch", "List all branches. The asterisk (*) marks the active branch (main)."),
                    step("git checkout feature/new-login", "Switches your current working context to the new branch."),
                    step("git branch", "List the branches again. Notice the active branch has changed."),
                ],
                goal: |state| state.branches.contains_key("feature/new-login") && state.head == "feature/new-login",
            },
            Exercise {
                id: "commit-on-branch",
                title: "Commit on a Branch",
                description: "Changes made on a branch are independent of other branches until you merge them.",
                posix_steps: &[
                    step("echo \"// Login form\" > login.js", "Create a new file for our feature."),
                    step("git add login.js", "Stage the new file."),
                    step("git commit -m \"Add login feature skeleton\"", "Commit the changes to the new branch."),
                    step("git checkout main", "Switch back to the main branch."),
                    step("ls", "List files. Notice that `login.js` is not here, keeping `main` clean."),
                ],
                dos_steps: &[
                    step("echo // Login form > login.js", "Create a new file for our feature."),
                    step("git add login.js", "Stage the new file."),
                    step("git commit -m \"Add login feature skeleton\"", "Commit the changes to the new branch."),
                    step("git checkout main", "Switch back to the main branch."),
                    step("dir", "List files. Notice that `login.js` is not here, keeping `main` clean."),
                ],
                goal: |state| {
                    let main = tip(state, "main");
                    state.head == "main"
                        && has_message(tip(state, "feature/new-login"), "Add login feature skeleton")
                        && main.is_some()
                        && !has_file(main, "login.js")
                },
            },
        ],
    },
    Experiment {
        id: "exp3",
        title: "Experiment 3: Merging",
        description: "Combine the work from different branches into one.",
        exercises: &[Exercise {
            id: "merge",
            title: "Merge a Feature Branch",
            description: "After completing work on a feature branch, integrate its changes back into your main branch.",
            posix_steps: &[
                step("git checkout main", "First, ensure you are on the branch you want to merge INTO."),
                step("git merge feature/new-login", "Merge the feature branch into main."),
                step("ls", "List the files. `login.js` is now on the main branch."),
                step("git log --graph --oneline", "See the commit history. Note the new \"merge commit\"."),
            ],
            dos_steps: &[
                step("git checkout main", "First, ensure you are on the branch you want to merge INTO."),
                step("git merge feature/new-login", "Merge the feature branch into main."),
                step("dir", "List the files. `login.js` is now on the main branch."),
                step("git log --graph --oneline", "See the commit history. Note the new \"merge commit\"."),
            ],
            goal: |state| {
                let main = tip(state, "main");
                state.head == "main" && is_merge(main) && has_file(main, "login.js")
            },
        }],
    },
    Experiment {
        id: "exp4",
        title: "Experiment 4: Stashing Changes",
        description: "Temporarily save changes that are not ready to be committed.",
        exercises: &[
            Exercise {
                id: "stash",
                title: "Stash Your Work",
                description: "You have unfinished work in your directory but need to switch branches. Stash the changes to save them for later.",
                posix_steps: &[
                    step("echo \"console.log('hello')\" >> login.js", "Make a change to a tracked file."),
                    step("git status", "See that `login.js` is modified but not staged."),
                    step("git stash", "Stash the changes. Your working directory is now clean."),
                    step("git status", "The working directory is clean again, ready to switch branches."),
                ],
                dos_steps: &[
                    step("echo console.log('hello') >> login.js", "Make a change to a tracked file."),
                    step("git status", "See that `login.js` is modified but not staged."),
                    step("git stash", "Stash the changes. Your working directory is now clean."),
                    step("git status", "The working directory is clean again, ready to switch branches."),
                ],
                goal: |state| {
                    !state.stash.is_empty()
                        && working_file(state, "login.js")
                            .is_some_and(|content| !content.trim().is_empty() && !content.contains("hello"))
                },
            },
            Exercise {
                id: "stash-pop",
                title: "Re-apply Stashed Changes",
                description: "Apply the stashed changes to continue your work. `stash pop` applies the changes and removes them from the stash list.",
                posix_steps: &[
                    step("git stash list", "See what is currently in your stash."),
                    step("git stash pop", "Apply the most recent stash and remove it from the stash list."),
                    step("cat login.js", "Verify the stashed changes have been restored."),
                ],
                dos_steps: &[
                    step("git stash list", "See what is currently in your stash."),
                    step("git stash pop", "Apply the most recent stash and remove it from the stash list."),
                    step("type login.js", "Verify the stashed changes have been restored."),
                ],
                goal: |state| {
                    state.stash.is_empty()
                        && working_file(state, "login.js").is_some_and(|content| content.contains("hello"))
                },
            },
        ],
    },
    Experiment {
        id: "exp5",
        title: "Experiment 5: Undoing Things",
        description: "Learn how to revert and reset changes safely.",
        exercises: &[
            Exercise {
                id: "revert-setup",
                title: "Make a Mistake",
                description: "Let's make a commit that we'll later want to undo.",
                posix_steps: &[
                    step("echo \"This is a mistake\" > mistake.txt", "Create a file with content we want to undo."),
                    step("git add mistake.txt", "Stage the file."),
                    step("git commit -m \"feat: Add a file with a mistake\"", "Commit the mistake."),
                    step("git log -n 1", "Note the commit hash of your mistake."),
                ],
                dos_steps: &[
                    step("echo \"This is a mistake\" > mistake.txt", "Create a file with content we want to undo."),
                    step("git add mistake.txt", "Stage the file."),
                    step("git commit -m \"feat: Add a file with a mistake\"", "Commit the mistake."),
                    step("git log -n 1", "Note the commit hash of your mistake."),
                ],
                goal: |state| has_file(head(state), "mistake.txt"),
            },
            Exercise {
                id: "revert",
                title: "Reverting a Commit",
                description: "Create a new commit that undoes the changes from a previous commit. This is a safe way to undo as it doesn't change the project history.",
                posix_steps: &[
                    step("git revert HEAD", "Create a new commit that is the inverse of the last commit."),
                    step("ls", "The file `mistake.txt` is gone from the working directory."),
                    step("git log -n 2", "Notice there is a new \"Revert\" commit in the history, and the old commit is still there."),
                ],
                dos_steps: &[
                    step("git revert HEAD", "Create a new commit that is the inverse of the last commit."),
                    step("dir", "The file `mistake.txt` is gone from the working directory."),
                    step("git log -n 2", "Notice there is a new \"Revert\" commit in the history, and the old commit is still there."),
                ],
                goal: |state| {
                    head(state).is_some_and(|commit| {
                        commit.message.starts_with("Revert") && !commit.files.contains_key("mistake.txt")
                    })
                },
            },
        ],
    },
    Experiment {
        id: "exp6",
        title: "Experiment 6: Amending Commits",
        description: "Modify the most recent commit.",
        exercises: &[Exercise {
            id: "amend",
            title: "Amend the Last Commit",
            description: "You forgot to add a file to your last commit. Instead of a new commit, you can amend the previous one.",
            posix_steps: &[
                step("echo \"forgotten file\" > new-file.txt", "Create the file you forgot."),
                step("git add new-file.txt", "Stage the new file."),
                step("git commit --amend --no-edit", "Add the file to the previous commit without changing the message."),
                step("git log -1 --stat", "Look at the last commit. It now includes `new-file.txt` and has a new commit hash."),
            ],
            dos_steps: &[
                step("echo \"forgotten file\" > new-file.txt", "Create the file you forgot."),
                step("git add new-file.txt", "Stage the new file."),
                step("git commit --amend --no-edit", "Add the file to the previous commit without changing the message."),
                step("git log -1 --stat", "Look at the last commit. It now includes `new-file.txt` and has a new commit hash."),
            ],
            goal: |state| has_file(head(state), "new-file.txt"),
        }],
    },
    Experiment {
        id: "exp7",
        title: "Experiment 7: Tagging a Release",
        description: "Mark specific points in history as important, such as version releases.",
        exercises: &[Exercise {
            id: "tag",
            title: "Create a Lightweight Tag",
            description: "Create a lightweight tag to mark the current commit as a version release. It's like a bookmark for a specific commit.",
            posix_steps: &[
                step("git tag v1.0", "Create a tag named v1.0 on the current commit."),
                step("git tag", "List all tags in the repository."),
                step("git log -1", "The log for the latest commit now shows the tag."),
            ],
            dos_steps: &[
                step("git tag v1.0", "Create a tag named v1.0 on the current commit."),
                step("git tag", "List all tags in the repository."),
                step("git log -1", "The log for the latest commit now shows the tag."),
            ],
            goal: |state| {
                state.head_tip().is_some() && state.tags.get("v1.0").map(String::as_str) == state.head_tip()
            },
        }],
    },
    Experiment {
        id: "exp8",
        title: "Experiment 8: Cleaning the Workspace",
        description: "Remove untracked files from your working directory.",
        exercises: &[Exercise {
            id: "clean",
            title: "Clean the Directory",
            description: "Sometimes your workspace gets cluttered with temporary files (e.g., build artifacts). Use `git clean` to remove them.",
            posix_steps: &[
                step("touch temp.log", "Create a temporary, untracked file."),
                step("git status", "Notice `temp.log` is untracked."),
                step("git clean -n", "Do a \"dry run\" to see what would be removed."),
                step("git clean -f", "Forcibly remove untracked files."),
                step("git status", "The directory is clean again."),
            ],
            dos_steps: &[
                step("echo. > temp.log", "Create a temporary, untracked file."),
                step("git status", "Notice `temp.log` is untracked."),
                step("git clean -n", "Do a \"dry run\" to see what would be removed."),
                step("git clean -f", "Forcibly remove untracked files."),
                step("git status", "The directory is clean again."),
            ],
            goal: |state| state.is_initialized() && !state.working_directory.contains_key("temp.log"),
        }],
    },
    Experiment {
        id: "exp9",
        title: "Experiment 9: Rebasing",
        description: "Re-apply commits on top of another base tip to create a linear history.",
        exercises: &[
            Exercise {
                id: "setup-rebase",
                title: "Create a Divergent History",
                description: "Let's create a situation where a rebase is useful: a feature branch that has diverged from main.",
                posix_steps: &[
                    step("git checkout -b feature/rebase-me main", "Create and switch to a feature branch."),
                    step("echo \"feature\" > feature.txt", "Add a feature file."),
                    step("git add . && git commit -m \"feat: start rebase feature\"", "Commit the feature."),
                    step("git checkout main", "Switch back to main."),
                    step("echo \"update\" >> README.md", "Update the README on main."),
                    step("git add . && git commit -m \"docs: update readme on main\"", "Commit on main, causing a divergence."),
                    step("git log --graph --oneline --all", "Observe the divergent histories."),
                ],
                dos_steps: &[
                    step("git checkout -b feature/rebase-me main", "Create and switch to a feature branch."),
                    step("echo \"feature\" > feature.txt", "Add a feature file."),
                    step("git add . && git commit -m \"feat: start rebase feature\"", "Commit the feature."),
                    step("git checkout main", "Switch back to main."),
                    step("echo update >> README.md", "Update the README on main."),
                    step("git add . && git commit -m \"docs: update readme on main\"", "Commit on main, causing a divergence."),
                    step("git log --graph --oneline --all", "Observe the divergent histories."),
                ],
                goal: |state| diverged(state, "main", "feature/rebase-me"),
            },
            Exercise {
                id: "rebase",
                title: "Perform the Rebase",
                description: "Rebase the feature branch onto main to create a clean, linear history. This rewrites the feature branch's history.",
                posix_steps: &[
                    step("git checkout feature/rebase-me", "Switch to the feature branch."),
                    step("git rebase main", "Re-apply the commits from this branch on top of main."),
                    step("git log --graph --oneline --all", "Observe the new linear history. The feature branch is now ahead of main."),
                ],
                dos_steps: &[
                    step("git checkout feature/rebase-me", "Switch to the feature branch."),
                    step("git rebase main", "Re-apply the commits from this branch on top of main."),
                    step("git log --graph --oneline --all", "Observe the new linear history. The feature branch is now ahead of main."),
                ],
                goal: |state| {
                    let main = state.branch_tip("main");
                    main.is_some() && tip(state, "feature/rebase-me").and_then(Commit::first_parent) == main
                },
            },
        ],
    },
    Experiment {
        id: "exp10",
        title: "Experiment 10: Cherry Picking",
        description: "Apply a specific commit from one branch onto another.",
        exercises: &[
            Exercise {
                id: "cherry-pick-setup",
                title: "Isolate a Commit",
                description: "Let's create a commit on a separate branch that contains a critical change we need on `main` immediately.",
                posix_steps: &[
                    step("git checkout -b feature/hotfix", "Create a new branch for the hotfix."),
                    step("echo \"critical fix\" > hotfix.js", "Create a critical hotfix file."),
                    step("git add . && git commit -m \"fix: critical hotfix\"", "Commit the hotfix."),
                    step("git checkout main", "Switch back to main, which does not have the fix."),
                ],
                dos_steps: &[
                    step("git checkout -b feature/hotfix", "Create a new branch for the hotfix."),
                    step("echo \"critical fix\" > hotfix.js", "Create a critical hotfix file."),
                    step("git add . && git commit -m \"fix: critical hotfix\"", "Commit the hotfix."),
                    step("git checkout main", "Switch back to main, which does not have the fix."),
                ],
                goal: |state| state.head == "main" && state.branches.contains_key("feature/hotfix"),
            },
            Exercise {
                id: "cherry-pick",
                title: "Perform the Cherry-Pick",
                description: "You need the hotfix on main *now* without merging the whole feature branch. Use `git log` to find the commit's hash, then `cherry-pick` it.",
                posix_steps: &[
                    step("git log feature/hotfix", "Find the commit hash for \"fix: critical hotfix\"."),
                    step("git cherry-pick <hash>", "Replace <hash> with the commit hash you found."),
                    step("ls", "The `hotfix.js` file is now on main."),
                ],
                dos_steps: &[
                    step("git log feature/hotfix", "Find the commit hash for \"fix: critical hotfix\"."),
                    step("git cherry-pick <hash>", "Replace <hash> with the commit hash you found."),
                    step("dir", "The `hotfix.js` file is now on main."),
                ],
                goal: |state| has_message(tip(state, "main"), "fix: critical hotfix"),
            },
        ],
    },
    Experiment {
        id: "exp11",
        title: "Experiment 11: Merge Conflicts",
        description: "Learn how to handle the inevitable merge conflict when changes overlap.",
        exercises: &[
            Exercise {
                id: "conflict-setup",
                title: "Creating a Conflict",
                description: "Let's create a merge conflict by editing the same line of the same file on two different branches.",
                posix_steps: &[
                    step("git checkout -b feature/conflicting-change", "Create a feature branch."),
                    step("echo \"Feature change for README\" > README.md", "Change the README on the feature branch."),
                    step("git add . && git commit -m \"feat: change readme\"", "Commit the change."),
                    step("git checkout main", "Switch back to main."),
                    step("echo \"Important update on main\" > README.md", "Make a different change to the same file on main."),
                    step("git add . && git commit -m \"docs: change readme on main\"", "Commit the conflicting change."),
                ],
                dos_steps: &[
                    step("git checkout -b feature/conflicting-change", "Create a feature branch."),
                    step("echo \"Feature change for README\" > README.md", "Change the README on the feature branch."),
                    step("git add . && git commit -m \"feat: change readme\"", "Commit the change."),
                    step("git checkout main", "Switch back to main."),
                    step("echo \"Important update on main\" > README.md", "Make a different change to the same file on main."),
                    step("git add . && git commit -m \"docs: change readme on main\"", "Commit the conflicting change."),
                ],
                goal: |state| {
                    state.branches.contains_key("feature/conflicting-change")
                        && working_file(state, "README.md").is_some_and(|content| content.contains("Important update"))
                },
            },
            Exercise {
                id: "conflict-resolve",
                title: "Resolving a Conflict",
                description: "Attempt the merge, examine the conflict markers Git adds to the file, fix it, and complete the merge.",
                posix_steps: &[
                    step("git merge feature/conflicting-change", "Attempt the merge, which will fail with a conflict."),
                    step("git status", "Git tells you there are \"unmerged paths\"."),
                    step("cat README.md", "Examine the file to see the conflict markers (<<<<<<<, =======, >>>>>>>)."),
                    step("echo \"Resolved: Important update and feature change\" > README.md", "Manually edit the file to resolve the conflict."),
                    step("git add README.md", "Stage the resolved file."),
                    step("git commit --no-edit", "Commit the merge. The `--no-edit` flag accepts the auto-generated message."),
                ],
                dos_steps: &[
                    step("git merge feature/conflicting-change", "Attempt the merge, which will fail with a conflict."),
                    step("git status", "Git tells you there are \"unmerged paths\"."),
                    step("type README.md", "Examine the file to see the conflict markers (<<<<<<<, =======, >>>>>>>)."),
                    step("echo \"Resolved: Important update and feature change\" > README.md", "Manually edit the file to resolve the conflict."),
                    step("git add README.md", "Stage the resolved file."),
                    step("git commit --no-edit", "Commit the merge. The `--no-edit` flag accepts the auto-generated message."),
                ],
                goal: |state| {
                    state.merge_in_progress.is_none()
                        && is_merge(tip(state, "main"))
                        && working_file(state, "README.md").is_some_and(|content| content.starts_with("Resolved"))
                },
            },
        ],
    },
    Experiment {
        id: "exp12",
        title: "Experiment 12: You've Git Gud!",
        description: "Congratulations on completing the interactive tutorial!",
        exercises: &[Exercise {
            id: "final-challenge",
            title: "Next Steps",
            description: "You have learned the core concepts of Git and are ready to use it in your own projects. Keep practicing!",
            posix_steps: &[step("echo \"I am a Git expert!\"", "Celebrate your new skills!")],
            dos_steps: &[step("echo \"I am a Git expert!\"", "Celebrate your new skills!")],
            goal: |state| state.commits.len() > 15,
        }],
    },
];
