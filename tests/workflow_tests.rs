use git_sim::{content_hash, Dialect};
use predicates::prelude::*;

mod common;
use common::{assertions, fixtures::*};

#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[test]
    fn test_commands_before_init_fail() {
        let mut sim = simulator(Dialect::Posix);
        for line in ["git status", "git add .", "git log", "git branch"] {
            let result = sim.execute(line);
            assert!(result.failed, "{line}");
            assert!(assertions::not_a_repository().eval(&result.output));
        }
        assert!(!sim.state().is_initialized());
    }

    #[test]
    fn test_first_commit() {
        let mut sim = simulator(Dialect::Posix);
        let results = run_all(
            &mut sim,
            &[
                "git init",
                "echo \"Hello Git\" > README.md",
                "git add README.md",
                "git commit -m \"Initial commit\"",
            ],
        );
        assert_eq!(
            results[0].output,
            "Initialized empty Git repository in /home/student/git-gud/.git/"
        );
        assert!(assertions::commit_line("main", "Initial commit").eval(&results[3].output));

        let state = sim.state();
        let head = state.head_commit().unwrap();
        assert_eq!(head.message, "Initial commit");
        assert_eq!(head.files["README.md"].content, "Hello Git\n");
        assert!(state.staging_area.is_empty());
        assert!(assertions::clean_tree().eval(&sim.execute("git status").output));
    }

    #[test]
    fn test_commit_ids_are_content_hashes() {
        let sim = repo_with_readme(Dialect::Posix);
        let state = sim.state();
        let head = state.head_commit().unwrap();

        assert_eq!(head.id.len(), 7);
        assert!(head.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(head.id, content_hash(""));
    }

    #[test]
    fn test_same_script_same_ids() {
        let first = repo_with_readme(Dialect::Posix);
        let second = repo_with_readme(Dialect::Posix);
        assert_eq!(first.get_state(), second.get_state());
    }

    #[test]
    fn test_nothing_to_commit() {
        let mut sim = repo_with_readme(Dialect::Posix);
        let result = sim.execute("git commit -m again");
        assert!(!result.failed);
        assert_eq!(
            result.output,
            "On branch main\nnothing to commit, working tree clean"
        );
    }

    #[test]
    fn test_branch_isolation() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "git branch feature/new-login",
                "git checkout feature/new-login",
                "echo \"// Login form\" > login.js",
                "git add login.js",
                "git commit -m \"Add login feature skeleton\"",
            ],
        );
        let listing = sim.execute("git branch").output;
        assert_eq!(listing, "* feature/new-login\n  main");

        let switched = sim.execute("git checkout main");
        assert_eq!(switched.output, "Switched to branch 'main'");
        assert!(!sim.state().is_file("login.js"));
        assert!(!sim.execute("ls").output.contains("login.js"));
    }

    #[test]
    fn test_stash_round_trip() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(&mut sim, &["echo more >> README.md"]);

        let saved = sim.execute("git stash");
        assert_eq!(
            saved.output,
            "Saved working directory and index state WIP on main"
        );
        assert_eq!(sim.state().working_directory["README.md"].content, "Hello Git\n");
        assert_eq!(sim.execute("git stash list").output, "stash@{0}: WIP on main");

        let popped = sim.execute("git stash pop");
        assert!(popped.output.ends_with("Dropped refs/stash@{0}"));
        assert!(assertions::has_status("modified", "README.md").eval(&popped.output));
        assert_eq!(
            sim.state().working_directory["README.md"].content,
            "Hello Git\nmore\n"
        );
        assert!(sim.state().stash.is_empty());
    }

    #[test]
    fn test_revert_removes_file() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "echo \"This is a mistake\" > mistake.txt",
                "git add mistake.txt",
                "git commit -m \"feat: Add a file with a mistake\"",
            ],
        );
        let result = sim.execute("git revert HEAD");
        assert!(assertions::commit_line("main", "Revert \"feat: Add a file with a mistake\"")
            .eval(&result.output));
        assert!(!sim.state().is_file("mistake.txt"));
        assert!(!sim.state().head_commit().unwrap().files.contains_key("mistake.txt"));

        let bad = sim.execute("git revert abc1234");
        assert!(bad.failed);
        assert_eq!(bad.output, "fatal: bad revision 'abc1234'");
    }

    #[test]
    fn test_amend_keeps_message_and_parent() {
        let mut sim = repo_with_readme(Dialect::Posix);
        let before = sim.state().head_commit().unwrap().clone();
        run_all(
            &mut sim,
            &[
                "echo \"forgotten file\" > new-file.txt",
                "git add new-file.txt",
                "git commit --amend --no-edit",
            ],
        );
        let state = sim.state();
        let after = state.head_commit().unwrap();
        assert_ne!(after.id, before.id);
        assert_eq!(after.message, before.message);
        assert_eq!(after.parents, before.parents);
        assert!(after.files.contains_key("README.md"));
        assert!(after.files.contains_key("new-file.txt"));
    }

    #[test]
    fn test_tag_and_log_decoration() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(&mut sim, &["git tag v1.0"]);
        assert_eq!(sim.execute("git tag").output, "v1.0");

        let tip = sim.state().head_tip().unwrap().to_string();
        let oneline = sim.execute("git log --oneline").output;
        assert_eq!(oneline, format!("{tip} (tag: v1.0) Initial commit"));

        let full = sim.execute("git log -1").output;
        assert!(full.starts_with(&format!("commit {tip}\n")));
        assert!(full.contains("Author: Git Gud <git.gud@example.com>"));
        assert!(full.ends_with("\n\n    Initial commit"));
    }

    #[test]
    fn test_clean_dry_run_then_force() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(&mut sim, &["touch temp.log"]);

        let refused = sim.execute("git clean");
        assert!(refused.failed);
        assert!(refused.output.starts_with("fatal: clean.requireForce"));

        assert_eq!(sim.execute("git clean -n").output, "Would remove temp.log");
        assert!(sim.state().is_file("temp.log"));
        assert_eq!(sim.execute("git clean -f").output, "Removing temp.log");
        assert!(!sim.state().is_file("temp.log"));
        assert!(sim.state().is_file("README.md"));
    }

    #[test]
    fn test_rebase_onto_diverged_main() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "git checkout -b feature/rebase-me main",
                "echo \"feature\" > feature.txt",
                "git add . && git commit -m \"feat: start rebase feature\"",
                "git checkout main",
                "echo \"update\" >> README.md",
                "git add . && git commit -m \"docs: update readme on main\"",
                "git checkout feature/rebase-me",
            ],
        );
        let result = sim.execute("git rebase main");
        assert_eq!(
            result.output,
            "Successfully rebased and updated refs/heads/feature/rebase-me."
        );

        let state = sim.state();
        let main_tip = state.branch_tip("main").unwrap();
        let feature = state.head_commit().unwrap();
        assert_eq!(feature.parents, vec![main_tip.to_string()]);
        assert_eq!(feature.message, "feat: start rebase feature");
        assert_eq!(state.working_directory["README.md"].content, "Hello Git\nupdate\n");
        assert!(state.is_file("feature.txt"));

        let again = sim.execute("git rebase main");
        assert_eq!(again.output, "Current branch feature/rebase-me is up to date.");
    }

    #[test]
    fn test_cherry_pick_by_prefix() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "git checkout -b feature/hotfix",
                "echo \"critical fix\" > hotfix.js",
                "git add . && git commit -m \"fix: critical hotfix\"",
                "git checkout main",
            ],
        );
        let hash = sim.state().branch_tip("feature/hotfix").unwrap().to_string();

        let result = sim.execute(&format!("git cherry-pick {}", &hash[..5]));
        assert!(assertions::commit_line("main", "fix: critical hotfix").eval(&result.output));
        assert!(sim.state().is_file("hotfix.js"));
        assert_eq!(
            sim.state().head_commit().unwrap().message,
            "fix: critical hotfix"
        );

        let missing = sim.execute("git cherry-pick fffffff");
        assert!(missing.failed);
        assert_eq!(missing.output, "fatal: bad object fffffff");
    }

    #[test]
    fn test_chained_add_and_commit() {
        let mut sim = simulator(Dialect::Posix);
        let result = sim.execute("git init && touch a.txt && git add . && git commit -m one");
        assert!(!result.failed);
        let lines: Vec<&str> = result.output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(assertions::commit_line("main", "one").eval(lines[1]));
    }

    #[test]
    fn test_unknown_git_command() {
        let mut sim = repo_with_readme(Dialect::Posix);
        let result = sim.execute("git frobnicate");
        assert!(result.failed);
        assert!(predicate::str::contains("is not a git command").eval(&result.output));

        let usage = sim.execute("git");
        assert_eq!(usage.output, "usage: git <command> [<args>]");
    }

    #[test]
    fn test_edit_after_add_is_not_committed() {
        let mut sim = simulator(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "git init",
                "echo v1 > notes.txt",
                "git add notes.txt",
                "echo v2 > notes.txt",
                "git commit -m \"first notes\"",
            ],
        );
        let state = sim.state();
        assert_eq!(state.head_commit().unwrap().files["notes.txt"].content, "v1\n");
        assert_eq!(state.working_directory["notes.txt"].content, "v2\n");
        assert!(assertions::has_status("modified", "notes.txt")
            .eval(&sim.execute("git status").output));
    }

    #[test]
    fn test_every_branch_chain_reaches_root() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "git checkout -b feature",
                "echo one > one.txt && git add . && git commit -m one",
                "echo two > two.txt && git add . && git commit -m two",
                "git checkout main",
                "echo more >> README.md && git add . && git commit -m more",
                "git merge feature",
                "git commit --amend -m \"merge feature\"",
            ],
        );

        let state = sim.state();
        for (branch, tip) in &state.branches {
            let chain = state.first_parent_chain(tip);
            assert!(chain.len() <= state.commits.len(), "{branch}");
            assert_eq!(chain.last().map(String::as_str), Some("root"), "{branch}");
            assert!(chain.iter().all(|id| state.commits.contains_key(id)), "{branch}");
        }
    }

    #[test]
    fn test_cherry_pick_already_applied_commits_nothing() {
        let mut sim = repo_with_readme(Dialect::Posix);
        run_all(
            &mut sim,
            &[
                "git checkout -b feature",
                "echo \"critical fix\" > hotfix.js",
                "git add . && git commit -m \"fix: critical hotfix\"",
                "git checkout main",
            ],
        );
        let hash = sim.state().branch_tip("feature").unwrap().to_string();
        run_all(&mut sim, &[format!("git cherry-pick {hash}").as_str()]);
        let commits = sim.state().commits.len();

        let again = sim.execute(&format!("git cherry-pick {hash}"));
        assert!(!again.failed);
        assert_eq!(again.output, "On branch main\nnothing to commit, working tree clean");
        assert_eq!(sim.state().commits.len(), commits);
    }
}
