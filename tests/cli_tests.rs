use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// The binary with config, cache and colours isolated to `home`
fn git_sim(home: &Path) -> anyhow::Result<Command> {
    let mut cmd = Command::cargo_bin("git-sim")?;
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env("NO_COLOR", "1");
    Ok(cmd)
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_run_script_prints_prompt_and_output() -> anyhow::Result<()> {
        let home = TempDir::new()?;
        let script = home.path().join("lesson.txt");
        std::fs::write(
            &script,
            "# first lesson\ngit init\n\necho \"Hello Git\" > README.md\ngit add README.md\ngit status\n",
        )?;

        git_sim(home.path())?
            .arg("run")
            .arg(&script)
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "student@git-gud:~/git-gud$ git init\nInitialized empty Git repository in /home/student/git-gud/.git/",
            ))
            .stdout(predicate::str::contains("\tnew file:   README.md"))
            .stdout(predicate::str::contains("first lesson").not());

        Ok(())
    }

    #[test]
    fn test_run_script_in_dos_dialect() -> anyhow::Result<()> {
        let home = TempDir::new()?;
        let script = home.path().join("dos.txt");
        std::fs::write(&script, "git init\necho Hello > a.txt\ntype a.txt\nls\n")?;

        git_sim(home.path())?
            .args(["run", "--dialect", "dos"])
            .arg(&script)
            .assert()
            .success()
            .stdout(predicate::str::contains("C:\\Users\\Student\\git-gud> type a.txt\nHello"))
            .stdout(predicate::str::contains("'ls' is not recognized"));

        Ok(())
    }

    #[test]
    fn test_run_missing_script_fails() -> anyhow::Result<()> {
        let home = TempDir::new()?;

        git_sim(home.path())?
            .arg("run")
            .arg(home.path().join("missing.txt"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read script"));

        Ok(())
    }

    #[test]
    fn test_unknown_dialect_is_rejected() -> anyhow::Result<()> {
        let home = TempDir::new()?;

        git_sim(home.path())?
            .args(["run", "--dialect", "fish", "script.txt"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown dialect 'fish'"));

        Ok(())
    }

    #[test]
    fn test_explain_uses_fallback() -> anyhow::Result<()> {
        let home = TempDir::new()?;

        git_sim(home.path())?
            .args(["explain", "git", "commit", "-m", "\"x\""])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "Explanation service is not configured. Please set your API_KEY.",
            ));

        Ok(())
    }

    #[test]
    fn test_shell_session_feeds_lessons_and_reset() -> anyhow::Result<()> {
        let home = TempDir::new()?;
        let session = home.path().join("session.json");

        git_sim(home.path())?
            .arg("shell")
            .arg("--session")
            .arg(&session)
            .write_stdin("git init\necho \"Hello Git\" > README.md\ngit add README.md\ngit commit -m \"Initial commit\"\nexit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Initialized empty Git repository"));
        assert!(session.exists());

        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&session)?)?;
        assert_eq!(saved["dialectMode"], "unix");
        assert_eq!(saved["repositoryState"]["HEAD"], "main");
        assert_eq!(
            saved["repositoryState"].get("mergeInProgress"),
            Some(&serde_json::Value::Null)
        );
        assert_eq!(saved["commandHistory"].as_array().map(Vec::len), Some(4));

        git_sim(home.path())?
            .arg("lessons")
            .arg("--session")
            .arg(&session)
            .assert()
            .success()
            .stdout(predicate::str::contains("[x] Initialize a Repository"))
            .stdout(predicate::str::contains("[x] Your First Commit"))
            .stdout(predicate::str::contains("[ ] Create and Switch Branches"));

        git_sim(home.path())?
            .arg("reset")
            .arg("--session")
            .arg(&session)
            .assert()
            .success();
        assert!(!session.exists());

        Ok(())
    }

    #[test]
    fn test_shell_restores_session() -> anyhow::Result<()> {
        let home = TempDir::new()?;
        let session = home.path().join("session.json");

        git_sim(home.path())?
            .args(["shell", "--session"])
            .arg(&session)
            .write_stdin("git init\ngit checkout -b feature\n")
            .assert()
            .success();

        git_sim(home.path())?
            .args(["shell", "--session"])
            .arg(&session)
            .write_stdin("git branch\nquit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("* feature\n  main"));

        Ok(())
    }

    #[test]
    fn test_dialect_switch_starts_fresh() -> anyhow::Result<()> {
        let home = TempDir::new()?;
        let session = home.path().join("session.json");

        git_sim(home.path())?
            .args(["shell", "--session"])
            .arg(&session)
            .write_stdin("git init\n")
            .assert()
            .success();

        git_sim(home.path())?
            .args(["shell", "--dialect", "dos", "--session"])
            .arg(&session)
            .write_stdin("git status\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("fatal: not a git repository"));

        let saved: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&session)?)?;
        assert_eq!(saved["dialectMode"], "windows");

        Ok(())
    }
}
