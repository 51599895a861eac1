//! Simulator fixtures and predefined scenarios
//!
//! Every fixture uses a stepping clock so commit ids are reproducible.

#![allow(dead_code)]

use git_sim::{CommandResult, Dialect, Simulator, SteppingClock};

pub fn simulator(dialect: Dialect) -> Simulator {
    Simulator::with_clock(dialect, Box::new(SteppingClock::default()))
}

/// Run each line, failing the test on the first error
pub fn run_all(sim: &mut Simulator, lines: &[&str]) -> Vec<CommandResult> {
    lines
        .iter()
        .map(|line| {
            let result = sim.execute(line);
            assert!(!result.failed, "`{line}` failed: {}", result.output);
            result
        })
        .collect()
}

/// Scenario: repository with README.md committed on main
pub fn repo_with_readme(dialect: Dialect) -> Simulator {
    let mut sim = simulator(dialect);
    let echo = match dialect {
        Dialect::Posix => "echo \"Hello Git\" > README.md",
        Dialect::Dos => "echo Hello Git > README.md",
    };
    run_all(
        &mut sim,
        &[
            "git init",
            echo,
            "git add README.md",
            "git commit -m \"Initial commit\"",
        ],
    );
    sim
}

/// Scenario: main and feature both rewrote README.md after a shared base
pub fn conflicting_branches() -> Simulator {
    let mut sim = repo_with_readme(Dialect::Posix);
    run_all(
        &mut sim,
        &[
            "git checkout -b feature",
            "echo \"Feature change\" > README.md",
            "echo \"extra\" > extra.txt",
            "git add . && git commit -m \"feat: change readme\"",
            "git checkout main",
            "echo \"Main change\" > README.md",
            "git add . && git commit -m \"docs: change readme on main\"",
        ],
    );
    sim
}
