use anyhow::Context;
use clap::{Parser, Subcommand};
use git_sim::core::{
    format_progress, format_prompt, print_command_output, print_error, print_info,
    print_section_header, print_success,
};
use git_sim::explain::{normalize_topic, Explanation, ExplanationService, FallbackExplainer};
use git_sim::{lessons, Action, Dialect, GitSimError, SavedSession, SessionStore, SimConfig, Simulator};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "git-sim")]
#[command(about = "Practice git and shell commands against an in-memory repository")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive terminal
    Shell {
        /// Shell dialect (posix or dos)
        #[arg(long)]
        dialect: Option<Dialect>,
        /// Discard the saved session first
        #[arg(long)]
        fresh: bool,
        /// Session file to restore and save
        #[arg(long)]
        session: Option<PathBuf>,
    },
    /// Execute every line of a script file
    Run {
        script: PathBuf,
        /// Shell dialect (posix or dos)
        #[arg(long)]
        dialect: Option<Dialect>,
    },
    /// Show lesson progress for the saved session
    Lessons {
        #[arg(long)]
        session: Option<PathBuf>,
    },
    /// Explain a command or concept
    Explain {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        topic: Vec<String>,
    },
    /// Delete the saved session
    Reset {
        #[arg(long)]
        session: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let outcome = match cli.command {
        Commands::Shell {
            dialect,
            fresh,
            session,
        } => execute_shell(dialect, fresh, session),
        Commands::Run { script, dialect } => execute_run(&script, dialect),
        Commands::Lessons { session } => execute_lessons(session),
        Commands::Explain { topic } => execute_explain(&topic.join(" ")),
        Commands::Reset { session } => execute_reset(session),
    };

    if let Err(e) = outcome {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn load_config() -> SimConfig {
    SimConfig::load_or_create().unwrap_or_else(|e| {
        log::warn!("Using default configuration: {e}");
        SimConfig::default()
    })
}

fn session_store(path: Option<PathBuf>) -> Result<SessionStore, GitSimError> {
    match path {
        Some(path) => Ok(SessionStore::new(path)),
        None => SessionStore::default_location(),
    }
}

fn execute_shell(dialect: Option<Dialect>, fresh: bool, session: Option<PathBuf>) -> anyhow::Result<()> {
    let config = load_config();
    let dialect = dialect.unwrap_or(config.default_dialect);
    let store = session_store(session)?;
    if fresh {
        store.clear()?;
    }

    let mut simulator = Simulator::new(dialect);
    let mut saved = match store.load()? {
        Some(saved) if saved.dialect_mode == dialect => {
            simulator.set_state(&saved.repository_state);
            saved
        }
        Some(saved) => {
            log::info!(
                "Saved session uses the {} dialect; starting fresh",
                saved.dialect_mode
            );
            SavedSession::new(dialect, simulator.get_state())
        }
        None => SavedSession::new(dialect, simulator.get_state()),
    };

    print_info("Type git or shell commands. Use 'exit' to leave.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", format_prompt(dialect));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let result = simulator.execute(line);
        if result.action == Some(Action::Clear) {
            print!("\x1B[2J\x1B[1;1H");
        }
        print_command_output(&result.output, result.failed);

        saved.repository_state = result.state;
        saved.record(line, &result.output, config.history_limit);
        if config.persist_session {
            store.save(&saved)?;
        }
    }

    Ok(())
}

fn execute_run(script: &Path, dialect: Option<Dialect>) -> anyhow::Result<()> {
    let dialect = match dialect {
        Some(dialect) => dialect,
        None => load_config().default_dialect,
    };
    let content = std::fs::read_to_string(script)
        .map_err(|source| GitSimError::script_read_failed(script, source))?;

    let mut simulator = Simulator::new(dialect);
    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        println!("{} {}", dialect.prompt(), line);
        let result = simulator.execute(line);
        if !result.output.is_empty() {
            println!("{}", result.output);
        }
    }
    Ok(())
}

fn execute_lessons(session: Option<PathBuf>) -> anyhow::Result<()> {
    let store = session_store(session)?;
    let state = store
        .load()
        .context("Could not read the saved session")?
        .map(|saved| saved.repository_state)
        .unwrap_or_default();

    let progress = lessons::evaluate(&state);
    for experiment in lessons::experiments() {
        print_section_header(experiment.title);
        for entry in progress.iter().filter(|entry| entry.experiment_id == experiment.id) {
            println!("  {}", format_progress(entry.title, entry.completed));
        }
    }

    let done = progress.iter().filter(|entry| entry.completed).count();
    print_info(&format!("{done}/{} exercises complete", progress.len()));
    Ok(())
}

fn execute_explain(topic: &str) -> anyhow::Result<()> {
    let topic = normalize_topic(topic);
    match FallbackExplainer.explain(&topic) {
        Explanation::Text(text) => println!("{text}"),
        Explanation::Stream(fragments) => {
            let mut stdout = io::stdout();
            for fragment in fragments {
                write!(stdout, "{fragment}")?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn execute_reset(session: Option<PathBuf>) -> anyhow::Result<()> {
    let store = session_store(session)?;
    store.clear()?;
    print_success(&format!("Session cleared ({})", store.path().display()));
    Ok(())
}
