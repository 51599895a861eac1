//! Terminal chrome for the interactive front end.
//!
//! Simulator output is plain text; only the surrounding prompt, banners and
//! headers are coloured here.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, blue for prompts
//! - **Plain payloads**: Command output is printed untouched

use crate::core::dialect::Dialect;
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// The dialect prompt, coloured the way each shell shows it
pub fn format_prompt(dialect: Dialect) -> String {
    match dialect {
        Dialect::Posix => {
            let prompt = dialect.prompt();
            match prompt.split_once(':') {
                Some((user, rest)) => format!("{}:{}", user.green().bold(), rest.blue().bold()),
                None => prompt.to_string(),
            }
        }
        Dialect::Dos => dialect.prompt().to_string(),
    }
}

/// Print a command's output, highlighting failures
pub fn print_command_output(output: &str, failed: bool) {
    if output.is_empty() {
        return;
    }
    if failed {
        println!("{}", output.red());
    } else {
        println!("{output}");
    }
}

/// A lesson progress line: `[x] title` or `[ ] title`
pub fn format_progress(title: &str, completed: bool) -> String {
    if completed {
        format!("{} {}", "[x]".green(), title)
    } else {
        format!("{} {}", "[ ]".bright_black(), title)
    }
}
