//! Shell verbs operating on the in-memory working tree.
//!
//! Two dialects share one set of tree operations ([`tree`]) and one redirect
//! parser ([`redirect`]); [`posix`] and [`dos`] own the verbs and error
//! wording. Any verb's output can be redirected into a file.
//!
//! # Public API
//! - [`ShellReply`]: What a shell verb produced
//! - [`run`]: Execute one shell verb in the context's dialect

pub(crate) mod dos;
pub(crate) mod posix;
pub(crate) mod redirect;
pub(crate) mod tree;

use crate::core::{
    context::CommandContext,
    dialect::Dialect,
    error::{ShellError, TreeError},
    paths,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellReply {
    Text(String),
    /// Ask the terminal to clear its screen
    Clear,
}

impl ShellReply {
    fn into_text(self) -> String {
        match self {
            ShellReply::Text(text) => text,
            ShellReply::Clear => String::new(),
        }
    }
}

/// Result of a shell verb, including the file a redirect wrote to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOutcome {
    pub reply: ShellReply,
    pub written: Option<String>,
}

/// Execute `verb` with `args`, honouring a trailing `>`/`>>` redirect
pub fn run(ctx: &mut CommandContext, verb: &str, args: &[&str]) -> Result<ShellOutcome, ShellError> {
    let dialect = ctx.dialect;
    let line = redirect::parse(args).map_err(|_| match dialect {
        Dialect::Posix => ShellError::SyntaxErrorNewline,
        Dialect::Dos => ShellError::SyntaxIncorrect,
    })?;

    let reply = match dialect {
        Dialect::Posix => posix::run(ctx, verb, &line.args)?,
        Dialect::Dos => dos::run(ctx, verb, &line.args)?,
    };
    let Some(redirect) = line.redirect else {
        return Ok(ShellOutcome {
            reply,
            written: None,
        });
    };

    let target = paths::normalize(&redirect.target, dialect);
    let content = terminate(reply.into_text(), verb, dialect);
    let timestamp = ctx.now();
    tree::write_file(ctx.state, &target, &content, redirect.append, timestamp)
        .map_err(|err| redirect_error(err, &redirect.target, dialect))?;
    log::debug!("Redirected {verb} output into {target}");

    Ok(ShellOutcome {
        reply: ShellReply::Text(String::new()),
        written: Some(target),
    })
}

/// Line termination of redirected output
///
/// POSIX `echo` always ends with a newline and other non-empty output gains
/// one if missing. DOS output is written as-is.
fn terminate(mut text: String, verb: &str, dialect: Dialect) -> String {
    if dialect == Dialect::Dos {
        return text;
    }
    if verb == "echo" || (!text.is_empty() && !text.ends_with('\n')) {
        text.push('\n');
    }
    text
}

fn redirect_error(err: TreeError, target: &str, dialect: Dialect) -> ShellError {
    match (dialect, err) {
        (Dialect::Posix, TreeError::IsDirectory(_)) => {
            ShellError::RedirectIsDirectory(target.to_string())
        }
        (Dialect::Posix, _) => ShellError::RedirectNoSuchFile(target.to_string()),
        (Dialect::Dos, TreeError::IsDirectory(_)) => ShellError::AccessDenied,
        (Dialect::Dos, _) => ShellError::PathNotFound,
    }
}

/// Join `echo` arguments, dropping the quotes the shell would have consumed
pub(crate) fn echo_text(args: &[&str], dialect: Dialect) -> String {
    args.iter()
        .map(|arg| {
            let mut word = arg.replace('"', "");
            if dialect == Dialect::Posix {
                if let Some(rest) = word.strip_prefix('\'') {
                    word = rest.to_string();
                }
                if let Some(rest) = word.strip_suffix('\'') {
                    word = rest.to_string();
                }
            }
            word
        })
        .collect::<Vec<_>>()
        .join(" ")
}
