//! Output redirection (`>` and `>>`) parsing.

/// Where a command's output should go instead of the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Redirect {
    pub target: String,
    pub append: bool,
}

/// Arguments left for the command plus an optional redirect
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandLine<'a> {
    pub args: Vec<&'a str>,
    pub redirect: Option<Redirect>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MissingTarget;

/// Split the first `>`/`>>` operator and its target out of `args`
///
/// The operator may be attached to the target (`>file`). Tokens after the
/// target stay command arguments.
pub(crate) fn parse<'a>(args: &[&'a str]) -> Result<CommandLine<'a>, MissingTarget> {
    let Some(index) = args.iter().position(|arg| arg.starts_with('>')) else {
        return Ok(CommandLine {
            args: args.to_vec(),
            redirect: None,
        });
    };

    let operator = args[index];
    let (append, attached) = match operator.strip_prefix(">>") {
        Some(rest) => (true, rest),
        None => (false, &operator[1..]),
    };
    let (target, consumed) = if attached.is_empty() {
        match args.get(index + 1) {
            Some(next) => (*next, 2),
            None => return Err(MissingTarget),
        }
    } else {
        (attached, 1)
    };

    let mut remaining: Vec<&str> = args[..index].to_vec();
    remaining.extend_from_slice(&args[index + consumed..]);
    Ok(CommandLine {
        args: remaining,
        redirect: Some(Redirect {
            target: target.to_string(),
            append,
        }),
    })
}
