use crate::commands::validate_ref_name;
use crate::core::{context::CommandContext, error::GitError};

/// List tags, tag HEAD, or delete a tag with `-d`
pub fn execute_tag(ctx: &mut CommandContext, args: &[&str]) -> Result<String, GitError> {
    match args {
        [] | ["-l" | "--list", ..] => Ok(ctx
            .state
            .tags
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")),
        ["-d" | "--delete", name, ..] => match ctx.state.tags.remove(*name) {
            Some(target) => Ok(format!("Deleted tag '{name}' (was {target})")),
            None => Err(GitError::TagNotFound(name.to_string())),
        },
        [name, ..] => {
            validate_ref_name(name)?;
            let tip = ctx.head_tip()?;
            ctx.state.tags.insert(name.to_string(), tip);
            Ok(String::new())
        }
    }
}
