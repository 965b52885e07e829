pub mod form;
pub mod navigation;
pub mod profile;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::CommandRegistry;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in form::definitions()
        .into_iter()
        .chain(navigation::definitions())
        .chain(profile::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

/// Joins the remaining arguments so unquoted values with spaces still work.
pub(crate) fn joined(args: &[&str]) -> String {
    args.join(" ")
}

pub(crate) fn usage(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

/// Parses a 1-based index as shown by `show`.
pub(crate) fn parse_index(raw: &str) -> Result<usize, CommandError> {
    match raw.parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid entry number"
        ))),
    }
}
