use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{CommandEntry, Scope};
use crate::wizard::UserType;

use super::usage;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "select",
            "Choose employee or company",
            "select employee|company",
            Scope::UserType,
            cmd_select,
        ),
        CommandEntry::new(
            "next",
            "Save the choice and open the matching profile",
            "next",
            Scope::UserType,
            cmd_next,
        ),
        CommandEntry::new(
            "back",
            "Return to the previous step",
            "back",
            Scope::Editing,
            cmd_back,
        ),
    ]
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let choice = args
        .first()
        .and_then(|value| UserType::parse(value))
        .ok_or_else(|| usage("select employee|company"))?;
    context.wizard.select_user_type(choice)?;
    io::print_success(format!("Selected {choice}."));
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    advance(context)
}

pub(crate) fn advance(context: &mut ShellContext) -> CommandResult {
    context.wizard.advance_from_user_type()?;
    context.show();
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.wizard.back()?;
    context.show();
    Ok(())
}
