use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, Scope};
use crate::storage::StorageKey;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "storage",
            "Show what has been saved locally",
            "storage",
            Scope::Always,
            cmd_storage,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            Scope::Always,
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", Scope::Always, cmd_exit),
    ]
}

fn cmd_storage(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Local storage");
    for key in StorageKey::ALL {
        match context.store().get_item(key.as_str())? {
            Some(value) => output::detail(format!("  {key} = {value}")),
            None => output::detail(format!("  {key} (empty)")),
        }
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        match context.command(&name) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(args[0]),
        }
        return Ok(());
    }
    help::print_overview(context.step(), &context.available_commands());
    if context.step().is_terminal() {
        io::print_info("Onboarding is complete. Use `storage` to review the saved data.");
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
