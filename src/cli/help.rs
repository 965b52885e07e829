use crate::cli::io;
use crate::cli::output::{detail, section as output_section};
use crate::cli::registry::{CommandEntry, Scope};
use crate::wizard::Step;

/// Lists the commands of `step`, screen-specific ones first.
pub fn print_overview(step: Step, entries: &[&CommandEntry]) {
    output_section(format!("Commands for {step} ({})", step.route().path()));
    let (shared, specific): (Vec<&CommandEntry>, Vec<&CommandEntry>) = entries
        .iter()
        .copied()
        .partition(|entry| matches!(entry.scope, Scope::Always | Scope::Editing));
    for entry in specific.iter().chain(shared.iter()) {
        detail(format!("  {:<16} {}", entry.name, entry.description));
    }
    io::print_hint("Use `help <command>` for usage.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    detail(format!("  {}", entry.description));
    detail(format!("  Usage:     {}", entry.usage));
    detail(format!("  Available: {}", scope_label(entry.scope)));
}

fn scope_label(scope: Scope) -> &'static str {
    match scope {
        Scope::Always => "everywhere",
        Scope::Editing => "until the onboarding is complete",
        Scope::Credentials => "login / register",
        Scope::UserType => "user-type choice",
        Scope::Secrets => "login / register and company profile",
        Scope::Profile => "employee and company profiles",
        Scope::Employee => "employee profile",
        Scope::Company => "company profile",
    }
}
