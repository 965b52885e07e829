use crate::cli::core::{CommandResult, ShellContext};
use crate::wizard::Step;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Steps on which a command is offered in help and completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Always,
    /// Any step that still has a form to edit.
    Editing,
    Credentials,
    UserType,
    /// Screens with a password pair.
    Secrets,
    Profile,
    Employee,
    Company,
}

impl Scope {
    pub fn allows(self, step: Step) -> bool {
        match self {
            Scope::Always => true,
            Scope::Editing => !step.is_terminal(),
            Scope::Credentials => matches!(step, Step::Credentials { .. }),
            Scope::UserType => step == Step::UserTypeChoice,
            Scope::Secrets => matches!(step, Step::Credentials { .. } | Step::CompanyProfile),
            Scope::Profile => matches!(step, Step::EmployeeProfile | Step::CompanyProfile),
            Scope::Employee => step == Step::EmployeeProfile,
            Scope::Company => step == Step::CompanyProfile,
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub scope: Scope,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        scope: Scope,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            scope,
            handler,
        }
    }
}

/// Commands in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later registrations under an existing name replace the earlier entry.
    pub fn register(&mut self, entry: CommandEntry) {
        match self.entries.iter_mut().find(|existing| existing.name == entry.name) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn available(&self, step: Step) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.scope.allows(step))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}
