//! Core CLI loop state, dispatch, and error reporting.

use std::{io, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tokio::runtime::{Builder, Runtime};

use crate::{
    config::{Config, ConfigManager},
    errors::OnboardError,
    storage::{JsonFileStore, LocalStore},
    wizard::{CompanyField, EmployeeField, FormField, Step, UserTypeField, WizardContext},
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use super::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Wizard(#[from] OnboardError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] OnboardError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Wizard(inner) => CliError::Core(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(OnboardError::Io(err))
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Core(OnboardError::Readline(err))
    }
}

/// Everything a command handler can reach.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    registry: CommandRegistry,
    pub(crate) wizard: WizardContext,
    pub(crate) runtime: Runtime,
    theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    /// Loads the configuration and opens the on-disk store.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let store = match &config.storage_path {
            Some(path) => JsonFileStore::new(path.clone())?,
            None => JsonFileStore::new(crate::utils::paths::local_storage_file_in(
                config_manager.base_dir(),
            ))?,
        };
        tracing::debug!(path = %store.path().display(), "local storage opened");
        let wizard = WizardContext::from_config(Arc::new(store), &config);
        Self::with_wizard(mode, wizard, &config)
    }

    pub fn with_wizard(
        mode: CliMode,
        wizard: WizardContext,
        config: &Config,
    ) -> Result<Self, CliError> {
        output::apply_config(config);
        if mode == CliMode::Script {
            output::set_preferences(output::OutputPreferences {
                color_enabled: false,
            });
        }

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let runtime = Builder::new_current_thread().enable_time().build()?;

        Ok(ShellContext {
            mode,
            registry,
            wizard,
            runtime,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub(crate) fn store(&self) -> &dyn LocalStore {
        self.wizard.store()
    }

    pub(crate) fn step(&self) -> Step {
        self.wizard.step()
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn available_commands(&self) -> Vec<&CommandEntry> {
        self.registry.available(self.step()).collect()
    }

    /// Keys accepted by `set` on the current step.
    pub(crate) fn field_keys(&self) -> Vec<&'static str> {
        fn keys<F: FormField>(fields: &[F]) -> Vec<&'static str> {
            fields.iter().map(|field| field.key()).collect()
        }
        match self.step() {
            Step::Credentials { .. } => self
                .wizard
                .credentials()
                .map(|screen| keys(screen.form().active_fields()))
                .unwrap_or_default(),
            Step::UserTypeChoice => keys(UserTypeField::ALL),
            Step::EmployeeProfile => keys(EmployeeField::TEXT),
            Step::CompanyProfile => keys(CompanyField::TEXT),
            Step::Done(_) => Vec::new(),
        }
    }

    pub(crate) fn prompt(&self) -> String {
        format!("onboard {}> ", self.wizard.route().path())
    }

    pub(crate) fn show(&self) {
        render::render(&self.wizard);
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&first.to_lowercase(), first, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit onboarding?", false)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Wizard(OnboardError::Validation(count)) => {
                cli_io::print_error(format!(
                    "Please fix the highlighted fields ({count} remaining)."
                ));
                self.print_current_errors();
                Ok(())
            }
            CommandError::Wizard(err @ OnboardError::InvalidTransition(_)) => {
                cli_io::print_error(err);
                cli_io::print_hint("Type `help` to list the commands for this step.");
                Ok(())
            }
            CommandError::Wizard(err @ OnboardError::SubmitInProgress) => {
                cli_io::print_warning(err);
                Ok(())
            }
            CommandError::Wizard(err @ (OnboardError::Storage(_) | OnboardError::Serde(_))) => {
                tracing::error!(error = %err, "persistence failed");
                cli_io::print_error(err);
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    fn print_current_errors(&self) {
        match self.step() {
            Step::Credentials { .. } => {
                if let Ok(screen) = self.wizard.credentials() {
                    render::errors(screen.form());
                }
            }
            Step::UserTypeChoice => {
                if let Ok(screen) = self.wizard.user_type() {
                    render::errors(screen.form());
                }
            }
            Step::EmployeeProfile => {
                if let Ok(screen) = self.wizard.employee() {
                    render::errors(screen.form());
                }
            }
            Step::CompanyProfile => {
                if let Ok(screen) = self.wizard.company() {
                    render::errors(screen.form());
                }
            }
            Step::Done(_) => {}
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[cfg(test)]
pub(crate) fn process_script(lines: &[&str]) -> Result<ShellContext, CliError> {
    use crate::storage::MemoryStore;
    use crate::wizard::WizardTimings;

    let wizard = WizardContext::new(
        Arc::new(MemoryStore::new()),
        WizardTimings {
            submit_delay: std::time::Duration::ZERO,
            success_clear_delay: std::time::Duration::ZERO,
        },
    );
    let mut app = ShellContext::with_wizard(CliMode::Script, wizard, &Config::default())?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::UserType;

    const REGISTER: &[&str] = &[
        "mode register",
        "set email user@example.com",
        "set password abcdefgh",
        "set confirm-password abcdefgh",
        "submit",
    ];

    #[test]
    fn register_script_reaches_user_type() {
        let app = process_script(REGISTER).expect("script");
        assert_eq!(app.step(), Step::UserTypeChoice);
    }

    #[test]
    fn invalid_submit_stays_on_credentials() {
        let app = process_script(&["set email nope", "submit"]).expect("script");
        assert_eq!(app.step(), Step::Credentials { login_mode: true });
        let screen = app.wizard.credentials().expect("credentials");
        assert!(screen.form().errors().len() >= 1);
    }

    #[test]
    fn employee_script_persists_profile() {
        let mut lines = REGISTER.to_vec();
        lines.extend([
            "select employee",
            "next",
            "set city Lisbon",
            "add-skill Rust",
            "work 1 company Acme",
            "work 1 position \"Software Engineer\"",
            "submit",
        ]);
        let app = process_script(&lines).expect("script");
        assert_eq!(app.step(), Step::Done(UserType::Employee));
        let stored = app
            .store()
            .get_item("employeeData")
            .expect("get")
            .expect("employee data");
        assert!(stored.contains("\"position\":\"Software Engineer\""));
        assert_eq!(
            app.store().get_item("userType").expect("get").as_deref(),
            Some("\"employee\"")
        );
    }

    #[test]
    fn company_values_survive_a_failed_submit() {
        let mut lines = REGISTER.to_vec();
        lines.extend([
            "select company",
            "next",
            "set company-name Acme",
            "set industry \"\"",
            "submit",
        ]);
        let app = process_script(&lines).expect("script");
        assert_eq!(app.step(), Step::CompanyProfile);
        let screen = app.wizard.company().expect("company");
        assert_eq!(screen.form().value(CompanyField::CompanyName), "Acme");
        assert!(screen.form().errors().contains(CompanyField::Industry));
        assert!(app.store().get_item("companyData").expect("get").is_none());
    }

    #[test]
    fn back_keeps_employee_values() {
        let mut lines = REGISTER.to_vec();
        lines.extend(["select employee", "next", "set city Porto", "back", "next"]);
        let app = process_script(&lines).expect("script");
        let screen = app.wizard.employee().expect("employee");
        assert_eq!(screen.form().value(EmployeeField::City), "Porto");
    }

    #[test]
    fn field_keys_follow_login_mode() {
        let app = process_script(&[]).expect("script");
        assert_eq!(app.field_keys(), ["email", "password"]);
        let app = process_script(&["mode register"]).expect("script");
        assert_eq!(app.field_keys(), ["email", "password", "confirm-password"]);
    }

    #[test]
    fn unknown_command_does_not_stop_the_script() {
        let app = process_script(&["submitt", "exit", "submit"]).expect("script");
        assert_eq!(app.step(), Step::Credentials { login_mode: true });
    }
}
