use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::{CommandEntry, Scope};
use crate::errors::OnboardError;
use crate::wizard::{
    tasks, CompanyField, CredentialsField, EmployeeField, FormField, Step, UserType,
    UserTypeField,
};

use super::{joined, usage};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("show", "Show the current screen", "show", Scope::Always, cmd_show),
        CommandEntry::new(
            "set",
            "Set a field on the current screen",
            "set <field> <value>",
            Scope::Editing,
            cmd_set,
        ),
        CommandEntry::new(
            "toggle-password",
            "Show or hide the password",
            "toggle-password",
            Scope::Secrets,
            cmd_toggle_password,
        ),
        CommandEntry::new(
            "toggle-confirm",
            "Show or hide the password confirmation",
            "toggle-confirm",
            Scope::Secrets,
            cmd_toggle_confirm,
        ),
        CommandEntry::new(
            "mode",
            "Switch between login and register",
            "mode login|register",
            Scope::Credentials,
            cmd_mode,
        ),
        CommandEntry::new(
            "submit",
            "Validate and submit the current screen",
            "submit",
            Scope::Editing,
            cmd_submit,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show();
    Ok(())
}

fn field_key<'a>(args: &[&'a str], usage_text: &str) -> Result<&'a str, CommandError> {
    args.first().copied().ok_or_else(|| usage(usage_text))
}

fn unknown_field<F: FormField>(key: &str) -> CommandError {
    let known: Vec<_> = F::ALL.iter().map(|field| field.key()).collect();
    CommandError::InvalidArguments(format!(
        "unknown field `{key}` (expected one of: {})",
        known.join(", ")
    ))
}

/// Value from the command line, or a hidden prompt for secrets typed interactively.
fn value_for<F: FormField>(
    context: &ShellContext,
    field: F,
    rest: &[&str],
) -> Result<String, CommandError> {
    if rest.is_empty() && field.is_secret() && context.mode() == CliMode::Interactive {
        return io::prompt_secret(context.theme(), field.label());
    }
    if rest.is_empty() {
        return Err(usage("set <field> <value>"));
    }
    Ok(joined(rest))
}

fn report_field<F: FormField>(field: F, error: Option<String>) {
    match error {
        Some(message) => io::print_warning(format!("{}: {}", field.label(), message)),
        None => io::print_success(format!("{} updated.", field.label())),
    }
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let key = field_key(args, "set <field> <value>")?;
    let rest = &args[1..];
    match context.step() {
        Step::Credentials { .. } => {
            let field = CredentialsField::parse(key).ok_or_else(|| unknown_field::<CredentialsField>(key))?;
            let value = value_for(context, field, rest)?;
            let screen = context.wizard.credentials_mut()?;
            screen.set_field(field, value);
            report_field(field, screen.form().error(field).map(ToString::to_string));
        }
        Step::UserTypeChoice => {
            if UserTypeField::parse(key).is_none() {
                return Err(unknown_field::<UserTypeField>(key));
            }
            let value = joined(rest);
            let choice = UserType::parse(&value).ok_or_else(|| usage("set user-type employee|company"))?;
            context.wizard.select_user_type(choice)?;
            io::print_success(format!("Selected {choice}."));
        }
        Step::EmployeeProfile => {
            let field = EmployeeField::parse(key)
                .filter(|field| EmployeeField::TEXT.contains(field))
                .ok_or_else(|| unknown_field::<EmployeeField>(key))?;
            let value = value_for(context, field, rest)?;
            let screen = context.wizard.employee_mut()?;
            screen.set_field(field, value);
            report_field(field, screen.form().error(field).map(ToString::to_string));
        }
        Step::CompanyProfile => {
            let field = CompanyField::parse(key)
                .filter(|field| CompanyField::TEXT.contains(field))
                .ok_or_else(|| unknown_field::<CompanyField>(key))?;
            let value = value_for(context, field, rest)?;
            let screen = context.wizard.company_mut()?;
            screen.set_field(field, value);
            report_field(field, screen.form().error(field).map(ToString::to_string));
        }
        Step::Done(_) => return Err(finished()),
    }
    Ok(())
}

fn finished() -> CommandError {
    CommandError::Wizard(OnboardError::InvalidTransition(
        "the onboarding is already complete".into(),
    ))
}

fn visibility(shown: bool) -> &'static str {
    if shown {
        "visible"
    } else {
        "hidden"
    }
}

fn cmd_toggle_password(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let shown = match context.step() {
        Step::CompanyProfile => context
            .wizard
            .company_mut()?
            .form_mut()
            .toggle_password_visibility(),
        _ => context
            .wizard
            .credentials_mut()?
            .form_mut()
            .toggle_password_visibility(),
    };
    io::print_info(format!("Password is now {}.", visibility(shown)));
    Ok(())
}

fn cmd_toggle_confirm(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let shown = match context.step() {
        Step::CompanyProfile => context
            .wizard
            .company_mut()?
            .form_mut()
            .toggle_confirm_visibility(),
        _ => context
            .wizard
            .credentials_mut()?
            .form_mut()
            .toggle_confirm_visibility(),
    };
    io::print_info(format!("Password confirmation is now {}.", visibility(shown)));
    Ok(())
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let login_mode = match args.first().map(|value| value.to_ascii_lowercase()).as_deref() {
        Some("login") => true,
        Some("register") => false,
        _ => return Err(usage("mode login|register")),
    };
    context.wizard.set_login_mode(login_mode)?;
    context.show();
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.step() {
        Step::Credentials { .. } => submit_credentials(context),
        Step::UserTypeChoice => super::navigation::advance(context),
        Step::EmployeeProfile => {
            context.wizard.submit_employee()?;
            context.show();
            Ok(())
        }
        Step::CompanyProfile => {
            context.wizard.submit_company()?;
            context.show();
            Ok(())
        }
        Step::Done(_) => Err(finished()),
    }
}

/// Drives the simulated submit on the shell's runtime, printing the success
/// message between the two waits.
fn submit_credentials(context: &mut ShellContext) -> CommandResult {
    let ticket = context.wizard.begin_credentials_submit()?;
    io::print_info("Submitting...");

    let waited = context
        .runtime()
        .block_on(tasks::simulated_delay(ticket.delay, &ticket.guard));
    if waited.is_cancelled() {
        io::print_warning("Submission was abandoned.");
        return Ok(());
    }
    let Some(clear) = context.wizard.finish_credentials_submit(&ticket) else {
        io::print_warning("Submission was abandoned.");
        return Ok(());
    };
    if let Some(message) = context
        .wizard
        .credentials()
        .ok()
        .and_then(|screen| screen.form().success().map(str::to_string))
    {
        io::print_success(message);
    }

    let waited = context
        .runtime()
        .block_on(tasks::simulated_delay(clear.delay, &clear.guard));
    if !waited.is_cancelled() && context.wizard.finish_credentials_clear(&clear) {
        context.show();
    }
    Ok(())
}
