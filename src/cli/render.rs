//! Text rendering of the current wizard screen.

use crate::cli::output;
use crate::wizard::{
    screens::{CompanyScreen, CredentialsScreen, EmployeeScreen, ImageSlot, UserTypeScreen},
    CompanyField, CompanySize, EmployeeField, FormField, FormState, Industry, Step, UserType,
    WizardContext,
};

const LABEL_WIDTH: usize = 18;

pub fn render(wizard: &WizardContext) {
    match wizard.step() {
        Step::Credentials { .. } => {
            if let Ok(screen) = wizard.credentials() {
                credentials(screen);
            }
        }
        Step::UserTypeChoice => {
            if let Ok(screen) = wizard.user_type() {
                user_type(screen);
            }
        }
        Step::EmployeeProfile => {
            if let Ok(screen) = wizard.employee() {
                employee(screen);
            }
        }
        Step::CompanyProfile => {
            if let Ok(screen) = wizard.company() {
                company(screen);
            }
        }
        Step::Done(kind) => done(kind, wizard.confirmation()),
    }
    output::hint(format!("route {}", wizard.route().path()));
}

fn field_line<F: FormField>(form: &FormState<F>, field: F) {
    let value = form.display_value(field);
    let shown = if value.is_empty() { "-" } else { value.as_str() };
    output::detail(format!("  {:<LABEL_WIDTH$} {}", field.label(), shown));
    field_error(form, field);
}

fn field_error<F: FormField>(form: &FormState<F>, field: F) {
    if let Some(error) = form.error(field) {
        output::warning(format!("  {}: {}", field.label(), error));
    }
}

/// Prints every field's current error, in display order.
pub fn errors<F: FormField>(form: &FormState<F>) {
    for (field, error) in form.errors().iter() {
        output::warning(format!("{}: {}", field.label(), error));
    }
}

fn credentials(screen: &CredentialsScreen) {
    output::section(if screen.login_mode() { "Login" } else { "Register" });
    let form = screen.form();
    for field in form.active_fields() {
        field_line(form, *field);
    }
    if form.is_loading() {
        output::info("Submitting...");
    }
    if let Some(message) = form.success() {
        output::success(message);
    }
}

fn user_type(screen: &UserTypeScreen) {
    output::section("Tell us about yourself");
    let selected = screen.selection();
    for choice in [UserType::Employee, UserType::Company] {
        let marker = if selected == Some(choice) { "(x)" } else { "( )" };
        output::detail(format!("  {marker} {choice}"));
    }
    errors(screen.form());
}

fn image(label: &str, slot: &ImageSlot) {
    let summary = match (slot.upload(), slot.preview()) {
        (Some(upload), Some(preview)) => {
            format!("{} ({} bytes, preview {} chars)", upload.file_name, upload.size(), preview.len())
        }
        (Some(upload), None) => format!("{} (preview pending)", upload.file_name),
        _ => "-".to_string(),
    };
    output::detail(format!("  {:<LABEL_WIDTH$} {}", label, summary));
}

fn employee(screen: &EmployeeScreen) {
    output::section("Employee Details");
    let form = screen.form();
    for field in EmployeeField::TEXT {
        field_line(form, *field);
    }

    let skills = screen.skills();
    let listed = if skills.is_empty() {
        "-".to_string()
    } else {
        skills.as_slice().join(", ")
    };
    output::detail(format!("  {:<LABEL_WIDTH$} {}", "Skills", listed));

    output::detail(format!("  {}", EmployeeField::WorkHistory.label()));
    for (index, entry) in screen.work_history().iter().enumerate() {
        output::detail(format!(
            "    #{} company={:?} position={:?} duration={:?} description={:?}",
            index + 1,
            entry.company,
            entry.position,
            entry.duration,
            entry.description
        ));
    }
    field_error(form, EmployeeField::WorkHistory);

    image(EmployeeField::ProfileImage.label(), screen.image());
    field_error(form, EmployeeField::ProfileImage);
}

fn company(screen: &CompanyScreen) {
    output::section("Company Details");
    let form = screen.form();
    for field in CompanyField::TEXT {
        field_line(form, *field);
    }
    image(CompanyField::CompanyLogo.label(), screen.logo());
    field_error(form, CompanyField::CompanyLogo);
}

fn done(kind: UserType, confirmation: Option<&str>) {
    output::section(format!("{kind} profile saved"));
    if let Some(text) = confirmation {
        for line in text.lines() {
            output::detail(line);
        }
    }
}

/// Option lists for the company selects.
pub fn company_options() {
    output::section("Industries");
    for label in Industry::options() {
        output::detail(format!("  {label}"));
    }
    output::section("Company sizes");
    for label in CompanySize::options() {
        output::detail(format!("  {label}"));
    }
}
