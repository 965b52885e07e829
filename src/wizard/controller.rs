//! Step state machine driving the wizard screens.
//!
//! `Credentials` → `UserTypeChoice` → `EmployeeProfile | CompanyProfile` → `Done`.

use std::{fmt, sync::Arc, time::Duration};

use tracing::{debug, info};

use crate::{
    config::Config,
    errors::{OnboardError, Result},
    storage::LocalStore,
    validation::ImageUpload,
};

use super::{
    fields::FieldError,
    records::{CompanyRecord, EmployeeRecord, UserType, WizardRecord},
    screens::{
        ClearTicket, CompanyScreen, CredentialsScreen, EmployeeScreen, PreviewTicket,
        SubmitTicket, UserTypeScreen,
    },
    tasks::{self, TaskOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Credentials { login_mode: bool },
    UserTypeChoice,
    EmployeeProfile,
    CompanyProfile,
    /// Terminal; the profile for the given type has been saved.
    Done(UserType),
}

impl Step {
    pub fn route(&self) -> Route {
        match self {
            Step::Credentials { .. } => Route::Home,
            Step::UserTypeChoice => Route::InputDetails,
            Step::EmployeeProfile | Step::Done(UserType::Employee) => Route::EmployeeDetails,
            Step::CompanyProfile | Step::Done(UserType::Company) => Route::CompanyDetails,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Credentials { login_mode: true } => "login",
            Step::Credentials { login_mode: false } => "register",
            Step::UserTypeChoice => "user-type",
            Step::EmployeeProfile => "employee-profile",
            Step::CompanyProfile => "company-profile",
            Step::Done(_) => "done",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    InputDetails,
    EmployeeDetails,
    CompanyDetails,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::InputDetails => "/input-details",
            Route::EmployeeDetails => "/employee-details",
            Route::CompanyDetails => "/company-details",
        }
    }
}

/// Simulated latencies of the credentials submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardTimings {
    pub submit_delay: Duration,
    pub success_clear_delay: Duration,
}

impl Default for WizardTimings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for WizardTimings {
    fn from(config: &Config) -> Self {
        Self {
            submit_delay: config.submit_delay(),
            success_clear_delay: config.success_clear_delay(),
        }
    }
}

/// How a finished credentials submit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The wizard moved on to the user-type choice.
    Advanced,
    /// The screen was torn down before the submit finished; nothing applied.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    Applied,
    Rejected(FieldError),
    Stale,
}

/// Explicit context object owning every screen and the store they persist to.
pub struct WizardContext {
    step: Step,
    credentials: CredentialsScreen,
    user_type: Option<UserTypeScreen>,
    employee: Option<EmployeeScreen>,
    company: Option<CompanyScreen>,
    store: Arc<dyn LocalStore>,
    timings: WizardTimings,
    confirmation: Option<String>,
}

impl fmt::Debug for WizardContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WizardContext")
            .field("step", &self.step)
            .field("timings", &self.timings)
            .field("confirmation", &self.confirmation)
            .finish_non_exhaustive()
    }
}

impl WizardContext {
    /// Starts on the login screen.
    pub fn new(store: Arc<dyn LocalStore>, timings: WizardTimings) -> Self {
        Self {
            step: Step::Credentials { login_mode: true },
            credentials: CredentialsScreen::new(true),
            user_type: None,
            employee: None,
            company: None,
            store,
            timings,
            confirmation: None,
        }
    }

    pub fn from_config(store: Arc<dyn LocalStore>, config: &Config) -> Self {
        Self::new(store, WizardTimings::from(config))
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn route(&self) -> Route {
        self.step.route()
    }

    pub fn timings(&self) -> WizardTimings {
        self.timings
    }

    pub fn store(&self) -> &dyn LocalStore {
        self.store.as_ref()
    }

    /// Summary of the saved profile once the wizard is done.
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    fn invalid(&self, action: &str) -> OnboardError {
        OnboardError::InvalidTransition(format!("cannot {action} on step '{}'", self.step))
    }

    fn move_to(&mut self, next: Step) {
        info!(from = %self.step, to = %next, route = next.route().path(), "wizard step changed");
        self.step = next;
    }

    fn persist(&self, record: &WizardRecord) -> Result<()> {
        let (Some(key), Some(json)) = (record.storage_key(), record.to_json()?) else {
            return Ok(());
        };
        self.store.set_item(key.as_str(), &json)?;
        info!(%key, "record persisted");
        Ok(())
    }

    // Credentials

    pub fn credentials(&self) -> Result<&CredentialsScreen> {
        match self.step {
            Step::Credentials { .. } => Ok(&self.credentials),
            _ => Err(self.invalid("open credentials")),
        }
    }

    pub fn credentials_mut(&mut self) -> Result<&mut CredentialsScreen> {
        match self.step {
            Step::Credentials { .. } => Ok(&mut self.credentials),
            _ => Err(self.invalid("edit credentials")),
        }
    }

    /// Switches login/register, remounting an empty credentials screen.
    pub fn set_login_mode(&mut self, login_mode: bool) -> Result<()> {
        self.credentials_mut()?.set_mode(login_mode);
        self.move_to(Step::Credentials { login_mode });
        Ok(())
    }

    pub fn begin_credentials_submit(&mut self) -> Result<SubmitTicket> {
        let delay = self.timings.submit_delay;
        let ticket = self.credentials_mut()?.begin_submit(delay)?;
        debug!(login_mode = ticket.login_mode, "credentials submit started");
        Ok(ticket)
    }

    /// Shows the success message. `None` when the submit went stale.
    pub fn finish_credentials_submit(&mut self, ticket: &SubmitTicket) -> Option<ClearTicket> {
        if !matches!(self.step, Step::Credentials { .. }) {
            return None;
        }
        let clear = self
            .credentials
            .finish_submit(ticket, self.timings.success_clear_delay);
        if clear.is_none() {
            debug!("stale credentials submit discarded");
        }
        clear
    }

    /// Clears the form and advances to the user-type choice.
    pub fn finish_credentials_clear(&mut self, ticket: &ClearTicket) -> bool {
        if !matches!(self.step, Step::Credentials { .. }) || !self.credentials.finish_clear(ticket) {
            return false;
        }
        self.credentials.teardown();
        self.user_type = Some(UserTypeScreen::new());
        self.move_to(Step::UserTypeChoice);
        true
    }

    /// Full credentials submit: validation, simulated latency, success
    /// message, then advance once the message has been cleared.
    pub async fn submit_credentials(&mut self) -> Result<SubmitOutcome> {
        let ticket = self.begin_credentials_submit()?;
        if tasks::simulated_delay(ticket.delay, &ticket.guard).await.is_cancelled() {
            return Ok(SubmitOutcome::Stale);
        }
        let Some(clear) = self.finish_credentials_submit(&ticket) else {
            return Ok(SubmitOutcome::Stale);
        };
        if tasks::simulated_delay(clear.delay, &clear.guard).await.is_cancelled() {
            return Ok(SubmitOutcome::Stale);
        }
        if self.finish_credentials_clear(&clear) {
            Ok(SubmitOutcome::Advanced)
        } else {
            Ok(SubmitOutcome::Stale)
        }
    }

    // User type

    pub fn user_type(&self) -> Result<&UserTypeScreen> {
        match (&self.step, &self.user_type) {
            (Step::UserTypeChoice, Some(screen)) => Ok(screen),
            _ => Err(self.invalid("open user-type choice")),
        }
    }

    pub fn select_user_type(&mut self, choice: UserType) -> Result<()> {
        self.user_type_mut("select a user type")?.select(choice);
        Ok(())
    }

    fn user_type_mut(&mut self, action: &str) -> Result<&mut UserTypeScreen> {
        let err = self.invalid(action);
        if self.step != Step::UserTypeChoice {
            return Err(err);
        }
        self.user_type.as_mut().ok_or(err)
    }

    /// Persists the selection and mounts the matching profile screen. A screen
    /// left through back navigation is resumed with its values.
    pub fn advance_from_user_type(&mut self) -> Result<Step> {
        let choice = self.user_type_mut("continue")?.submit()?;
        self.persist(&WizardRecord::UserTypeChoice(choice))?;
        if let Some(screen) = self.user_type.as_mut() {
            screen.teardown();
        }
        let next = match choice {
            UserType::Employee => {
                self.employee.get_or_insert_with(EmployeeScreen::new);
                Step::EmployeeProfile
            }
            UserType::Company => {
                self.company.get_or_insert_with(CompanyScreen::new);
                Step::CompanyProfile
            }
        };
        self.move_to(next);
        Ok(next)
    }

    /// Profile → user-type choice keeps the in-progress profile; user-type
    /// choice → login starts over.
    pub fn back(&mut self) -> Result<Step> {
        let previous = match self.step {
            Step::EmployeeProfile | Step::CompanyProfile => {
                let choice = if self.step == Step::EmployeeProfile {
                    if let Some(screen) = self.employee.as_mut() {
                        screen.suspend();
                    }
                    UserType::Employee
                } else {
                    if let Some(screen) = self.company.as_mut() {
                        screen.suspend();
                    }
                    UserType::Company
                };
                let screen = self
                    .user_type
                    .get_or_insert_with(|| UserTypeScreen::with_selection(choice));
                if screen.selection().is_none() {
                    screen.select(choice);
                }
                Step::UserTypeChoice
            }
            Step::UserTypeChoice => {
                if let Some(mut screen) = self.user_type.take() {
                    screen.teardown();
                }
                self.employee = None;
                self.company = None;
                self.credentials.teardown();
                self.credentials = CredentialsScreen::new(true);
                Step::Credentials { login_mode: true }
            }
            Step::Credentials { .. } | Step::Done(_) => return Err(self.invalid("go back")),
        };
        self.move_to(previous);
        Ok(previous)
    }

    // Profiles

    pub fn employee(&self) -> Result<&EmployeeScreen> {
        match (&self.step, &self.employee) {
            (Step::EmployeeProfile, Some(screen)) => Ok(screen),
            _ => Err(self.invalid("open the employee profile")),
        }
    }

    pub fn employee_mut(&mut self) -> Result<&mut EmployeeScreen> {
        if self.step != Step::EmployeeProfile {
            return Err(self.invalid("edit the employee profile"));
        }
        let err = self.invalid("edit the employee profile");
        self.employee.as_mut().ok_or(err)
    }

    pub fn company(&self) -> Result<&CompanyScreen> {
        match (&self.step, &self.company) {
            (Step::CompanyProfile, Some(screen)) => Ok(screen),
            _ => Err(self.invalid("open the company profile")),
        }
    }

    pub fn company_mut(&mut self) -> Result<&mut CompanyScreen> {
        if self.step != Step::CompanyProfile {
            return Err(self.invalid("edit the company profile"));
        }
        let err = self.invalid("edit the company profile");
        self.company.as_mut().ok_or(err)
    }

    pub fn submit_employee(&mut self) -> Result<EmployeeRecord> {
        let record = self.employee_mut()?.submit()?;
        self.persist(&WizardRecord::EmployeeProfile(record.clone()))?;
        if let Some(screen) = self.employee.as_mut() {
            screen.suspend();
        }
        self.confirmation = Some(record.summary());
        self.move_to(Step::Done(UserType::Employee));
        Ok(record)
    }

    pub fn submit_company(&mut self) -> Result<CompanyRecord> {
        let record = self.company_mut()?.submit()?;
        self.persist(&WizardRecord::CompanyProfile(record.clone()))?;
        if let Some(screen) = self.company.as_mut() {
            screen.suspend();
        }
        self.confirmation = Some(record.summary());
        self.move_to(Step::Done(UserType::Company));
        Ok(record)
    }

    // Images

    /// Validates an image for the current profile screen. The inner error is
    /// a field-level rejection already recorded on the screen.
    pub fn begin_image_preview(
        &mut self,
        upload: ImageUpload,
    ) -> Result<std::result::Result<PreviewTicket, FieldError>> {
        match self.step {
            Step::EmployeeProfile => Ok(self.employee_mut()?.select_image(upload)),
            Step::CompanyProfile => Ok(self.company_mut()?.select_image(upload)),
            _ => Err(self.invalid("select an image")),
        }
    }

    pub fn apply_image_preview(&mut self, ticket: &PreviewTicket, uri: String) -> bool {
        match self.step {
            Step::EmployeeProfile => self
                .employee
                .as_mut()
                .is_some_and(|screen| screen.apply_preview(ticket, uri)),
            Step::CompanyProfile => self
                .company
                .as_mut()
                .is_some_and(|screen| screen.apply_preview(ticket, uri)),
            _ => false,
        }
    }

    /// Validates the image, renders its preview and attaches it to the screen.
    pub async fn select_image(&mut self, upload: ImageUpload) -> Result<PreviewOutcome> {
        let ticket = match self.begin_image_preview(upload)? {
            Ok(ticket) => ticket,
            Err(error) => return Ok(PreviewOutcome::Rejected(error)),
        };
        let rendered = tasks::render_preview(ticket.upload.clone(), &ticket.guard).await?;
        let TaskOutcome::Completed(uri) = rendered else {
            debug!("image preview discarded after teardown");
            return Ok(PreviewOutcome::Stale);
        };
        if self.apply_image_preview(&ticket, uri) {
            debug!(file = %ticket.upload.file_name, "image preview applied");
            Ok(PreviewOutcome::Applied)
        } else {
            Ok(PreviewOutcome::Stale)
        }
    }

    pub fn remove_image(&mut self) -> Result<()> {
        match self.step {
            Step::EmployeeProfile => self.employee_mut()?.remove_image(),
            Step::CompanyProfile => self.company_mut()?.remove_image(),
            _ => return Err(self.invalid("remove an image")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn context() -> WizardContext {
        WizardContext::new(Arc::new(MemoryStore::new()), WizardTimings::default())
    }

    fn at_user_type() -> WizardContext {
        let mut wizard = context();
        wizard.credentials.teardown();
        wizard.user_type = Some(UserTypeScreen::new());
        wizard.step = Step::UserTypeChoice;
        wizard
    }

    #[test]
    fn routes_follow_steps() {
        assert_eq!(Step::Credentials { login_mode: false }.route().path(), "/");
        assert_eq!(Step::UserTypeChoice.route().path(), "/input-details");
        assert_eq!(Step::EmployeeProfile.route().path(), "/employee-details");
        assert_eq!(Step::Done(UserType::Company).route().path(), "/company-details");
    }

    #[test]
    fn back_from_first_step_is_rejected() {
        let mut wizard = context();
        assert!(matches!(wizard.back(), Err(OnboardError::InvalidTransition(_))));
    }

    #[test]
    fn user_type_required_before_advancing() {
        let mut wizard = at_user_type();
        assert!(matches!(
            wizard.advance_from_user_type(),
            Err(OnboardError::Validation(1))
        ));
        assert_eq!(wizard.step(), Step::UserTypeChoice);
        assert!(wizard.store().keys().expect("keys").is_empty());
    }

    #[test]
    fn advancing_persists_user_type() {
        let mut wizard = at_user_type();
        wizard.select_user_type(UserType::Company).expect("select");
        assert_eq!(wizard.advance_from_user_type().expect("advance"), Step::CompanyProfile);
        assert_eq!(
            wizard.store().get_item("userType").expect("get").as_deref(),
            Some("\"company\"")
        );
    }

    #[test]
    fn back_from_profile_keeps_values_and_choice() {
        let mut wizard = at_user_type();
        wizard.select_user_type(UserType::Employee).expect("select");
        wizard.advance_from_user_type().expect("advance");
        wizard.employee_mut().expect("employee").add_skill("Rust");

        assert_eq!(wizard.back().expect("back"), Step::UserTypeChoice);
        assert_eq!(
            wizard.user_type().expect("screen").selection(),
            Some(UserType::Employee)
        );
        wizard.advance_from_user_type().expect("advance again");
        assert!(wizard.employee().expect("employee").skills().contains("Rust"));
    }

    #[test]
    fn back_from_user_type_returns_to_login() {
        let mut wizard = at_user_type();
        assert_eq!(
            wizard.back().expect("back"),
            Step::Credentials { login_mode: true }
        );
        assert!(wizard.credentials().expect("credentials").form().values().is_empty());
    }

    #[test]
    fn profile_access_is_checked_against_step() {
        let mut wizard = context();
        assert!(wizard.employee_mut().is_err());
        assert!(wizard.company().is_err());
        assert!(wizard.remove_image().is_err());
    }
}
