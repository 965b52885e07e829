use std::time::Duration;

use crate::{
    errors::{OnboardError, Result},
    wizard::{
        fields::{CredentialsField, FormField},
        lifetime::ScreenLifetime,
        records::Credentials,
        session::FormState,
    },
};

use super::{ClearTicket, SubmitTicket};

const LOGIN_FIELDS: &[CredentialsField] = &[CredentialsField::Email, CredentialsField::Password];

fn active_fields(login_mode: bool) -> Vec<CredentialsField> {
    if login_mode {
        LOGIN_FIELDS.to_vec()
    } else {
        CredentialsField::ALL.to_vec()
    }
}

/// Email and password entry in either login or register mode.
#[derive(Debug)]
pub struct CredentialsScreen {
    form: FormState<CredentialsField>,
    login_mode: bool,
    lifetime: ScreenLifetime,
}

impl CredentialsScreen {
    pub fn new(login_mode: bool) -> Self {
        Self {
            form: FormState::new(active_fields(login_mode)),
            login_mode,
            lifetime: ScreenLifetime::new(),
        }
    }

    pub fn login_mode(&self) -> bool {
        self.login_mode
    }

    pub fn form(&self) -> &FormState<CredentialsField> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<CredentialsField> {
        &mut self.form
    }

    pub fn set_field(&mut self, field: CredentialsField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    /// Switches between login and register. The screen is remounted: pending
    /// submits are abandoned and every value and error is cleared.
    pub fn set_mode(&mut self, login_mode: bool) {
        self.lifetime.teardown();
        self.login_mode = login_mode;
        self.form.reset_to_empty();
        self.form.set_active_fields(active_fields(login_mode));
    }

    /// Runs the submit pass and, when it is clean, enters the loading state.
    pub fn begin_submit(&mut self, delay: Duration) -> Result<SubmitTicket> {
        if self.form.is_loading() {
            return Err(OnboardError::SubmitInProgress);
        }
        let errors = self.form.validate_all();
        if !errors.is_empty() {
            let count = errors.len();
            self.form.apply_errors(errors);
            return Err(OnboardError::Validation(count));
        }
        self.form.clear_errors();
        self.form.set_loading(true);
        Ok(SubmitTicket {
            guard: self.lifetime.guard(),
            delay,
            login_mode: self.login_mode,
        })
    }

    /// Applies a finished submit. Returns `None` when the screen was torn
    /// down in the meantime.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket,
        clear_delay: Duration,
    ) -> Option<ClearTicket> {
        if !ticket.guard.is_alive() {
            return None;
        }
        self.form.set_loading(false);
        self.form.clear_errors();
        self.form.set_success(if ticket.login_mode {
            "Login successful!"
        } else {
            "Registration successful!"
        });
        Some(ClearTicket {
            guard: ticket.guard.clone(),
            delay: clear_delay,
        })
    }

    /// Empties the form once the success message has been shown.
    pub fn finish_clear(&mut self, ticket: &ClearTicket) -> bool {
        if !ticket.guard.is_alive() {
            return false;
        }
        self.form.reset_to_empty();
        true
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.form.value(CredentialsField::Email).to_string(),
            password: self.form.value(CredentialsField::Password).to_string(),
            confirm_password: self.form.value(CredentialsField::ConfirmPassword).to_string(),
        }
    }

    pub(crate) fn teardown(&mut self) {
        self.lifetime.teardown();
    }
}
