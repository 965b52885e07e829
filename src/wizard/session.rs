use std::{collections::BTreeMap, fmt};

use crate::validation::{validate, Pass, ValidationContext, Verdict};

use super::fields::{ErrorMap, FieldError, FormField};

/// In-memory state of one screen: field values, current errors and the
/// transient UI flags.
///
/// Every mutation goes through `&mut self` against the full current mapping,
/// so an edit to one field can never roll back another field's value.
#[derive(Clone)]
pub struct FormState<F: FormField> {
    values: BTreeMap<F, String>,
    active: Vec<F>,
    errors: ErrorMap<F>,
    show_password: bool,
    show_confirm_password: bool,
    loading: bool,
    success: Option<String>,
}

impl<F: FormField> FormState<F> {
    /// Creates an empty state validating the given fields.
    pub fn new(active: Vec<F>) -> Self {
        Self {
            values: BTreeMap::new(),
            active,
            errors: ErrorMap::new(),
            show_password: false,
            show_confirm_password: false,
            loading: false,
            success: None,
        }
    }

    pub fn value(&self, field: F) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<F, String> {
        &self.values
    }

    pub fn active_fields(&self) -> &[F] {
        &self.active
    }

    pub fn is_active(&self, field: F) -> bool {
        self.active.contains(&field)
    }

    pub fn set_active_fields(&mut self, active: Vec<F>) {
        self.active = active;
        self.errors = {
            let mut kept = ErrorMap::new();
            for (field, error) in self.errors.iter() {
                if self.active.contains(&field) {
                    kept.set(field, error.kind);
                }
            }
            kept
        };
    }

    /// Stores the value, re-runs incremental validation for it and its
    /// dependents, and drops any stale success message.
    pub fn set_field(&mut self, field: F, value: impl Into<String>) {
        self.values.insert(field, value.into());
        if self.is_active(field) {
            self.revalidate(field);
        }
        for dependent in field.dependents() {
            if self.is_active(*dependent) {
                self.revalidate(*dependent);
            }
        }
        self.success = None;
    }

    fn context(&self) -> ValidationContext<'_> {
        ValidationContext {
            password: F::password_field()
                .map(|field| self.value(field))
                .unwrap_or(""),
        }
    }

    fn revalidate(&mut self, field: F) {
        let verdict = validate(field.rule(), self.value(field), &self.context(), Pass::Incremental);
        match verdict {
            Verdict::Valid => self.errors.clear(field),
            Verdict::Invalid(kind) => self.errors.set(field, kind),
            Verdict::Skipped => {}
        }
    }

    /// Submit-time pass over every active field.
    pub fn validate_all(&self) -> ErrorMap<F> {
        let context = self.context();
        let mut errors = ErrorMap::new();
        for field in &self.active {
            if let Verdict::Invalid(kind) =
                validate(field.rule(), self.value(*field), &context, Pass::Submit)
            {
                errors.set(*field, kind);
            }
        }
        errors
    }

    pub fn errors(&self) -> &ErrorMap<F> {
        &self.errors
    }

    pub fn error(&self, field: F) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Replaces the error map wholesale (submit path).
    pub fn apply_errors(&mut self, errors: ErrorMap<F>) {
        self.errors = errors;
    }

    pub fn set_error(&mut self, field: F, kind: crate::validation::ErrorKind) {
        self.errors.set(field, kind);
    }

    pub fn clear_error(&mut self, field: F) {
        self.errors.clear(field);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear_all();
    }

    /// Empties values, errors, the success message and the loading flag.
    /// Visibility toggles are a display preference and survive.
    pub fn reset_to_empty(&mut self) {
        self.values.clear();
        self.errors.clear_all();
        self.success = None;
        self.loading = false;
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn show_confirm_password(&self) -> bool {
        self.show_confirm_password
    }

    pub fn toggle_password_visibility(&mut self) -> bool {
        self.show_password = !self.show_password;
        self.show_password
    }

    pub fn toggle_confirm_visibility(&mut self) -> bool {
        self.show_confirm_password = !self.show_confirm_password;
        self.show_confirm_password
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
    }

    /// Text to show for a field, masking secrets unless revealed.
    pub fn display_value(&self, field: F) -> String {
        let value = self.value(field);
        let revealed = match F::password_field() {
            Some(password) if field == password => self.show_password,
            _ => self.show_confirm_password,
        };
        if field.is_secret() && !revealed {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }
}

impl<F: FormField> fmt::Debug for FormState<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: BTreeMap<F, String> = self
            .values
            .keys()
            .map(|field| (*field, self.display_value(*field)))
            .collect();
        f.debug_struct("FormState")
            .field("values", &values)
            .field("errors", &self.errors)
            .field("loading", &self.loading)
            .field("success", &self.success)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;
    use crate::wizard::fields::{CompanyField, CredentialsField};

    fn register_state() -> FormState<CredentialsField> {
        FormState::new(CredentialsField::ALL.to_vec())
    }

    #[test]
    fn incremental_validation_runs_on_change() {
        let mut state = register_state();
        state.set_field(CredentialsField::Email, "user@");
        assert_eq!(
            state.errors().kind(CredentialsField::Email),
            Some(ErrorKind::InvalidFormat)
        );
        state.set_field(CredentialsField::Email, "user@example.com");
        assert!(state.error(CredentialsField::Email).is_none());
    }

    #[test]
    fn clearing_a_field_keeps_previous_error() {
        let mut state = register_state();
        state.set_field(CredentialsField::Password, "short");
        state.set_field(CredentialsField::Password, "");
        assert_eq!(
            state.errors().kind(CredentialsField::Password),
            Some(ErrorKind::TooShort)
        );
    }

    #[test]
    fn untouched_fields_stay_error_free_while_typing() {
        let mut state = register_state();
        state.set_field(CredentialsField::Email, "a");
        assert!(state.error(CredentialsField::Password).is_none());
        assert!(state.error(CredentialsField::ConfirmPassword).is_none());
    }

    #[test]
    fn password_change_rechecks_confirmation() {
        let mut state = register_state();
        state.set_field(CredentialsField::Password, "abcdefgh");
        state.set_field(CredentialsField::ConfirmPassword, "abcdefgh");
        assert!(state.error(CredentialsField::ConfirmPassword).is_none());

        state.set_field(CredentialsField::Password, "abcdefghi");
        assert_eq!(
            state.errors().kind(CredentialsField::ConfirmPassword),
            Some(ErrorKind::Mismatch)
        );

        state.set_field(CredentialsField::ConfirmPassword, "abcdefghi");
        assert!(state.error(CredentialsField::ConfirmPassword).is_none());
    }

    #[test]
    fn inactive_fields_are_stored_but_not_validated() {
        let mut state = FormState::new(vec![CredentialsField::Email, CredentialsField::Password]);
        state.set_field(CredentialsField::Password, "abcdefgh");
        state.set_field(CredentialsField::ConfirmPassword, "different");
        assert!(state.error(CredentialsField::ConfirmPassword).is_none());
        assert_eq!(state.value(CredentialsField::ConfirmPassword), "different");
        assert!(!state.validate_all().contains(CredentialsField::ConfirmPassword));
    }

    #[test]
    fn rapid_updates_to_different_fields_are_all_kept() {
        let mut state = FormState::new(CompanyField::TEXT.to_vec());
        state.set_field(CompanyField::CompanyName, "Acme");
        state.set_field(CompanyField::City, "Porto");
        state.set_field(CompanyField::Email, "hr@acme.com");
        assert_eq!(state.value(CompanyField::CompanyName), "Acme");
        assert_eq!(state.value(CompanyField::City), "Porto");
        assert_eq!(state.value(CompanyField::Email), "hr@acme.com");
    }

    #[test]
    fn validate_all_flags_empty_required_fields() {
        let state = register_state();
        let errors = state.validate_all();
        assert_eq!(errors.kind(CredentialsField::Email), Some(ErrorKind::Required));
        assert_eq!(errors.kind(CredentialsField::Password), Some(ErrorKind::Required));
        assert_eq!(
            errors.kind(CredentialsField::ConfirmPassword),
            Some(ErrorKind::Required)
        );
        assert_eq!(
            errors.get(CredentialsField::ConfirmPassword).map(|e| e.message),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn set_field_clears_success_message() {
        let mut state = register_state();
        state.set_success("Registration successful!");
        state.set_field(CredentialsField::Email, "x");
        assert_eq!(state.success(), None);
    }

    #[test]
    fn reset_keeps_visibility_preference() {
        let mut state = register_state();
        state.toggle_password_visibility();
        state.set_field(CredentialsField::Email, "a@b");
        state.set_loading(true);
        state.reset_to_empty();
        assert!(state.values().is_empty());
        assert!(state.errors().is_empty());
        assert!(!state.is_loading());
        assert!(state.show_password());
    }

    #[test]
    fn secrets_are_masked_until_revealed() {
        let mut state = register_state();
        state.set_field(CredentialsField::Password, "abcdefgh");
        state.set_field(CredentialsField::ConfirmPassword, "abc");
        assert_eq!(state.display_value(CredentialsField::Password), "********");
        assert_eq!(state.display_value(CredentialsField::ConfirmPassword), "***");
        state.toggle_password_visibility();
        assert_eq!(state.display_value(CredentialsField::Password), "abcdefgh");
        assert_eq!(state.display_value(CredentialsField::ConfirmPassword), "***");
        state.toggle_confirm_visibility();
        assert_eq!(state.display_value(CredentialsField::ConfirmPassword), "abc");
    }

    #[test]
    fn narrowing_active_fields_drops_their_errors() {
        let mut state = register_state();
        state.apply_errors(state.validate_all());
        state.set_active_fields(vec![CredentialsField::Email, CredentialsField::Password]);
        assert!(!state.errors().contains(CredentialsField::ConfirmPassword));
        assert!(state.errors().contains(CredentialsField::Email));
    }
}
