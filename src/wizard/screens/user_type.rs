use crate::{
    errors::{OnboardError, Result},
    wizard::{
        fields::{FormField, UserTypeField},
        lifetime::ScreenLifetime,
        records::UserType,
        session::FormState,
    },
};

/// Employee or company choice.
#[derive(Debug)]
pub struct UserTypeScreen {
    form: FormState<UserTypeField>,
    lifetime: ScreenLifetime,
}

impl Default for UserTypeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl UserTypeScreen {
    pub fn new() -> Self {
        Self {
            form: FormState::new(UserTypeField::ALL.to_vec()),
            lifetime: ScreenLifetime::new(),
        }
    }

    pub fn with_selection(choice: UserType) -> Self {
        let mut screen = Self::new();
        screen.select(choice);
        screen
    }

    pub fn form(&self) -> &FormState<UserTypeField> {
        &self.form
    }

    pub fn select(&mut self, choice: UserType) {
        self.form.set_field(UserTypeField::UserType, choice.as_str());
    }

    pub fn selection(&self) -> Option<UserType> {
        UserType::parse(self.form.value(UserTypeField::UserType))
    }

    /// Returns the chosen type, or records `Required` when nothing is selected.
    pub fn submit(&mut self) -> Result<UserType> {
        let errors = self.form.validate_all();
        if !errors.is_empty() {
            let count = errors.len();
            self.form.apply_errors(errors);
            return Err(OnboardError::Validation(count));
        }
        self.form.clear_errors();
        self.selection().ok_or(OnboardError::Validation(1))
    }

    pub(crate) fn teardown(&mut self) {
        self.lifetime.teardown();
    }
}
