use crate::{
    errors::{OnboardError, Result},
    validation::ImageUpload,
    wizard::{
        fields::{CompanyField, ErrorMap, FieldError},
        lifetime::ScreenLifetime,
        records::{CompanyRecord, CompanySize, Industry},
        session::FormState,
    },
};

use super::{ImageSlot, PreviewTicket};

/// Company profile with its own account credentials and an optional logo.
#[derive(Debug)]
pub struct CompanyScreen {
    form: FormState<CompanyField>,
    logo: ImageSlot,
    lifetime: ScreenLifetime,
}

impl Default for CompanyScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyScreen {
    pub fn new() -> Self {
        Self {
            form: FormState::new(CompanyField::TEXT.to_vec()),
            logo: ImageSlot::default(),
            lifetime: ScreenLifetime::new(),
        }
    }

    pub fn form(&self) -> &FormState<CompanyField> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<CompanyField> {
        &mut self.form
    }

    pub fn set_field(&mut self, field: CompanyField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn select_industry(&mut self, industry: Industry) {
        self.form.set_field(CompanyField::Industry, industry.label());
    }

    pub fn select_size(&mut self, size: CompanySize) {
        self.form.set_field(CompanyField::CompanySize, size.label());
    }

    pub fn logo(&self) -> &ImageSlot {
        &self.logo
    }

    pub fn select_image(
        &mut self,
        upload: ImageUpload,
    ) -> std::result::Result<PreviewTicket, FieldError> {
        let field = CompanyField::CompanyLogo;
        match self.logo.select(upload, self.lifetime.guard()) {
            Ok(ticket) => {
                self.form.clear_error(field);
                Ok(ticket)
            }
            Err(kind) => {
                self.form.set_error(field, kind);
                Err(FieldError::for_field(field, kind))
            }
        }
    }

    pub fn apply_preview(&mut self, ticket: &PreviewTicket, uri: String) -> bool {
        self.logo.apply(ticket, uri)
    }

    pub fn remove_image(&mut self) {
        self.logo.clear();
        self.form.clear_error(CompanyField::CompanyLogo);
    }

    pub fn validate_all(&self) -> ErrorMap<CompanyField> {
        self.form.validate_all()
    }

    /// Builds the persisted record. Passwords stay on the screen.
    pub fn submit(&mut self) -> Result<CompanyRecord> {
        let errors = self.validate_all();
        if !errors.is_empty() {
            let count = errors.len();
            self.form.apply_errors(errors);
            return Err(OnboardError::Validation(count));
        }
        self.form.clear_errors();

        let industry = Industry::from_label(self.form.value(CompanyField::Industry))
            .ok_or(OnboardError::Validation(1))?;
        let company_size = CompanySize::from_label(self.form.value(CompanyField::CompanySize))
            .ok_or(OnboardError::Validation(1))?;
        Ok(CompanyRecord {
            company_name: self.form.value(CompanyField::CompanyName).to_string(),
            email: self.form.value(CompanyField::Email).to_string(),
            industry,
            company_size,
            city: self.form.value(CompanyField::City).to_string(),
        })
    }

    pub(crate) fn suspend(&mut self) {
        self.lifetime.teardown();
        self.form.clear_errors();
        self.logo.drop_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorKind;

    fn filled() -> CompanyScreen {
        let mut screen = CompanyScreen::new();
        screen.set_field(CompanyField::CompanyName, "Acme");
        screen.set_field(CompanyField::Email, "hr@acme.com");
        screen.set_field(CompanyField::Password, "abcdefgh");
        screen.set_field(CompanyField::ConfirmPassword, "abcdefgh");
        screen.select_industry(Industry::Manufacturing);
        screen.select_size(CompanySize::Medium);
        screen.set_field(CompanyField::City, "Porto");
        screen
    }

    #[test]
    fn complete_form_builds_record_without_password() {
        let mut screen = filled();
        let record = screen.submit().expect("valid");
        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.industry, Industry::Manufacturing);
        assert_eq!(record.company_size, CompanySize::Medium);
        assert!(!serde_json::to_string(&record).expect("json").contains("abcdefgh"));
    }

    #[test]
    fn empty_industry_blocks_submit_and_keeps_values() {
        let mut screen = filled();
        screen.set_field(CompanyField::Industry, "");
        assert!(matches!(screen.submit(), Err(OnboardError::Validation(1))));
        assert_eq!(
            screen.form().error(CompanyField::Industry).map(|e| e.message),
            Some("Please select an industry")
        );
        assert_eq!(screen.form().value(CompanyField::CompanyName), "Acme");
    }

    #[test]
    fn unknown_size_is_invalid() {
        let mut screen = filled();
        screen.set_field(CompanyField::CompanySize, "a few");
        assert_eq!(
            screen.form().errors().kind(CompanyField::CompanySize),
            Some(ErrorKind::InvalidFormat)
        );
        assert!(screen.submit().is_err());
    }

    #[test]
    fn password_mismatch_blocks_submit() {
        let mut screen = filled();
        screen.set_field(CompanyField::Password, "abcdefghij");
        assert_eq!(
            screen.form().errors().kind(CompanyField::ConfirmPassword),
            Some(ErrorKind::Mismatch)
        );
        assert!(screen.submit().is_err());
    }

    #[test]
    fn unsupported_logo_is_rejected() {
        let mut screen = CompanyScreen::new();
        let error = screen
            .select_image(ImageUpload::new("logo.svg", "image/svg+xml", vec![1]))
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnsupportedType);
        assert_eq!(
            error.message,
            "Please select a valid image file (JPEG, PNG, or GIF)"
        );
    }

    #[test]
    fn suspend_drops_errors_and_pending_logo() {
        let mut screen = CompanyScreen::new();
        screen.set_field(CompanyField::CompanyName, "Acme");
        assert!(screen.submit().is_err());
        let ticket = screen
            .select_image(ImageUpload::new("logo.png", "image/png", vec![1]))
            .expect("accepted");

        screen.suspend();
        assert!(screen.form().errors().is_empty());
        assert_eq!(screen.form().value(CompanyField::CompanyName), "Acme");
        assert!(screen.logo().upload().is_none());
        assert!(!screen.apply_preview(&ticket, "data:image/png;base64,AQ==".into()));
    }
}
