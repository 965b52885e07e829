use crate::{
    errors::{OnboardError, Result},
    validation::{ErrorKind, ImageUpload},
    wizard::{
        fields::{EmployeeField, ErrorMap, FieldError},
        lifetime::ScreenLifetime,
        records::{EmployeeRecord, SkillSet, WorkEntry, WorkEntryField},
        session::FormState,
    },
};

use super::{ImageSlot, PreviewTicket};

/// Employee profile: city, skills, work history, links and a profile image.
#[derive(Debug)]
pub struct EmployeeScreen {
    form: FormState<EmployeeField>,
    skills: SkillSet,
    work_history: Vec<WorkEntry>,
    image: ImageSlot,
    lifetime: ScreenLifetime,
}

impl Default for EmployeeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeScreen {
    pub fn new() -> Self {
        Self {
            form: FormState::new(EmployeeField::TEXT.to_vec()),
            skills: SkillSet::new(),
            work_history: vec![WorkEntry::default()],
            image: ImageSlot::default(),
            lifetime: ScreenLifetime::new(),
        }
    }

    pub fn form(&self) -> &FormState<EmployeeField> {
        &self.form
    }

    pub fn set_field(&mut self, field: EmployeeField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn add_skill(&mut self, skill: &str) -> bool {
        self.skills.add(skill)
    }

    pub fn remove_skill(&mut self, skill: &str) -> bool {
        self.skills.remove(skill)
    }

    pub fn work_history(&self) -> &[WorkEntry] {
        &self.work_history
    }

    /// Appends a blank entry and returns its index.
    pub fn add_work_entry(&mut self) -> usize {
        self.work_history.push(WorkEntry::default());
        self.work_history.len() - 1
    }

    /// Removes the entry at `index`. The last remaining entry cannot be removed.
    pub fn remove_work_entry(&mut self, index: usize) -> bool {
        if self.work_history.len() <= 1 || index >= self.work_history.len() {
            return false;
        }
        self.work_history.remove(index);
        true
    }

    pub fn update_work_entry(
        &mut self,
        index: usize,
        field: WorkEntryField,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.work_history.get_mut(index) else {
            return false;
        };
        entry.set(field, value);
        if self.has_complete_entry() {
            self.form.clear_error(EmployeeField::WorkHistory);
        }
        true
    }

    fn has_complete_entry(&self) -> bool {
        self.work_history.iter().any(WorkEntry::is_complete)
    }

    pub fn image(&self) -> &ImageSlot {
        &self.image
    }

    /// Validates the file and, when accepted, hands back a ticket for the
    /// preview conversion.
    pub fn select_image(
        &mut self,
        upload: ImageUpload,
    ) -> std::result::Result<PreviewTicket, FieldError> {
        let field = EmployeeField::ProfileImage;
        match self.image.select(upload, self.lifetime.guard()) {
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
        self.image.apply(ticket, uri)
    }

    pub fn remove_image(&mut self) {
        self.image.clear();
        self.form.clear_error(EmployeeField::ProfileImage);
    }

    /// Submit pass over the text fields plus the work-history collection rule.
    pub fn validate_all(&self) -> ErrorMap<EmployeeField> {
        let mut errors = self.form.validate_all();
        if !self.has_complete_entry() {
            errors.set(EmployeeField::WorkHistory, ErrorKind::IncompleteCollection);
        }
        errors
    }

    pub fn submit(&mut self) -> Result<EmployeeRecord> {
        let errors = self.validate_all();
        if !errors.is_empty() {
            let count = errors.len();
            self.form.apply_errors(errors);
            return Err(OnboardError::Validation(count));
        }
        self.form.clear_errors();
        Ok(EmployeeRecord {
            city: self.form.value(EmployeeField::City).to_string(),
            skills: self.skills.clone(),
            work_history: self.work_history.clone(),
            linkedin_url: self.form.value(EmployeeField::LinkedinUrl).to_string(),
            portfolio_url: self.form.value(EmployeeField::PortfolioUrl).to_string(),
        })
    }

    /// Ends the current lifetime while keeping every value, for back navigation.
    /// Errors belong to the step that produced them and are dropped.
    pub(crate) fn suspend(&mut self) {
        self.lifetime.teardown();
        self.form.clear_errors();
        self.image.drop_pending();
    }
}
