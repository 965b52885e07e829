//! Typed field keys for every screen and the error map keyed by them.

use std::{collections::BTreeMap, fmt};

use crate::validation::{ErrorKind, Rule};

use super::records::{COMPANY_SIZE_OPTIONS, INDUSTRY_OPTIONS, USER_TYPE_OPTIONS};

/// A field on one of the wizard screens.
pub trait FormField: Copy + Ord + fmt::Debug + 'static {
    /// Every field of the screen, in display order.
    const ALL: &'static [Self];

    /// Stable identifier used by the shell (`set <key> <value>`).
    fn key(self) -> &'static str;

    fn label(self) -> &'static str;

    fn rule(self) -> Rule;

    fn message(self, kind: ErrorKind) -> &'static str;

    /// Fields whose verdict must be recomputed when this one changes.
    fn dependents(self) -> &'static [Self] {
        &[]
    }

    /// The field confirmations are compared against, if the screen has one.
    fn password_field() -> Option<Self> {
        None
    }

    /// Whether the value should be masked when displayed.
    fn is_secret(self) -> bool {
        false
    }

    fn parse(key: &str) -> Option<Self> {
        let wanted = key.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key().eq_ignore_ascii_case(wanted))
    }
}

/// A validation failure attached to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: &'static str,
}

impl FieldError {
    pub fn for_field<F: FormField>(field: F, kind: ErrorKind) -> Self {
        Self {
            kind,
            message: field.message(kind),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Current validation messages for a screen. A missing key means the field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMap<F: FormField> {
    entries: BTreeMap<F, FieldError>,
}

impl<F: FormField> Default for ErrorMap<F> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<F: FormField> ErrorMap<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: F, kind: ErrorKind) {
        self.entries.insert(field, FieldError::for_field(field, kind));
    }

    pub fn clear(&mut self, field: F) {
        self.entries.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, field: F) -> Option<&FieldError> {
        self.entries.get(&field)
    }

    pub fn kind(&self, field: F) -> Option<ErrorKind> {
        self.get(field).map(|error| error.kind)
    }

    pub fn contains(&self, field: F) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &FieldError)> {
        self.entries.iter().map(|(field, error)| (*field, error))
    }
}

fn fallback_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Required => "This field is required",
        ErrorKind::InvalidFormat => "Please enter a valid value",
        ErrorKind::TooShort => "Value is too short",
        ErrorKind::Mismatch => "Values do not match",
        ErrorKind::UnsupportedType => "Unsupported file type",
        ErrorKind::TooLarge => "File is too large",
        ErrorKind::IncompleteCollection => "Please complete at least one entry",
    }
}

fn email_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Required => "Email is required",
        ErrorKind::InvalidFormat => "Please enter a valid email address",
        other => fallback_message(other),
    }
}

fn password_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Required => "Password is required",
        ErrorKind::TooShort => "Password must be at least 8 characters",
        other => fallback_message(other),
    }
}

fn confirm_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Required => "Please confirm your password",
        ErrorKind::Mismatch => "Passwords do not match",
        other => fallback_message(other),
    }
}

fn city_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Required => "City/Location is required",
        other => fallback_message(other),
    }
}

fn image_message(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::UnsupportedType => "Please select a valid image file (JPEG, PNG, or GIF)",
        ErrorKind::TooLarge => "Image size should be less than 5MB",
        other => fallback_message(other),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CredentialsField {
    Email,
    Password,
    ConfirmPassword,
}

impl FormField for CredentialsField {
    const ALL: &'static [Self] = &[Self::Email, Self::Password, Self::ConfirmPassword];

    fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm-password",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
        }
    }

    fn rule(self) -> Rule {
        match self {
            Self::Email => Rule::Email,
            Self::Password => Rule::Password,
            Self::ConfirmPassword => Rule::ConfirmPassword,
        }
    }

    fn message(self, kind: ErrorKind) -> &'static str {
        match self {
            Self::Email => email_message(kind),
            Self::Password => password_message(kind),
            Self::ConfirmPassword => confirm_message(kind),
        }
    }

    fn dependents(self) -> &'static [Self] {
        match self {
            Self::Password => &[Self::ConfirmPassword],
            _ => &[],
        }
    }

    fn password_field() -> Option<Self> {
        Some(Self::Password)
    }

    fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserTypeField {
    UserType,
}

impl FormField for UserTypeField {
    const ALL: &'static [Self] = &[Self::UserType];

    fn key(self) -> &'static str {
        "user-type"
    }

    fn label(self) -> &'static str {
        "I am a"
    }

    fn rule(self) -> Rule {
        Rule::Choice(USER_TYPE_OPTIONS)
    }

    fn message(self, kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::Required => "Please select whether you are an Employee or Company",
            other => fallback_message(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployeeField {
    City,
    LinkedinUrl,
    PortfolioUrl,
    /// Collection-level key for the work history as a whole.
    WorkHistory,
    ProfileImage,
}

impl EmployeeField {
    /// Fields edited as plain text through the session state.
    pub const TEXT: &'static [Self] = &[Self::City, Self::LinkedinUrl, Self::PortfolioUrl];
}

impl FormField for EmployeeField {
    const ALL: &'static [Self] = &[
        Self::City,
        Self::LinkedinUrl,
        Self::PortfolioUrl,
        Self::WorkHistory,
        Self::ProfileImage,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::City => "city",
            Self::LinkedinUrl => "linkedin-url",
            Self::PortfolioUrl => "portfolio-url",
            Self::WorkHistory => "work-history",
            Self::ProfileImage => "profile-image",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::City => "City/Location",
            Self::LinkedinUrl => "LinkedIn URL",
            Self::PortfolioUrl => "Portfolio URL",
            Self::WorkHistory => "Work Experience",
            Self::ProfileImage => "Profile Image",
        }
    }

    fn rule(self) -> Rule {
        match self {
            Self::City => Rule::RequiredText,
            Self::LinkedinUrl | Self::PortfolioUrl => Rule::OptionalUrl,
            Self::WorkHistory | Self::ProfileImage => Rule::Free,
        }
    }

    fn message(self, kind: ErrorKind) -> &'static str {
        match (self, kind) {
            (Self::City, kind) => city_message(kind),
            (Self::LinkedinUrl, ErrorKind::InvalidFormat) => "Please enter a valid LinkedIn URL",
            (Self::PortfolioUrl, ErrorKind::InvalidFormat) => "Please enter a valid Portfolio URL",
            (Self::WorkHistory, ErrorKind::IncompleteCollection) => {
                "Please add at least one work experience with company and position"
            }
            (Self::ProfileImage, kind) => image_message(kind),
            (_, kind) => fallback_message(kind),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompanyField {
    CompanyName,
    Email,
    Password,
    ConfirmPassword,
    Industry,
    CompanySize,
    City,
    CompanyLogo,
}

impl CompanyField {
    pub const TEXT: &'static [Self] = &[
        Self::CompanyName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
        Self::Industry,
        Self::CompanySize,
        Self::City,
    ];
}

impl FormField for CompanyField {
    const ALL: &'static [Self] = &[
        Self::CompanyName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
        Self::Industry,
        Self::CompanySize,
        Self::City,
        Self::CompanyLogo,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::CompanyName => "company-name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm-password",
            Self::Industry => "industry",
            Self::CompanySize => "company-size",
            Self::City => "city",
            Self::CompanyLogo => "company-logo",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::CompanyName => "Company Name",
            Self::Email => "Company Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::Industry => "Industry",
            Self::CompanySize => "Company Size",
            Self::City => "City/Location",
            Self::CompanyLogo => "Company Logo",
        }
    }

    fn rule(self) -> Rule {
        match self {
            Self::CompanyName | Self::City => Rule::RequiredText,
            Self::Email => Rule::Email,
            Self::Password => Rule::Password,
            Self::ConfirmPassword => Rule::ConfirmPassword,
            Self::Industry => Rule::Choice(INDUSTRY_OPTIONS),
            Self::CompanySize => Rule::Choice(COMPANY_SIZE_OPTIONS),
            Self::CompanyLogo => Rule::Free,
        }
    }

    fn message(self, kind: ErrorKind) -> &'static str {
        match (self, kind) {
            (Self::CompanyName, ErrorKind::Required) => "Company name is required",
            (Self::Email, kind) => email_message(kind),
            (Self::Password, kind) => password_message(kind),
            (Self::ConfirmPassword, kind) => confirm_message(kind),
            (Self::Industry, ErrorKind::Required) => "Please select an industry",
            (Self::Industry, ErrorKind::InvalidFormat) => "Please select a valid industry",
            (Self::CompanySize, ErrorKind::Required) => "Please select company size",
            (Self::CompanySize, ErrorKind::InvalidFormat) => "Please select a valid company size",
            (Self::City, kind) => city_message(kind),
            (Self::CompanyLogo, kind) => image_message(kind),
            (_, kind) => fallback_message(kind),
        }
    }

    fn dependents(self) -> &'static [Self] {
        match self {
            Self::Password => &[Self::ConfirmPassword],
            _ => &[],
        }
    }

    fn password_field() -> Option<Self> {
        Some(Self::Password)
    }

    fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::ConfirmPassword)
    }
}
