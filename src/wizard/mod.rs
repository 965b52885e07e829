//! The onboarding wizard: screens, their shared form state and the step
//! controller that moves between them.

pub mod controller;
pub mod fields;
pub mod lifetime;
pub mod records;
pub mod screens;
pub mod session;
pub mod tasks;

pub use controller::{PreviewOutcome, Route, Step, SubmitOutcome, WizardContext, WizardTimings};
pub use fields::{
    CompanyField, CredentialsField, EmployeeField, ErrorMap, FieldError, FormField, UserTypeField,
};
pub use records::{
    CompanyRecord, CompanySize, Credentials, EmployeeRecord, Industry, SkillSet, UserType,
    WizardRecord, WorkEntry, WorkEntryField,
};
pub use session::FormState;
