//! Records assembled by the wizard screens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::StorageKey;

pub const USER_TYPE_OPTIONS: &[&str] = &["employee", "company"];

pub const INDUSTRY_OPTIONS: &[&str] = &[
    "IT & Software",
    "Manufacturing",
    "Healthcare",
    "Finance & Banking",
    "Education",
    "Retail & E-commerce",
    "Construction",
    "Automotive",
    "Food & Beverage",
    "Real Estate",
    "Media & Entertainment",
    "Transportation & Logistics",
    "Energy & Utilities",
    "Consulting",
    "Non-Profit",
    "Government",
    "Other",
];

pub const COMPANY_SIZE_OPTIONS: &[&str] = &[
    "1-10 employees",
    "11-50 employees",
    "51-200 employees",
    "201-500 employees",
    "501-1000 employees",
    "1000+ employees",
];

/// Email and password pair entered on the first screen. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Employee,
    Company,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Employee => "employee",
            UserType::Company => "company",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "employee" => Some(UserType::Employee),
            "company" => Some(UserType::Company),
            _ => None,
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserType::Employee => f.write_str("Employee"),
            UserType::Company => f.write_str("Company"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

impl WorkEntry {
    /// An entry counts toward submission once company and position are filled.
    pub fn is_complete(&self) -> bool {
        !self.company.trim().is_empty() && !self.position.trim().is_empty()
    }

    pub fn set(&mut self, field: WorkEntryField, value: impl Into<String>) {
        let value = value.into();
        match field {
            WorkEntryField::Company => self.company = value,
            WorkEntryField::Position => self.position = value,
            WorkEntryField::Duration => self.duration = value,
            WorkEntryField::Description => self.description = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkEntryField {
    Company,
    Position,
    Duration,
    Description,
}

impl WorkEntryField {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "company" => Some(Self::Company),
            "position" => Some(Self::Position),
            "duration" => Some(Self::Duration),
            "description" => Some(Self::Description),
            _ => None,
        }
    }
}

/// Insertion-ordered skills without blanks or (case-sensitive) duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the trimmed skill. Returns `false` for blanks and duplicates.
    pub fn add(&mut self, raw: &str) -> bool {
        let skill = raw.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.0.push(skill.to_string());
        true
    }

    pub fn remove(&mut self, skill: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != skill);
        self.0.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|existing| existing == skill)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub city: String,
    pub skills: SkillSet,
    pub work_history: Vec<WorkEntry>,
    pub linkedin_url: String,
    pub portfolio_url: String,
}

impl EmployeeRecord {
    pub fn summary(&self) -> String {
        format!(
            "Employee profile created successfully!\n\nCity: {}\nSkills: {}\nWork Experience: {} entries",
            self.city,
            self.skills.as_slice().join(", "),
            self.work_history.len()
        )
    }
}

macro_rules! labelled_enum {
    ($name:ident, $options:ident, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(value: &str) -> Option<Self> {
                match value {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn options() -> &'static [&'static str] {
                $options
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

labelled_enum!(Industry, INDUSTRY_OPTIONS, {
    ItSoftware => "IT & Software",
    Manufacturing => "Manufacturing",
    Healthcare => "Healthcare",
    FinanceBanking => "Finance & Banking",
    Education => "Education",
    RetailEcommerce => "Retail & E-commerce",
    Construction => "Construction",
    Automotive => "Automotive",
    FoodBeverage => "Food & Beverage",
    RealEstate => "Real Estate",
    MediaEntertainment => "Media & Entertainment",
    TransportationLogistics => "Transportation & Logistics",
    EnergyUtilities => "Energy & Utilities",
    Consulting => "Consulting",
    NonProfit => "Non-Profit",
    Government => "Government",
    Other => "Other",
});

labelled_enum!(CompanySize, COMPANY_SIZE_OPTIONS, {
    Micro => "1-10 employees",
    Small => "11-50 employees",
    Medium => "51-200 employees",
    Large => "201-500 employees",
    VeryLarge => "501-1000 employees",
    Enterprise => "1000+ employees",
});

/// Company profile as persisted. The password pair stays on the screen and is
/// deliberately left out of the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    pub company_name: String,
    pub email: String,
    pub industry: Industry,
    pub company_size: CompanySize,
    pub city: String,
}

impl CompanyRecord {
    pub fn summary(&self) -> String {
        format!(
            "Company profile created successfully!\n\nCompany: {}\nIndustry: {}\nSize: {}\nLocation: {}",
            self.company_name, self.industry, self.company_size, self.city
        )
    }
}

/// One record per wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardRecord {
    Credentials(Credentials),
    UserTypeChoice(UserType),
    EmployeeProfile(EmployeeRecord),
    CompanyProfile(CompanyRecord),
}

impl WizardRecord {
    /// Storage slot the record is written to; credentials have none.
    pub fn storage_key(&self) -> Option<StorageKey> {
        match self {
            WizardRecord::Credentials(_) => None,
            WizardRecord::UserTypeChoice(_) => Some(StorageKey::UserType),
            WizardRecord::EmployeeProfile(_) => Some(StorageKey::EmployeeData),
            WizardRecord::CompanyProfile(_) => Some(StorageKey::CompanyData),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Option<String>> {
        match self {
            WizardRecord::Credentials(_) => Ok(None),
            WizardRecord::UserTypeChoice(choice) => serde_json::to_string(choice).map(Some),
            WizardRecord::EmployeeProfile(record) => serde_json::to_string(record).map(Some),
            WizardRecord::CompanyProfile(record) => serde_json::to_string(record).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_set_trims_and_deduplicates() {
        let mut skills = SkillSet::new();
        assert!(skills.add("  Rust "));
        assert!(!skills.add("Rust"));
        assert!(skills.add("rust"));
        assert!(!skills.add("   "));
        assert!(!skills.add(""));
        assert_eq!(skills.as_slice(), ["Rust", "rust"]);
        assert!(skills.remove("Rust"));
        assert!(!skills.remove("Go"));
        assert_eq!(skills.as_slice(), ["rust"]);
    }

    #[test]
    fn work_entry_completion_needs_company_and_position() {
        let mut entry = WorkEntry::default();
        assert!(!entry.is_complete());
        entry.set(WorkEntryField::Company, "Acme");
        assert!(!entry.is_complete());
        entry.set(WorkEntryField::Position, "  ");
        assert!(!entry.is_complete());
        entry.set(WorkEntryField::Position, "Engineer");
        assert!(entry.is_complete());
    }

    #[test]
    fn industry_labels_round_trip() {
        for label in INDUSTRY_OPTIONS {
            let industry = Industry::from_label(label).expect("known label");
            assert_eq!(industry.label(), *label);
        }
        assert_eq!(Industry::from_label("Space Mining"), None);
        for label in COMPANY_SIZE_OPTIONS {
            assert!(CompanySize::from_label(label).is_some());
        }
    }

    #[test]
    fn employee_record_serializes_camel_case() {
        let mut skills = SkillSet::new();
        skills.add("Rust");
        let record = EmployeeRecord {
            city: "Lisbon".into(),
            skills,
            work_history: vec![WorkEntry {
                company: "Acme".into(),
                position: "Engineer".into(),
                duration: "2 years".into(),
                description: String::new(),
            }],
            linkedin_url: String::new(),
            portfolio_url: "https://example.dev".into(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["city"], "Lisbon");
        assert_eq!(json["skills"][0], "Rust");
        assert_eq!(json["workHistory"][0]["company"], "Acme");
        assert_eq!(json["portfolioUrl"], "https://example.dev");
        assert!(json.get("linkedinUrl").is_some());
    }

    #[test]
    fn company_record_omits_password() {
        let record = CompanyRecord {
            company_name: "Acme".into(),
            email: "hr@acme.com".into(),
            industry: Industry::ItSoftware,
            company_size: CompanySize::Small,
            city: "Porto".into(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["industry"], "IT & Software");
        assert_eq!(json["companySize"], "11-50 employees");
        assert!(json.get("password").is_none());
        assert!(json.get("confirmPassword").is_none());
    }

    #[test]
    fn credentials_never_map_to_storage() {
        let record = WizardRecord::Credentials(Credentials {
            email: "a@b.com".into(),
            password: "secretpass".into(),
            confirm_password: "secretpass".into(),
        });
        assert_eq!(record.storage_key(), None);
        assert_eq!(record.to_json().expect("json"), None);
        assert!(!format!("{record:?}").contains("secretpass"));
    }

    #[test]
    fn user_type_serializes_lowercase() {
        let json = WizardRecord::UserTypeChoice(UserType::Company)
            .to_json()
            .expect("json");
        assert_eq!(json.as_deref(), Some("\"company\""));
        assert_eq!(UserType::parse(" Employee "), Some(UserType::Employee));
    }
}
