//! Durable local key-value storage.
//!
//! Values are strings holding JSON documents. Writing a key always replaces
//! what was there; nothing is appended or versioned.

pub mod json_backend;
mod memory;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;

/// Abstraction over string-valued key-value stores.
pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Slots written by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    UserType,
    EmployeeData,
    CompanyData,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [
        StorageKey::UserType,
        StorageKey::EmployeeData,
        StorageKey::CompanyData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::UserType => "userType",
            StorageKey::EmployeeData => "employeeData",
            StorageKey::CompanyData => "companyData",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn save_record<T: Serialize>(store: &dyn LocalStore, key: StorageKey, record: &T) -> Result<()> {
    let json = serde_json::to_string(record)?;
    store.set_item(key.as_str(), &json)
}

pub fn load_record<T: DeserializeOwned>(store: &dyn LocalStore, key: StorageKey) -> Result<Option<T>> {
    match store.get_item(key.as_str())? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::records::UserType;

    #[test]
    fn keys_match_browser_storage_names() {
        let names: Vec<_> = StorageKey::ALL.iter().map(StorageKey::as_str).collect();
        assert_eq!(names, ["userType", "employeeData", "companyData"]);
    }

    #[test]
    fn save_then_load_typed_record() {
        let store = MemoryStore::new();
        save_record(&store, StorageKey::UserType, &UserType::Employee).expect("save");
        let loaded: Option<UserType> = load_record(&store, StorageKey::UserType).expect("load");
        assert_eq!(loaded, Some(UserType::Employee));
        let missing: Option<UserType> = load_record(&store, StorageKey::CompanyData).expect("load");
        assert_eq!(missing, None);
    }

    #[test]
    fn corrupt_payload_surfaces_serde_error() {
        let store = MemoryStore::new();
        store.set_item("userType", "not json").expect("set");
        let result: Result<Option<UserType>> = load_record(&store, StorageKey::UserType);
        assert!(matches!(result, Err(crate::errors::OnboardError::Serde(_))));
    }
}
