#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use once_cell::sync::Lazy;
use onboard_core::{
    config::ConfigManager,
    storage::{JsonFileStore, LocalStore},
    utils::paths::local_storage_file_in,
    wizard::{CredentialsField, WizardContext, WizardTimings},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub struct TestEnv {
    pub wizard: WizardContext,
    pub store: Arc<JsonFileStore>,
    pub config_manager: ConfigManager,
    pub base: PathBuf,
}

/// A wizard backed by a JSON store in its own directory, with default timings.
pub fn setup_test_env() -> TestEnv {
    let base = temp_base();
    let store = Arc::new(
        JsonFileStore::new(local_storage_file_in(&base)).expect("create json store"),
    );
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let shared: Arc<dyn LocalStore> = store.clone();
    let wizard = WizardContext::new(shared, WizardTimings::default());
    TestEnv {
        wizard,
        store,
        config_manager,
        base,
    }
}

pub fn fill_register(wizard: &mut WizardContext, email: &str, password: &str) {
    wizard.set_login_mode(false).expect("register mode");
    let screen = wizard.credentials_mut().expect("credentials screen");
    screen.set_field(CredentialsField::Email, email);
    screen.set_field(CredentialsField::Password, password);
    screen.set_field(CredentialsField::ConfirmPassword, password);
}
