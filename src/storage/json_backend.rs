use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::{
    errors::{OnboardError, Result},
    utils::paths::{app_data_dir, ensure_dir, local_storage_file_in, tmp_path},
};

use super::LocalStore;

/// Key-value store persisted as a single pretty-printed JSON object.
///
/// Every mutation rewrites the whole file through a temp file and rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    /// Store inside the application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(local_storage_file_in(&app_data_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn with_items<T>(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> (T, bool),
    ) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| OnboardError::Storage("json store lock poisoned".into()))?;
        let mut items = self.read_all()?;
        let (result, dirty) = apply(&mut items);
        if dirty {
            self.write_all(&items)?;
        }
        Ok(result)
    }
}

impl LocalStore for JsonFileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.with_items(|items| (items.get(key).cloned(), false))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.with_items(|items| {
            items.insert(key.to_string(), value.to_string());
            ((), true)
        })?;
        tracing::debug!(key, path = %self.path.display(), "local storage item written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.with_items(|items| {
            let removed = items.remove(key).is_some();
            ((), removed)
        })
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.with_items(|items| (items.keys().cloned().collect(), false))
    }
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("create temp dir");
        let store = JsonFileStore::new(temp.path().join("nested").join("local_storage.json"))
            .expect("create store");
        (store, temp)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get_item("userType").expect("get"), None);
        assert!(store.keys().expect("keys").is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn set_overwrites_and_survives_reopen() {
        let (store, _guard) = store_with_temp_dir();
        store.set_item("userType", "\"employee\"").expect("set");
        store.set_item("userType", "\"company\"").expect("overwrite");

        let reopened = JsonFileStore::new(store.path().to_path_buf()).expect("reopen");
        assert_eq!(
            reopened.get_item("userType").expect("get").as_deref(),
            Some("\"company\"")
        );
        assert_eq!(reopened.keys().expect("keys"), vec!["userType".to_string()]);
        assert!(!tmp_path(store.path()).exists());
    }

    #[test]
    fn remove_deletes_only_the_key() {
        let (store, _guard) = store_with_temp_dir();
        store.set_item("userType", "\"employee\"").expect("set");
        store.set_item("employeeData", "{}").expect("set");
        store.remove_item("userType").expect("remove");
        store.remove_item("missing").expect("remove missing");
        assert_eq!(store.keys().expect("keys"), vec!["employeeData".to_string()]);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.path(), "{ not json").expect("write corrupt");
        assert!(matches!(
            store.get_item("userType"),
            Err(OnboardError::Serde(_))
        ));
    }
}
