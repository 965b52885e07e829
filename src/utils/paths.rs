use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".onboard_core";
const CONFIG_FILE: &str = "config.json";
const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// Environment variable overriding the application data directory.
pub const HOME_ENV: &str = "ONBOARD_HOME";

/// Returns the application-specific data directory, defaulting to `~/.onboard_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the persisted configuration inside `base`.
pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Path to the durable key-value store inside `base`.
pub fn local_storage_file_in(base: &Path) -> PathBuf {
    base.join(LOCAL_STORAGE_FILE)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Sibling temp path used for write-then-rename.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let path = Path::new("/data/local_storage.json");
        assert_eq!(tmp_path(path), PathBuf::from("/data/local_storage.json.tmp"));
        assert_eq!(tmp_path(Path::new("/data/raw")), PathBuf::from("/data/raw.tmp"));
    }

    #[test]
    fn files_resolve_inside_base() {
        let base = Path::new("/tmp/onboard");
        assert_eq!(config_file_in(base), base.join("config.json"));
        assert_eq!(local_storage_file_in(base), base.join("local_storage.json"));
    }
}
