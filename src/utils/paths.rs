use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const HOME_ENV_VAR: &str = "SWEAT_DEBT_HOME";
const DEFAULT_DIR_NAME: &str = ".sweat_debt";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";
const BACKUP_DIR: &str = "backups";

/// Returns the application data directory, defaulting to `~/.sweat_debt`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}

pub fn config_backups_dir_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(BACKUP_DIR)
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
