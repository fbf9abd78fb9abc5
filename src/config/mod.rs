//! Persistent user preferences, including the settings fed to the
//! accounting engine. Loaded once at start-up and written back on every
//! change.

use chrono::{NaiveDateTime, Utc};
use serde::{de::Deserializer, Deserialize, Serialize};
use std::{
    cmp::Reverse,
    convert::Infallible,
    ffi::OsStr,
    fmt,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    domain::schedule::Settings,
    errors::TrackerError,
    utils::paths::{self, ensure_dir},
};

const BACKUP_PREFIX: &str = "config_";
const BACKUP_SUFFIX: &str = ".json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const STAGING_SUFFIX: &str = ".partial";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "Config::default_enable_notifications")]
    pub enable_notifications: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional override for the application directory.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            theme: Theme::default(),
            enable_notifications: Self::default_enable_notifications(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_enable_notifications() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(paths::app_data_dir)
    }

    pub fn validate(&self) -> Result<(), TrackerError> {
        self.settings.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl FromStr for Theme {
    type Err = Infallible;

    /// Unrecognised names fall back to [`Theme::System`].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::System,
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }
}

/// Handles persistence and backup management for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    /// Opens the config under the default application directory and follows
    /// its `dataRoot`, if one is set.
    pub fn new() -> Result<Self, TrackerError> {
        let bootstrap = Self::with_base_dir(paths::app_data_dir())?;
        let config = bootstrap.load()?;
        Self::for_config(&config)
    }

    /// Manager rooted at the directory `config` resolves to.
    pub fn for_config(config: &Config) -> Result<Self, TrackerError> {
        let base = config.resolve_data_root();
        tracing::debug!(base = %base.display(), "config root resolved");
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, TrackerError> {
        let backups_dir = paths::config_backups_dir_in(&base);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            backups_dir,
        })
    }

    /// Reads the stored config, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config, TrackerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            tracing::debug!(path = %self.path.display(), "config loaded");
            Ok(config)
        } else {
            tracing::debug!(path = %self.path.display(), "no config on disk, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), TrackerError> {
        config.validate()?;
        persist(&self.path, config)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// Replaces the stored engine settings and returns the updated config.
    pub fn update_settings(&self, settings: Settings) -> Result<Config, TrackerError> {
        let mut config = self.load()?;
        config.settings = settings;
        self.save(&config)?;
        Ok(config)
    }

    /// Snapshots `config` into the backups directory and returns the file
    /// name. Backups taken within the same second get increasing copy numbers
    /// instead of replacing each other.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, TrackerError> {
        ensure_dir(&self.backups_dir)?;
        let stamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let label = sanitize_note(note);
        let mut copy = 1;
        let name = loop {
            let candidate = BackupName {
                stamp: &stamp,
                copy,
                label: label.as_deref(),
            }
            .to_string();
            if !self.backups_dir.join(&candidate).exists() {
                break candidate;
            }
            copy += 1;
        };
        persist(&self.backups_dir.join(&name), config)?;
        tracing::info!(backup = %name, "config backup written");
        Ok(name)
    }

    /// Saves the named backup as the current config. Only bare file names
    /// from the backups directory are accepted.
    pub fn restore(&self, backup_name: &str) -> Result<Config, TrackerError> {
        if Path::new(backup_name).file_name() != Some(OsStr::new(backup_name)) {
            return Err(TrackerError::InvalidInput(format!(
                "`{}` is not a backup file name",
                backup_name
            )));
        }
        let path = self.backups_dir.join(backup_name);
        if !path.is_file() {
            return Err(TrackerError::NotFound(format!(
                "configuration backup `{}`",
                backup_name
            )));
        }
        let data = fs::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&data)?;
        self.save(&config)?;
        tracing::info!(backup = %backup_name, "config restored");
        Ok(config)
    }

    /// Lists backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>, TrackerError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = fs::read_dir(&self.backups_dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.ends_with(BACKUP_SUFFIX))
            .collect();
        names.sort_by_key(|name| Reverse(backup_order(name)));
        Ok(names)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `config_<YYYYmmdd_HHMMSS>[-copy][_note].json`
struct BackupName<'a> {
    stamp: &'a str,
    copy: u32,
    label: Option<&'a str>,
}

impl fmt::Display for BackupName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", BACKUP_PREFIX, self.stamp)?;
        if self.copy > 1 {
            write!(f, "-{}", self.copy)?;
        }
        if let Some(label) = self.label {
            write!(f, "_{}", label)?;
        }
        f.write_str(BACKUP_SUFFIX)
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut label = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            label.push(ch.to_ascii_lowercase());
        } else if !label.is_empty() && !label.ends_with('-') {
            label.push('-');
        }
    }
    let label = label.trim_end_matches('-');
    (!label.is_empty()).then(|| label.to_string())
}

/// Creation time and copy number encoded in a backup name. Names that do not
/// follow the backup pattern sort last.
fn backup_order(name: &str) -> Option<(NaiveDateTime, u32)> {
    let rest = name.strip_prefix(BACKUP_PREFIX)?.strip_suffix(BACKUP_SUFFIX)?;
    let (date, rest) = rest.split_once('_')?;
    let time = rest.split('_').next()?;
    let (time, copy) = match time.split_once('-') {
        Some((time, copy)) => (time, copy.parse().ok()?),
        None => (time, 1),
    };
    let stamp = NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S").ok()?;
    Some((stamp, copy))
}

/// Writes `config` beside `path` and renames it into place, so readers never
/// see a half-written file.
fn persist(path: &Path, config: &Config) -> Result<(), TrackerError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(STAGING_SUFFIX);
    let staging = PathBuf::from(staging);
    fs::write(&staging, json)?;
    fs::rename(&staging, path)?;
    Ok(())
}
