//! Persistent key-value storage for player preferences.
//!
//! Values are plain integers keyed by string. Booleans ride on top of the
//! integer slots as `1`/`0`, so a store only has to know about one type.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key holding the selected index into the enumerated resolution list.
pub const RESOLUTION_KEY: &str = "resolution";
/// Key holding the fullscreen flag.
pub const WINDOW_MODE_KEY: &str = "window-mode";

const PREFS_FILE_NAME: &str = "prefs.toml";

/// A persistent integer key-value store.
pub trait SettingsStore {
    /// Read `key`, or `default` when it has never been written.
    fn get_int(&self, key: &str, default: i32) -> i32;

    fn set_int(&mut self, key: &str, value: i32);

    fn has_key(&self, key: &str) -> bool;

    /// Read a boolean stored as an integer. Any positive value is `true`.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        if !self.has_key(key) {
            return default;
        }
        self.get_int(key, 0) > 0
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set_int(key, if value { 1 } else { 0 });
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        self.values.insert(key.to_string(), value);
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preferences file I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preferences file {} is not valid TOML: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Store persisted as a flat TOML table of integers.
///
/// Writes only touch memory and mark the store dirty; call [`TomlStore::flush`]
/// to put them on disk.
#[derive(Debug)]
pub struct TomlStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
    dirty: bool,
}

impl TomlStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values: BTreeMap<String, i64> = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        log::debug!("Opened preferences at {:?} ({} keys)", path, values.len());

        Ok(Self {
            path,
            values,
            dirty: false,
        })
    }

    /// Open the store, falling back to an empty one if the file is unreadable.
    ///
    /// The broken file is left alone until the next flush overwrites it.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("Ignoring unreadable preferences: {}", e);
                Self {
                    path,
                    values: BTreeMap::new(),
                    dirty: false,
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes to disk. Does nothing when clean.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        self.dirty = false;
        log::debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

impl SettingsStore for TomlStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.values
            .get(key)
            .and_then(|v| i32::try_from(*v).ok())
            .unwrap_or(default)
    }

    fn set_int(&mut self, key: &str, value: i32) {
        let value = i64::from(value);
        if self.values.get(key) != Some(&value) {
            self.values.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Platform-specific configuration directory shared by every vidset file.
///
/// On Linux: `~/.config/vidset`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io", "vidset", "vidset")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Platform-specific location of the preferences file.
///
/// On Linux: `~/.config/vidset/prefs.toml`
pub fn default_prefs_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(PREFS_FILE_NAME))
}
