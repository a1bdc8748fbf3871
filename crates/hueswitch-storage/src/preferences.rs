//! Durable preference storage
//!
//! Preferences are plain string values addressed by a stable key. The key used
//! for the active theme carries a version suffix so a future change of meaning
//! can move to a new key without misreading old data.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::error::{IoOperation, StorageError, StorageResult};

/// Key under which the last selected theme id is stored
pub const ACTIVE_THEME_KEY: &str = "hueswitch.theme.active_id.v1";

/// Synchronous key-value store for user preferences
///
/// Absence of a key is not an error: `get` returns `Ok(None)`.
pub trait PreferenceStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`, returning whether a value was present
    fn remove(&mut self, key: &str) -> StorageResult<bool>;
}

/// In-memory preference store
///
/// Clones share the same underlying map, so a clone kept aside survives the
/// coordinator that owned the original and can seed the next one.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(key, value)` pairs
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Rc::new(RefCell::new(map)),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        Ok(self.values.borrow_mut().remove(key).is_some())
    }
}

/// A single stored preference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceEntry {
    /// Stored value
    pub value: String,
    /// Last updated timestamp in RFC3339 format
    pub last_updated: Option<String>,
}

/// On-disk document layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceDocument {
    #[serde(default)]
    entries: BTreeMap<String, PreferenceEntry>,
}

/// Preference store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    /// Create a store that reads and writes `path`
    ///
    /// The file does not need to exist yet; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at [`default_preference_path`]
    pub fn with_default_path() -> StorageResult<Self> {
        Ok(Self::new(default_preference_path()?))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a full entry, including its timestamp
    pub fn entry(&self, key: &str) -> StorageResult<Option<PreferenceEntry>> {
        Ok(self.read_document()?.entries.get(key).cloned())
    }

    fn read_document(&self) -> StorageResult<PreferenceDocument> {
        if !self.path.exists() {
            return Ok(PreferenceDocument::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| StorageError::io_error(self.path.clone(), IoOperation::Read, e))?;
        if content.trim().is_empty() {
            return Ok(PreferenceDocument::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            StorageError::parse_error(
                self.path.clone(),
                "json",
                format!("Failed to parse preferences: {}", e),
            )
        })
    }

    /// Read the document for modification; a corrupt file is replaced rather
    /// than blocking every later write.
    fn read_document_for_write(&self) -> StorageResult<PreferenceDocument> {
        match self.read_document() {
            Ok(doc) => Ok(doc),
            Err(StorageError::ParseError { message, .. }) => {
                tracing::warn!(
                    "Discarding unreadable preference file {}: {}",
                    self.path.display(),
                    message
                );
                Ok(PreferenceDocument::default())
            }
            Err(e) => Err(e),
        }
    }

    fn write_document(&self, doc: &PreferenceDocument) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::directory_creation_failed(parent.to_path_buf(), e)
                })?;
            }
        }
        let content = serde_json::to_string_pretty(doc).map_err(|e| {
            StorageError::parse_error(
                self.path.clone(),
                "json",
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(&self.path, content)
            .map_err(|e| StorageError::io_error(self.path.clone(), IoOperation::Write, e))
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entry(key)?.map(|entry| entry.value))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut doc = self.read_document_for_write()?;
        doc.entries.insert(
            key.to_string(),
            PreferenceEntry {
                value: value.to_string(),
                last_updated: Some(chrono::Local::now().to_rfc3339()),
            },
        );
        self.write_document(&doc)?;
        tracing::debug!("Stored preference {} in {}", key, self.path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<bool> {
        let mut doc = self.read_document_for_write()?;
        let removed = doc.entries.remove(key).is_some();
        if removed {
            self.write_document(&doc)?;
        }
        Ok(removed)
    }
}

/// Default location of the preference file: `<config dir>/hueswitch/preferences.json`
pub fn default_preference_path() -> StorageResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        StorageError::path_resolution_error("Could not determine config directory")
    })?;
    Ok(config_dir.join("hueswitch").join("preferences.json"))
}
