//! hueswitch storage
//!
//! Durable key-value preferences used to remember the last selected theme
//! across sessions. The store is synchronous: a `set` has reached the backing
//! medium by the time it returns.

pub mod error;
pub mod preferences;

pub use error::{IoOperation, StorageError, StorageResult};
pub use preferences::{
    default_preference_path, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceEntry,
    PreferenceStore, ACTIVE_THEME_KEY,
};
