//! Error types for the themes module

use std::path::PathBuf;

use hueswitch_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Theme not found: {0}")]
    NotFound(String),

    #[error("Invalid theme format: {0}")]
    InvalidFormat(String),

    #[error("Invalid color for {field}: {value}")]
    InvalidColor { field: String, value: String },

    #[error("Theme validation failed: {0}")]
    ValidationError(String),

    #[error("Theme file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
