//! Coordinator configuration

use std::{fs, path::{Path, PathBuf}};

use hueswitch_storage::ACTIVE_THEME_KEY;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// Startup and persistence settings for a [`ThemeCoordinator`](crate::ThemeCoordinator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Theme used when nothing is saved or a requested id is unknown
    pub default_theme_id: String,
    /// Restore the last selected theme on initialization
    pub restore_last_theme: bool,
    /// Activate a theme during initialization at all
    pub apply_on_init: bool,
    /// Preference key holding the last selected theme id
    pub preference_key: String,
    /// Directory of authored theme files
    pub themes_dir: Option<PathBuf>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            default_theme_id: "light".to_string(),
            restore_last_theme: true,
            apply_on_init: true,
            preference_key: ACTIVE_THEME_KEY.to_string(),
            themes_dir: None,
        }
    }
}

impl CoordinatorConfig {
    pub fn with_default_theme(id: impl Into<String>) -> Self {
        Self {
            default_theme_id: id.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ThemeError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(ThemeError::InvalidFormat(format!(
                "Config file must be TOML or YAML: {}",
                path.display()
            ))),
        }
    }
}
