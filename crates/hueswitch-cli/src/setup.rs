// Root composition: config, themes, preference store and the coordinator

use std::path::{Path, PathBuf};

use hueswitch_storage::{default_preference_path, JsonFilePreferenceStore};
use hueswitch_themes::{
    CoordinatorConfig, ThemeCoordinator, ThemeDefinition, ThemeHost, ThemeLoader,
};

use crate::error::{CliError, CliResult};

/// Paths the CLI was pointed at
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub config: Option<PathBuf>,
    pub themes_dir: Option<PathBuf>,
    pub store: Option<PathBuf>,
}

pub fn load_config(path: Option<&Path>) -> CliResult<CoordinatorConfig> {
    match path {
        Some(path) => CoordinatorConfig::load_from_file(path)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e))),
        None => Ok(CoordinatorConfig::default()),
    }
}

/// Themes from the first directory that is set, else the built-ins
///
/// `--themes-dir` takes precedence over the config file, which takes
/// precedence over the user themes directory.
pub fn load_themes(
    options: &SetupOptions,
    config: &CoordinatorConfig,
) -> CliResult<Vec<ThemeDefinition>> {
    let explicit = options.themes_dir.clone().or_else(|| config.themes_dir.clone());
    let dir = explicit.clone().or_else(ThemeLoader::themes_directory);

    let themes = match &dir {
        Some(dir) => ThemeLoader::load_from_directory(dir)?,
        None => Vec::new(),
    };

    if themes.is_empty() {
        if let Some(dir) = explicit {
            tracing::warn!("No themes found in {}; using built-in themes", dir.display());
        }
        return Ok(ThemeDefinition::builtin());
    }
    Ok(ThemeLoader::dedup_by_id(themes))
}

/// Build, install and initialize the application's coordinator
pub fn build_coordinator(host: &ThemeHost, options: &SetupOptions) -> CliResult<ThemeCoordinator> {
    let config = load_config(options.config.as_deref())?;
    let themes = load_themes(options, &config)?;

    let store_path = match &options.store {
        Some(path) => path.clone(),
        None => default_preference_path()?,
    };
    tracing::debug!("Using preference store at {}", store_path.display());

    let coordinator =
        ThemeCoordinator::new(themes, config, JsonFilePreferenceStore::new(store_path));
    Ok(host.install(coordinator))
}
