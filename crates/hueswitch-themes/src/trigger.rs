//! UI-bound action that switches themes

use serde::{Deserialize, Serialize};

use crate::coordinator::{SwitchOutcome, WeakCoordinator};

/// What a trigger does when activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerMode {
    /// Step through every theme in order
    CycleAll,
    /// Flip between two themes
    Toggle { light_id: String, dark_id: String },
}

/// Serialized trigger settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub cycle_all_themes: bool,
    pub light_theme_id: String,
    pub dark_theme_id: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            cycle_all_themes: true,
            light_theme_id: "light".to_string(),
            dark_theme_id: "dark".to_string(),
        }
    }
}

impl From<TriggerConfig> for TriggerMode {
    fn from(config: TriggerConfig) -> Self {
        if config.cycle_all_themes {
            TriggerMode::CycleAll
        } else {
            TriggerMode::Toggle {
                light_id: config.light_theme_id,
                dark_id: config.dark_theme_id,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ThemeToggleTrigger {
    mode: TriggerMode,
    coordinator: WeakCoordinator,
}

impl ThemeToggleTrigger {
    pub fn new(mode: TriggerMode, coordinator: WeakCoordinator) -> Self {
        Self { mode, coordinator }
    }

    pub fn from_config(config: TriggerConfig, coordinator: WeakCoordinator) -> Self {
        Self::new(config.into(), coordinator)
    }

    pub fn mode(&self) -> &TriggerMode {
        &self.mode
    }

    pub fn activate(&self) -> SwitchOutcome {
        let Some(coordinator) = self.coordinator.upgrade() else {
            tracing::warn!("Theme trigger activated without a theme coordinator");
            return SwitchOutcome::Unchanged;
        };
        match &self.mode {
            TriggerMode::CycleAll => coordinator.next(),
            TriggerMode::Toggle { light_id, dark_id } => {
                coordinator.toggle_between(light_id, dark_id)
            }
        }
    }
}
