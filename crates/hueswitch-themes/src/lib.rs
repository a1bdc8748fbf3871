//! hueswitch theme system
//!
//! A [`ThemeCoordinator`] owns the known [`ThemeDefinition`]s, tracks which one
//! is active, persists the selection through a
//! [`PreferenceStore`](hueswitch_storage::PreferenceStore) and pushes every
//! change to the [`StyleApplier`]s registered with it as well as to listeners of
//! its change event. Everything runs on one thread; handles are `Rc`-based.

pub mod applier;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod event;
pub mod host;
pub mod loader;
pub mod registry;
pub mod trigger;
pub mod tui;
pub mod types;

pub use applier::{ApplierConfig, ApplierHandle, StyleApplier, StyleTarget, TargetCapabilities};
pub use config::CoordinatorConfig;
pub use coordinator::{SwitchOutcome, ThemeCoordinator, WeakCoordinator};
pub use error::{Result, ThemeError};
pub use event::{EventChannel, SubscriptionId};
pub use host::ThemeHost;
pub use loader::{ThemeFile, ThemeFormat, ThemeLoader};
pub use registry::ApplierRegistry;
pub use trigger::{ThemeToggleTrigger, TriggerConfig, TriggerMode};
pub use tui::{StyleCell, StyleSlot, TuiStyleTarget};
pub use types::{
    ColorToken, ColorTokens, FontRef, FontSlot, ImageRef, NamedImage, Rgba, ThemeDefinition,
};
