//! Theme coordination: active theme, persistence and change fan-out

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use hueswitch_storage::PreferenceStore;

use crate::{
    config::CoordinatorConfig,
    event::{EventChannel, SubscriptionId},
    registry::{ApplierRegistry, SharedApplier},
    types::ThemeDefinition,
};

/// Result of a switch request
#[derive(Debug, Clone)]
pub enum SwitchOutcome {
    /// The requested theme is now active
    Switched(Rc<ThemeDefinition>),
    /// The requested id was unknown; a fallback theme is now active
    FellBack {
        requested: String,
        theme: Rc<ThemeDefinition>,
    },
    /// Nothing changed: no themes exist or the request matched nothing
    Unchanged,
}

impl SwitchOutcome {
    /// The theme activated by this request, if any
    pub fn theme(&self) -> Option<&Rc<ThemeDefinition>> {
        match self {
            SwitchOutcome::Switched(theme) | SwitchOutcome::FellBack { theme, .. } => Some(theme),
            SwitchOutcome::Unchanged => None,
        }
    }

    pub fn theme_id(&self) -> Option<&str> {
        self.theme().map(|theme| theme.id.as_str())
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, SwitchOutcome::Unchanged)
    }
}

struct CoordinatorInner {
    themes: Vec<Rc<ThemeDefinition>>,
    config: CoordinatorConfig,
    active: RefCell<Option<Rc<ThemeDefinition>>>,
    store: RefCell<Box<dyn PreferenceStore>>,
    appliers: RefCell<ApplierRegistry>,
    changed: EventChannel<Rc<ThemeDefinition>>,
    initialized: Cell<bool>,
}

/// Owner of the theme list and the active selection
///
/// Cloning yields another handle to the same coordinator. The application's
/// root creates one and passes handles (or [`WeakCoordinator`]s) to whatever
/// needs it.
#[derive(Clone)]
pub struct ThemeCoordinator {
    inner: Rc<CoordinatorInner>,
}

/// Non-owning handle to a [`ThemeCoordinator`]
#[derive(Clone, Default)]
pub struct WeakCoordinator {
    inner: Weak<CoordinatorInner>,
}

impl WeakCoordinator {
    /// A handle that never upgrades
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade(&self) -> Option<ThemeCoordinator> {
        self.inner.upgrade().map(|inner| ThemeCoordinator { inner })
    }
}

impl fmt::Debug for WeakCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakCoordinator")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl fmt::Debug for ThemeCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeCoordinator")
            .field("themes", &self.theme_count())
            .field("active", &self.active_id())
            .field("appliers", &self.applier_count())
            .field("listeners", &self.inner.changed.len())
            .finish()
    }
}

impl ThemeCoordinator {
    /// Create a coordinator over `themes`; nothing is activated until
    /// [`initialize`](Self::initialize) or an explicit switch.
    pub fn new(
        themes: Vec<ThemeDefinition>,
        config: CoordinatorConfig,
        store: impl PreferenceStore + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(CoordinatorInner {
                themes: themes.into_iter().map(Rc::new).collect(),
                config,
                active: RefCell::new(None),
                store: RefCell::new(Box::new(store)),
                appliers: RefCell::new(ApplierRegistry::new()),
                changed: EventChannel::new(),
                initialized: Cell::new(false),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakCoordinator {
        WeakCoordinator {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether two handles refer to the same coordinator
    pub fn ptr_eq(&self, other: &ThemeCoordinator) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Restore the persisted theme, or the default one, without firing the
    /// change event. Runs once; later calls return the active theme.
    pub fn initialize(&self) -> Option<Rc<ThemeDefinition>> {
        if self.inner.initialized.replace(true) {
            return self.active();
        }
        let config = &self.inner.config;
        if !config.apply_on_init {
            tracing::debug!("Theme restore on init disabled");
            return None;
        }

        let saved = if config.restore_last_theme {
            match self.inner.store.borrow().get(&config.preference_key) {
                Ok(saved) => saved,
                Err(e) => {
                    tracing::warn!("Failed to read saved theme: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let target = match saved {
            Some(id) => {
                tracing::debug!("Restoring saved theme '{}'", id);
                id
            }
            None => config.default_theme_id.clone(),
        };
        self.switch_by_id(&target, true).theme().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.initialized.get()
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.inner.config
    }

    pub fn themes(&self) -> &[Rc<ThemeDefinition>] {
        &self.inner.themes
    }

    pub fn theme_count(&self) -> usize {
        self.inner.themes.len()
    }

    /// First theme with the given id
    pub fn find(&self, id: &str) -> Option<Rc<ThemeDefinition>> {
        self.inner.themes.iter().find(|theme| theme.id == id).cloned()
    }

    pub fn has_theme(&self, id: &str) -> bool {
        self.inner.themes.iter().any(|theme| theme.id == id)
    }

    pub fn active(&self) -> Option<Rc<ThemeDefinition>> {
        self.inner.active.borrow().clone()
    }

    pub fn active_id(&self) -> Option<String> {
        self.inner.active.borrow().as_ref().map(|theme| theme.id.clone())
    }

    /// Switch to the theme with `id`
    ///
    /// Unknown ids fall back to the configured default, then to the first
    /// theme. With no themes at all nothing changes. `silent` suppresses the
    /// change event only; registered appliers are always updated.
    pub fn switch_by_id(&self, id: &str, silent: bool) -> SwitchOutcome {
        if let Some(theme) = self.find(id) {
            self.activate(theme.clone(), silent);
            return SwitchOutcome::Switched(theme);
        }

        let default_id = &self.inner.config.default_theme_id;
        tracing::warn!("Theme '{}' not found, using default '{}'", id, default_id);

        let fallback = match self.find(default_id) {
            Some(theme) => theme,
            None => match self.inner.themes.first() {
                Some(first) => {
                    tracing::warn!(
                        "Default theme '{}' not found, using first theme '{}'",
                        default_id,
                        first.id
                    );
                    first.clone()
                }
                None => {
                    tracing::error!("No themes configured; cannot switch to '{}'", id);
                    return SwitchOutcome::Unchanged;
                }
            },
        };

        self.activate(fallback.clone(), silent);
        SwitchOutcome::FellBack {
            requested: id.to_string(),
            theme: fallback,
        }
    }

    /// Switch to the theme at `index`, clamped into range
    pub fn switch_by_index(&self, index: isize) -> SwitchOutcome {
        let count = self.theme_count();
        if count == 0 {
            return SwitchOutcome::Unchanged;
        }
        let index = index.clamp(0, count as isize - 1) as usize;
        let theme = self.inner.themes[index].clone();
        self.activate(theme.clone(), false);
        SwitchOutcome::Switched(theme)
    }

    /// Advance to the next theme, wrapping around
    pub fn next(&self) -> SwitchOutcome {
        let count = self.theme_count();
        if count == 0 {
            return SwitchOutcome::Unchanged;
        }
        let current = self.active_position().unwrap_or(0);
        self.switch_by_index(((current + 1) % count) as isize)
    }

    /// Step back to the previous theme, wrapping around
    pub fn previous(&self) -> SwitchOutcome {
        let count = self.theme_count();
        if count == 0 {
            return SwitchOutcome::Unchanged;
        }
        let current = self.active_position().unwrap_or(0);
        self.switch_by_index(((current + count - 1) % count) as isize)
    }

    /// Go to `second` when `first` is active, otherwise to `first`
    pub fn toggle_between(&self, first: &str, second: &str) -> SwitchOutcome {
        let on_first = self.active_id().as_deref() == Some(first);
        if on_first && self.has_theme(second) {
            self.switch_by_id(second, false)
        } else if self.has_theme(first) {
            self.switch_by_id(first, false)
        } else {
            tracing::debug!("Cannot toggle: theme '{}' does not exist", first);
            SwitchOutcome::Unchanged
        }
    }

    /// Switch to the first theme carrying `tag`
    pub fn switch_by_group_tag(&self, tag: &str) -> SwitchOutcome {
        let found = self
            .inner
            .themes
            .iter()
            .find(|theme| theme.group_tag.as_deref() == Some(tag))
            .cloned();
        match found {
            Some(theme) => {
                self.activate(theme.clone(), false);
                SwitchOutcome::Switched(theme)
            }
            None => {
                tracing::warn!("No theme with group tag '{}' found", tag);
                SwitchOutcome::Unchanged
            }
        }
    }

    /// Push `theme` to every live registered applier; returns how many were updated
    pub fn apply_to_all(&self, theme: &ThemeDefinition) -> usize {
        let entries = self.inner.appliers.borrow().snapshot();
        let mut applied = 0;
        for entry in entries {
            let Some(applier) = entry.upgrade() else {
                tracing::trace!("Skipping destroyed applier");
                continue;
            };
            let borrowed = applier.try_borrow_mut();
            match borrowed {
                Ok(mut applier) => {
                    applier.apply(Some(theme));
                    applied += 1;
                }
                Err(_) => tracing::trace!("Skipping applier that is already rendering"),
            };
        }
        tracing::debug!("Applied theme '{}' to {} appliers", theme.id, applied);
        applied
    }

    /// Listen for theme changes
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Rc<ThemeDefinition>) + 'static,
    {
        self.inner.changed.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.changed.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.changed.len()
    }

    pub fn register_applier(&self, applier: &SharedApplier) -> bool {
        self.inner.appliers.borrow_mut().register(applier)
    }

    pub fn deregister_applier(&self, applier: &SharedApplier) -> bool {
        self.inner.appliers.borrow_mut().deregister(applier)
    }

    /// Number of registered appliers that are still alive
    pub fn applier_count(&self) -> usize {
        self.inner.appliers.borrow().live_count()
    }

    fn active_position(&self) -> Option<usize> {
        let active = self.inner.active.borrow();
        let active = active.as_ref()?;
        self.inner
            .themes
            .iter()
            .position(|theme| Rc::ptr_eq(theme, active))
    }

    /// Persist, then publish, then fan out
    fn activate(&self, theme: Rc<ThemeDefinition>, silent: bool) {
        self.persist(&theme.id);
        *self.inner.active.borrow_mut() = Some(theme.clone());
        tracing::info!("Active theme is now '{}'", theme.id);

        if !silent {
            self.inner.changed.emit(&theme);
        }

        // A listener may have switched again; appliers must end on whatever is active now.
        if let Some(active) = self.active() {
            if !Rc::ptr_eq(&active, &theme) {
                tracing::debug!("Theme '{}' superseded by '{}' during dispatch", theme.id, active.id);
            }
            self.apply_to_all(&active);
        }
    }

    fn persist(&self, id: &str) {
        let key = &self.inner.config.preference_key;
        if let Err(e) = self.inner.store.borrow_mut().set(key, id) {
            tracing::warn!("Failed to persist theme '{}': {}", id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use hueswitch_storage::{MemoryPreferenceStore, StorageError, StorageResult};
    use tracing_test::traced_test;

    use super::*;
    use crate::{
        applier::{ApplierConfig, ApplierHandle, StyleApplier},
        tui::{StyleSlot, TuiStyleTarget},
        types::{ColorToken, Rgba},
    };

    fn fixture(ids: &[&str]) -> (ThemeCoordinator, MemoryPreferenceStore) {
        let store = MemoryPreferenceStore::new();
        let themes = ids
            .iter()
            .map(|id| ThemeDefinition::new(*id, id.to_uppercase()))
            .collect();
        let coordinator = ThemeCoordinator::new(themes, CoordinatorConfig::default(), store.clone());
        (coordinator, store)
    }

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::path_resolution_error("unavailable"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::path_resolution_error("unavailable"))
        }

        fn remove(&mut self, _key: &str) -> StorageResult<bool> {
            Ok(false)
        }
    }

    #[test]
    #[traced_test]
    fn test_unknown_id_falls_back_to_default_with_warning() {
        let (coordinator, _) = fixture(&["light", "dark"]);
        coordinator.switch_by_id("dark", false);

        let outcome = coordinator.switch_by_id("nonexistent", false);
        assert!(matches!(outcome, SwitchOutcome::FellBack { ref requested, .. } if requested == "nonexistent"));
        assert_eq!(coordinator.active_id().as_deref(), Some("light"));
        assert!(logs_contain("Theme 'nonexistent' not found"));
    }

    #[test]
    #[traced_test]
    fn test_missing_default_falls_back_to_first_theme() {
        let (coordinator, _) = fixture(&["ocean", "forest"]);
        let outcome = coordinator.switch_by_id("nonexistent", false);

        assert_eq!(outcome.theme_id(), Some("ocean"));
        assert!(logs_contain("Default theme 'light' not found"));
    }

    #[test]
    #[traced_test]
    fn test_empty_coordinator_switch_fails_quietly() {
        let (coordinator, store) = fixture(&[]);
        assert!(coordinator.switch_by_id("light", false).is_unchanged());
        assert!(coordinator.active().is_none());
        assert!(store.is_empty());
        assert!(logs_contain("No themes configured"));
    }

    #[test]
    #[traced_test]
    fn test_group_tag_miss_warns() {
        let (coordinator, _) = fixture(&["light"]);
        assert!(coordinator.switch_by_group_tag("lakers").is_unchanged());
        assert!(logs_contain("No theme with group tag 'lakers' found"));
    }

    #[test]
    #[traced_test]
    fn test_store_failures_are_recovered() {
        let coordinator = ThemeCoordinator::new(
            ThemeDefinition::builtin(),
            CoordinatorConfig::default(),
            FailingStore,
        );

        assert_eq!(coordinator.initialize().map(|t| t.id.clone()).as_deref(), Some("light"));
        assert_eq!(coordinator.switch_by_id("dark", false).theme_id(), Some("dark"));
        assert!(logs_contain("Failed to read saved theme"));
        assert!(logs_contain("Failed to persist theme 'dark'"));
    }

    #[test]
    fn test_persisted_before_listeners_run() {
        let (coordinator, store) = fixture(&["light", "dark"]);
        let observed = Rc::new(RefCell::new(None));
        {
            let observed = observed.clone();
            let store = store.clone();
            let weak = coordinator.downgrade();
            coordinator.subscribe(move |theme| {
                let persisted = store
                    .get(hueswitch_storage::ACTIVE_THEME_KEY)
                    .unwrap_or_default();
                let active = weak.upgrade().and_then(|c| c.active_id());
                *observed.borrow_mut() = Some((theme.id.clone(), persisted, active));
            });
        }

        coordinator.switch_by_id("dark", false);
        let expected = Some("dark".to_string());
        assert_eq!(
            *observed.borrow(),
            Some(("dark".to_string(), expected.clone(), expected))
        );
    }

    #[test]
    fn test_silent_switch_skips_listeners() {
        let (coordinator, _) = fixture(&["light", "dark"]);
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            coordinator.subscribe(move |_| calls.set(calls.get() + 1));
        }

        coordinator.switch_by_id("dark", true);
        assert_eq!(calls.get(), 0);
        coordinator.switch_by_id("light", false);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reentrant_switch_wins() {
        let (coordinator, _) = fixture(&["light", "dark", "contrast"]);
        {
            let weak = coordinator.downgrade();
            coordinator.subscribe(move |theme| {
                if theme.id == "dark" {
                    if let Some(coordinator) = weak.upgrade() {
                        coordinator.switch_by_id("contrast", false);
                    }
                }
            });
        }

        coordinator.switch_by_id("dark", false);
        assert_eq!(coordinator.active_id().as_deref(), Some("contrast"));
    }

    #[test]
    fn test_reentrant_switch_leaves_appliers_on_newest_theme() {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        let themes = vec![
            ThemeDefinition::light(),
            ThemeDefinition::dark(),
            ThemeDefinition::new("contrast", "Contrast").with_color(ColorToken::Background, red),
        ];
        let coordinator =
            ThemeCoordinator::new(themes, CoordinatorConfig::default(), MemoryPreferenceStore::new());
        coordinator.initialize();
        {
            let weak = coordinator.downgrade();
            coordinator.subscribe(move |theme| {
                if theme.id == "dark" {
                    if let Some(coordinator) = weak.upgrade() {
                        coordinator.switch_by_id("contrast", false);
                    }
                }
            });
        }

        // Subscribed after the listener above, so it hears "dark" after "contrast".
        let target = TuiStyleTarget::new("panel", StyleSlot::Background);
        let cell = target.cell();
        let _handle = ApplierHandle::enabled(
            StyleApplier::new(target, ApplierConfig::color(ColorToken::Background)),
            &coordinator,
        );

        coordinator.switch_by_id("dark", false);
        assert_eq!(coordinator.active_id().as_deref(), Some("contrast"));
        assert_eq!(cell.get().bg, Some(red.into()));
    }

    #[test]
    fn test_switch_by_index_clamps() {
        let (coordinator, _) = fixture(&["a", "b", "c"]);
        assert_eq!(coordinator.switch_by_index(-4).theme_id(), Some("a"));
        assert_eq!(coordinator.switch_by_index(1).theme_id(), Some("b"));
        assert_eq!(coordinator.switch_by_index(99).theme_id(), Some("c"));
    }

    #[test]
    fn test_cycle_on_empty_list_is_noop() {
        let (coordinator, _) = fixture(&[]);
        assert!(coordinator.next().is_unchanged());
        assert!(coordinator.previous().is_unchanged());
        assert!(coordinator.switch_by_index(0).is_unchanged());
    }

    #[test]
    fn test_next_without_active_theme_starts_from_first() {
        let (coordinator, _) = fixture(&["a", "b", "c"]);
        assert_eq!(coordinator.next().theme_id(), Some("b"));

        let (coordinator, _) = fixture(&["a", "b", "c"]);
        assert_eq!(coordinator.previous().theme_id(), Some("c"));
    }

    #[test]
    fn test_initialize_runs_once() {
        let (coordinator, mut store) = fixture(&["light", "dark"]);
        store
            .set(hueswitch_storage::ACTIVE_THEME_KEY, "dark")
            .unwrap();

        assert_eq!(coordinator.initialize().map(|t| t.id.clone()).as_deref(), Some("dark"));
        coordinator.switch_by_id("light", false);
        assert_eq!(coordinator.initialize().map(|t| t.id.clone()).as_deref(), Some("light"));
        assert!(coordinator.is_initialized());
    }

    #[test]
    fn test_initialize_honors_config_flags() {
        let store = MemoryPreferenceStore::with_values([(hueswitch_storage::ACTIVE_THEME_KEY, "dark")]);
        let config = CoordinatorConfig {
            restore_last_theme: false,
            ..CoordinatorConfig::default()
        };
        let coordinator = ThemeCoordinator::new(ThemeDefinition::builtin(), config, store.clone());
        assert_eq!(coordinator.initialize().map(|t| t.id.clone()).as_deref(), Some("light"));

        let config = CoordinatorConfig {
            apply_on_init: false,
            ..CoordinatorConfig::default()
        };
        let coordinator = ThemeCoordinator::new(ThemeDefinition::builtin(), config, store);
        assert!(coordinator.initialize().is_none());
        assert!(coordinator.active().is_none());
    }
}
