//! Style appliers: per-element theme subscribers
//!
//! A [`StyleApplier`] knows which color token, image and font its element
//! wants and pushes them into a [`StyleTarget`] whenever it is handed a theme.
//! [`ApplierHandle`] ties an applier's lifetime to a coordinator: enabling it
//! registers the applier and renders the active theme right away, disabling or
//! dropping it removes every trace of the applier from the coordinator.

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};

use serde::{Deserialize, Serialize};

use crate::{
    coordinator::{ThemeCoordinator, WeakCoordinator},
    event::SubscriptionId,
    registry::SharedApplier,
    types::{ColorToken, FontRef, FontSlot, ImageRef, Rgba, ThemeDefinition},
};

/// What a display element is able to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetCapabilities {
    pub color: bool,
    pub image: bool,
    pub font: bool,
}

impl TargetCapabilities {
    pub const COLOR: TargetCapabilities = TargetCapabilities {
        color: true,
        image: false,
        font: false,
    };
    pub const ALL: TargetCapabilities = TargetCapabilities {
        color: true,
        image: true,
        font: true,
    };
}

/// The display element an applier styles
pub trait StyleTarget {
    fn capabilities(&self) -> TargetCapabilities;

    fn set_color(&mut self, color: Rgba);

    fn set_image(&mut self, _image: &ImageRef) {}

    fn set_font(&mut self, _font: &FontRef) {}

    /// Name used in log messages
    fn label(&self) -> &str {
        "element"
    }
}

/// Per-element styling settings, supplied by the surrounding content
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplierConfig {
    /// Token rendered as the element color; `none` leaves the color alone
    pub color_token: ColorToken,
    /// Multiplied into the resolved color
    pub tint: Option<Rgba>,
    /// Key looked up in the theme's image table
    pub image_key: Option<String>,
    pub apply_font: bool,
    pub font_slot: FontSlot,
}

impl ApplierConfig {
    pub fn color(token: ColorToken) -> Self {
        Self {
            color_token: token,
            ..Self::default()
        }
    }

    pub fn with_tint(mut self, tint: Rgba) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn with_image(mut self, key: impl Into<String>) -> Self {
        self.image_key = Some(key.into());
        self
    }

    pub fn with_font(mut self, slot: FontSlot) -> Self {
        self.apply_font = true;
        self.font_slot = slot;
        self
    }
}

/// Renders theme tokens into one display element
pub struct StyleApplier {
    config: ApplierConfig,
    target: Box<dyn StyleTarget>,
}

impl StyleApplier {
    pub fn new(target: impl StyleTarget + 'static, config: ApplierConfig) -> Self {
        Self {
            config,
            target: Box::new(target),
        }
    }

    pub fn config(&self) -> &ApplierConfig {
        &self.config
    }

    pub fn target(&self) -> &dyn StyleTarget {
        self.target.as_ref()
    }

    /// The color this applier would render for `theme`, tint included
    pub fn resolve_color(&self, theme: &ThemeDefinition) -> Option<Rgba> {
        let color = theme.color(self.config.color_token)?;
        Some(match self.config.tint {
            Some(tint) => color.multiply(tint),
            None => color,
        })
    }

    /// Render `theme` into the target; `None` is ignored
    pub fn apply(&mut self, theme: Option<&ThemeDefinition>) {
        let Some(theme) = theme else {
            return;
        };
        let capabilities = self.target.capabilities();

        if let Some(color) = self.resolve_color(theme) {
            if capabilities.color {
                self.target.set_color(color);
            } else {
                tracing::debug!(
                    "{} cannot render colors; skipping {}",
                    self.target.label(),
                    self.config.color_token
                );
            }
        }

        if let Some(key) = self.config.image_key.as_deref().filter(|key| !key.is_empty()) {
            if !capabilities.image {
                tracing::debug!("{} cannot render images; skipping '{}'", self.target.label(), key);
            } else if let Some(image) = theme.image(key) {
                self.target.set_image(image);
            } else {
                tracing::debug!(
                    "Theme '{}' has no image '{}'; keeping current image on {}",
                    theme.id,
                    key,
                    self.target.label()
                );
            }
        }

        if self.config.apply_font {
            if !capabilities.font {
                tracing::debug!("{} cannot render fonts; skipping font", self.target.label());
            } else if let Some(font) = theme.font(self.config.font_slot) {
                self.target.set_font(font);
            }
        }
    }
}

impl fmt::Debug for StyleApplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleApplier")
            .field("target", &self.target.label())
            .field("config", &self.config)
            .finish()
    }
}

/// Enable/disable lifecycle of one applier against one coordinator
///
/// The coordinator is held weakly; disabling after it is gone is a no-op.
/// Dropping the handle disables it.
pub struct ApplierHandle {
    applier: SharedApplier,
    coordinator: WeakCoordinator,
    subscription: Option<SubscriptionId>,
    enabled: bool,
}

impl ApplierHandle {
    /// Bind `applier` to `coordinator` without enabling it
    pub fn new(applier: StyleApplier, coordinator: &ThemeCoordinator) -> Self {
        Self::with_weak(applier, coordinator.downgrade())
    }

    pub fn with_weak(applier: StyleApplier, coordinator: WeakCoordinator) -> Self {
        Self {
            applier: Rc::new(RefCell::new(applier)),
            coordinator,
            subscription: None,
            enabled: false,
        }
    }

    /// Bind and enable in one step
    pub fn enabled(applier: StyleApplier, coordinator: &ThemeCoordinator) -> Self {
        let mut handle = Self::new(applier, coordinator);
        handle.enable();
        handle
    }

    /// Register, render the active theme, then subscribe to changes
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        let Some(coordinator) = self.coordinator.upgrade() else {
            tracing::warn!(
                "No theme coordinator available; {} stays unthemed",
                self.applier.borrow().target().label()
            );
            return;
        };

        coordinator.register_applier(&self.applier);
        self.enabled = true;

        if let Some(active) = coordinator.active() {
            self.applier.borrow_mut().apply(Some(active.as_ref()));
        }

        // Render the coordinator's current theme, not the payload: a listener
        // earlier in the same dispatch may already have switched again.
        let weak = Rc::downgrade(&self.applier);
        let owner = self.coordinator.clone();
        self.subscription = Some(coordinator.subscribe(move |notified| {
            let Some(applier) = weak.upgrade() else {
                return;
            };
            let current = owner.upgrade().and_then(|coordinator| coordinator.active());
            let theme = current.as_ref().unwrap_or(notified);
            if let Ok(mut applier) = applier.try_borrow_mut() {
                applier.apply(Some(&**theme));
            };
        }));
    }

    /// Unsubscribe and deregister
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        let subscription = self.subscription.take();

        if let Some(coordinator) = self.coordinator.upgrade() {
            if let Some(id) = subscription {
                coordinator.unsubscribe(id);
            }
            coordinator.deregister_applier(&self.applier);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn applier(&self) -> Ref<'_, StyleApplier> {
        self.applier.borrow()
    }

    pub fn shared(&self) -> &SharedApplier {
        &self.applier
    }
}

impl Drop for ApplierHandle {
    fn drop(&mut self) {
        self.disable();
    }
}

impl fmt::Debug for ApplierHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplierHandle")
            .field("enabled", &self.enabled)
            .field("subscription", &self.subscription)
            .finish()
    }
}
