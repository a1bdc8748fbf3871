//! Core theme types and data structures

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};

/// Linear RGBA color with components in `[0, 1]`
///
/// Serializes as a hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || ThemeError::InvalidColor {
            field: "color".to_string(),
            value: hex.to_string(),
        };
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        let hex_digits = digits.bytes().all(|b| b.is_ascii_hexdigit());
        if !(digits.len() == 6 || digits.len() == 8) || !hex_digits {
            return Err(invalid());
        }
        let channel = |i: usize| -> Result<f32> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| invalid())
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Component-wise product, alpha included
    pub fn multiply(self, other: Rgba) -> Rgba {
        Rgba::new(
            self.r * other.r,
            self.g * other.g,
            self.b * other.b,
            self.a * other.a,
        )
    }

    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let [r, g, b, _] = self.to_rgba8();
        (r, g, b)
    }

    fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl TryFrom<String> for Rgba {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

impl From<Rgba> for ratatui::style::Color {
    fn from(color: Rgba) -> Self {
        let (r, g, b) = color.to_rgb8();
        ratatui::style::Color::Rgb(r, g, b)
    }
}

/// Semantic color role an element can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    /// No color; appliers leave the element's color untouched
    None,
    Background,
    Surface,
    Primary,
    Secondary,
    #[default]
    TextPrimary,
    TextSecondary,
    Accent,
    Success,
    Warning,
    Danger,
}

impl ColorToken {
    /// The ten concrete tokens, in declaration order
    pub const ALL: [ColorToken; 10] = [
        ColorToken::Background,
        ColorToken::Surface,
        ColorToken::Primary,
        ColorToken::Secondary,
        ColorToken::TextPrimary,
        ColorToken::TextSecondary,
        ColorToken::Accent,
        ColorToken::Success,
        ColorToken::Warning,
        ColorToken::Danger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::None => "none",
            ColorToken::Background => "background",
            ColorToken::Surface => "surface",
            ColorToken::Primary => "primary",
            ColorToken::Secondary => "secondary",
            ColorToken::TextPrimary => "text-primary",
            ColorToken::TextSecondary => "text-secondary",
            ColorToken::Accent => "accent",
            ColorToken::Success => "success",
            ColorToken::Warning => "warning",
            ColorToken::Danger => "danger",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorToken {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "none" {
            return Ok(ColorToken::None);
        }
        ColorToken::ALL
            .into_iter()
            .find(|token| token.as_str() == normalized)
            .ok_or_else(|| ThemeError::InvalidFormat(format!("Unknown color token: {}", s)))
    }
}

/// The ten concrete colors of a theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTokens {
    pub background: Rgba,
    pub surface: Rgba,
    pub primary: Rgba,
    pub secondary: Rgba,
    pub text_primary: Rgba,
    pub text_secondary: Rgba,
    pub accent: Rgba,
    pub success: Rgba,
    pub warning: Rgba,
    pub danger: Rgba,
}

impl Default for ColorTokens {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            surface: Rgba::rgb(0.95, 0.95, 0.95),
            primary: Rgba::rgb(0.13, 0.52, 0.96),
            secondary: Rgba::rgb(0.2, 0.2, 0.2),
            text_primary: Rgba::BLACK,
            text_secondary: Rgba::rgb(0.2, 0.2, 0.2),
            accent: Rgba::rgb(1.0, 0.76, 0.03),
            success: Rgba::rgb(0.2, 0.7, 0.3),
            warning: Rgba::rgb(0.95, 0.6, 0.1),
            danger: Rgba::rgb(0.85, 0.2, 0.2),
        }
    }
}

impl ColorTokens {
    /// Resolve a token to its color; `ColorToken::None` has no color
    pub fn get(&self, token: ColorToken) -> Option<Rgba> {
        match token {
            ColorToken::None => None,
            ColorToken::Background => Some(self.background),
            ColorToken::Surface => Some(self.surface),
            ColorToken::Primary => Some(self.primary),
            ColorToken::Secondary => Some(self.secondary),
            ColorToken::TextPrimary => Some(self.text_primary),
            ColorToken::TextSecondary => Some(self.text_secondary),
            ColorToken::Accent => Some(self.accent),
            ColorToken::Success => Some(self.success),
            ColorToken::Warning => Some(self.warning),
            ColorToken::Danger => Some(self.danger),
        }
    }

    pub(crate) fn get_mut(&mut self, token: ColorToken) -> Option<&mut Rgba> {
        match token {
            ColorToken::None => None,
            ColorToken::Background => Some(&mut self.background),
            ColorToken::Surface => Some(&mut self.surface),
            ColorToken::Primary => Some(&mut self.primary),
            ColorToken::Secondary => Some(&mut self.secondary),
            ColorToken::TextPrimary => Some(&mut self.text_primary),
            ColorToken::TextSecondary => Some(&mut self.text_secondary),
            ColorToken::Accent => Some(&mut self.accent),
            ColorToken::Success => Some(&mut self.success),
            ColorToken::Warning => Some(&mut self.warning),
            ColorToken::Danger => Some(&mut self.danger),
        }
    }
}

/// Name of a font asset provided by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontRef(pub String);

/// Name of an image asset provided by the host
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl FontRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ImageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which of a theme's fonts an element uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSlot {
    #[default]
    Primary,
    Alternate,
}

/// Themed image registered under a lookup key (e.g. `btn-primary`, `icon-back`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedImage {
    pub key: String,
    pub image: ImageRef,
}

/// A complete theme definition
///
/// Definitions are authored offline and never change once handed to a
/// coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDefinition {
    /// Stable identifier, unique among the themes of one coordinator
    pub id: String,
    /// Human readable name
    pub display_name: String,
    /// Optional grouping tag for brand or team variants
    pub group_tag: Option<String>,
    /// Logo shown for the group, if any
    pub group_logo: Option<ImageRef>,
    pub colors: ColorTokens,
    pub primary_font: Option<FontRef>,
    pub alternate_font: Option<FontRef>,
    /// Ordered key → image table
    pub images: Vec<NamedImage>,
}

impl ThemeDefinition {
    /// Theme with default (light) colors and no fonts or images
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            group_tag: None,
            group_logo: None,
            colors: ColorTokens::default(),
            primary_font: None,
            alternate_font: None,
            images: Vec::new(),
        }
    }

    pub fn with_group(mut self, tag: impl Into<String>) -> Self {
        self.group_tag = Some(tag.into());
        self
    }

    pub fn with_colors(mut self, colors: ColorTokens) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_color(mut self, token: ColorToken, color: Rgba) -> Self {
        if let Some(slot) = self.colors.get_mut(token) {
            *slot = color;
        }
        self
    }

    pub fn with_primary_font(mut self, font: FontRef) -> Self {
        self.primary_font = Some(font);
        self
    }

    pub fn with_alternate_font(mut self, font: FontRef) -> Self {
        self.alternate_font = Some(font);
        self
    }

    pub fn with_image(mut self, key: impl Into<String>, image: ImageRef) -> Self {
        self.images.push(NamedImage {
            key: key.into(),
            image,
        });
        self
    }

    /// Validate the theme data
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ThemeError::ValidationError(
                "Theme id cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve a color token against this theme
    pub fn color(&self, token: ColorToken) -> Option<Rgba> {
        self.colors.get(token)
    }

    /// First image registered under `key`; entries with empty keys never match
    pub fn image(&self, key: &str) -> Option<&ImageRef> {
        if key.is_empty() {
            return None;
        }
        self.images
            .iter()
            .find(|entry| !entry.key.is_empty() && entry.key == key)
            .map(|entry| &entry.image)
    }

    pub fn font(&self, slot: FontSlot) -> Option<&FontRef> {
        match slot {
            FontSlot::Primary => self.primary_font.as_ref(),
            FontSlot::Alternate => self.alternate_font.as_ref(),
        }
    }

    /// Built-in light theme
    pub fn light() -> Self {
        Self::new("light", "Light")
    }

    /// Built-in dark theme
    pub fn dark() -> Self {
        Self::new("dark", "Dark").with_colors(ColorTokens {
            background: Rgba::rgb(0.07, 0.07, 0.08),
            surface: Rgba::rgb(0.12, 0.12, 0.14),
            primary: Rgba::rgb(0.35, 0.62, 1.0),
            secondary: Rgba::rgb(0.8, 0.8, 0.8),
            text_primary: Rgba::rgb(0.95, 0.95, 0.95),
            text_secondary: Rgba::rgb(0.7, 0.7, 0.7),
            accent: Rgba::rgb(1.0, 0.76, 0.03),
            success: Rgba::rgb(0.3, 0.8, 0.4),
            warning: Rgba::rgb(1.0, 0.7, 0.2),
            danger: Rgba::rgb(0.95, 0.35, 0.35),
        })
    }

    /// Themes available without any authored assets
    pub fn builtin() -> Vec<Self> {
        vec![Self::light(), Self::dark()]
    }
}
