//! Authored theme loading from YAML, TOML and JSON files

use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ThemeError},
    types::{ColorToken, ColorTokens, FontRef, ImageRef, NamedImage, Rgba, ThemeDefinition},
};

/// File format for authored themes
///
/// Colors are hex strings keyed by token name (`text-primary`, ...). Tokens
/// that are left out keep their default light value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeFile {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_font: Option<String>,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub images: Vec<ThemeFileImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFileImage {
    pub key: String,
    pub image: String,
}

impl ThemeFile {
    /// Check the file and build the definition it describes
    pub fn to_definition(&self) -> Result<ThemeDefinition> {
        if self.id.trim().is_empty() {
            return Err(ThemeError::ValidationError(
                "Theme id cannot be empty".to_string(),
            ));
        }

        let mut colors = ColorTokens::default();
        for (name, hex) in &self.colors {
            let token: ColorToken = name.parse()?;
            let slot = colors.get_mut(token).ok_or_else(|| {
                ThemeError::ValidationError(format!("Color token '{}' cannot be assigned", name))
            })?;
            *slot = Rgba::from_hex(hex).map_err(|_| ThemeError::InvalidColor {
                field: name.clone(),
                value: hex.clone(),
            })?;
        }

        let mut seen = HashSet::new();
        for entry in &self.images {
            if !entry.key.is_empty() && !seen.insert(entry.key.as_str()) {
                return Err(ThemeError::ValidationError(format!(
                    "Duplicate image key '{}' in theme '{}'",
                    entry.key, self.id
                )));
            }
        }

        let display_name = if self.display_name.is_empty() {
            self.id.clone()
        } else {
            self.display_name.clone()
        };

        let definition = ThemeDefinition {
            id: self.id.clone(),
            display_name,
            group_tag: self.group_tag.clone().filter(|tag| !tag.is_empty()),
            group_logo: self.group_logo.clone().map(ImageRef::new),
            colors,
            primary_font: self.primary_font.clone().map(FontRef::new),
            alternate_font: self.alternate_font.clone().map(FontRef::new),
            images: self
                .images
                .iter()
                .map(|entry| NamedImage {
                    key: entry.key.clone(),
                    image: ImageRef::new(entry.image.clone()),
                })
                .collect(),
        };
        definition.validate()?;
        Ok(definition)
    }
}

impl From<&ThemeDefinition> for ThemeFile {
    fn from(theme: &ThemeDefinition) -> Self {
        Self {
            id: theme.id.clone(),
            display_name: theme.display_name.clone(),
            group_tag: theme.group_tag.clone(),
            group_logo: theme.group_logo.as_ref().map(|logo| logo.as_str().to_string()),
            primary_font: theme.primary_font.as_ref().map(|font| font.as_str().to_string()),
            alternate_font: theme
                .alternate_font
                .as_ref()
                .map(|font| font.as_str().to_string()),
            colors: ColorToken::ALL
                .into_iter()
                .filter_map(|token| {
                    theme
                        .color(token)
                        .map(|color| (token.as_str().to_string(), color.to_hex()))
                })
                .collect(),
            images: theme
                .images
                .iter()
                .map(|entry| ThemeFileImage {
                    key: entry.key.clone(),
                    image: entry.image.as_str().to_string(),
                })
                .collect(),
        }
    }
}

/// Serialization format of a theme file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Yaml,
    Toml,
    Json,
}

impl ThemeFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(ThemeFormat::Yaml),
            "toml" => Some(ThemeFormat::Toml),
            "json" => Some(ThemeFormat::Json),
            _ => None,
        }
    }
}

/// Theme asset loader
pub struct ThemeLoader;

impl ThemeLoader {
    /// Parse and validate a theme
    pub fn load_from_string(content: &str, format: ThemeFormat) -> Result<ThemeDefinition> {
        let file: ThemeFile = match format {
            ThemeFormat::Yaml => serde_yaml::from_str(content)?,
            ThemeFormat::Toml => toml::from_str(content)?,
            ThemeFormat::Json => serde_json::from_str(content)?,
        };
        file.to_definition()
    }

    pub fn load_from_file(path: &Path) -> Result<ThemeDefinition> {
        if !path.exists() {
            return Err(ThemeError::FileNotFound(path.to_path_buf()));
        }
        let format = ThemeFormat::from_path(path).ok_or_else(|| {
            ThemeError::InvalidFormat(format!(
                "Theme file must be YAML, TOML or JSON: {}",
                path.display()
            ))
        })?;
        let content = fs::read_to_string(path)?;
        Self::load_from_string(&content, format)
    }

    /// Write a theme in the format given by the path's extension
    pub fn save_to_file(theme: &ThemeDefinition, path: &Path) -> Result<()> {
        let format = ThemeFormat::from_path(path).ok_or_else(|| {
            ThemeError::InvalidFormat(format!(
                "Theme file must be YAML, TOML or JSON: {}",
                path.display()
            ))
        })?;
        let file = ThemeFile::from(theme);
        let content = match format {
            ThemeFormat::Yaml => serde_yaml::to_string(&file)?,
            ThemeFormat::Toml => toml::to_string_pretty(&file)?,
            ThemeFormat::Json => serde_json::to_string_pretty(&file)?,
        };
        fs::write(path, content)?;
        Ok(())
    }

    /// Load every theme file in `dir`, ordered by file name
    ///
    /// Files that fail to load are skipped with a warning. A missing directory
    /// yields no themes.
    pub fn load_from_directory(dir: &Path) -> Result<Vec<ThemeDefinition>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(ThemeError::InvalidFormat(format!(
                "Path is not a directory: {}",
                dir.display()
            )));
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && ThemeFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut themes = Vec::new();
        for path in paths {
            match Self::load_from_file(&path) {
                Ok(theme) => themes.push(theme),
                Err(e) => {
                    tracing::warn!("Failed to load theme from {}: {}", path.display(), e);
                }
            }
        }
        tracing::debug!("Loaded {} themes from {}", themes.len(), dir.display());
        Ok(themes)
    }

    /// Keep the first definition of every id
    pub fn dedup_by_id(themes: Vec<ThemeDefinition>) -> Vec<ThemeDefinition> {
        let mut seen = HashSet::new();
        themes
            .into_iter()
            .filter(|theme| {
                let first = seen.insert(theme.id.clone());
                if !first {
                    tracing::warn!("Duplicate theme id '{}' ignored", theme.id);
                }
                first
            })
            .collect()
    }

    /// Default directory for user themes
    pub fn themes_directory() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hueswitch").join("themes"))
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    const CORPORATE_YAML: &str = r##"
id: corporate
display_name: Corporate
group_tag: acme
primary_font: Inter-Regular
colors:
  background: "#101010"
  text-primary: "#fafafa"
images:
  - key: btn-primary
    image: acme/button
  - key: icon-back
    image: acme/back
"##;

    #[test]
    fn test_load_yaml_theme() {
        let theme = ThemeLoader::load_from_string(CORPORATE_YAML, ThemeFormat::Yaml).unwrap();
        assert_eq!(theme.id, "corporate");
        assert_eq!(theme.group_tag.as_deref(), Some("acme"));
        assert_eq!(theme.color(ColorToken::Background).unwrap().to_hex(), "#101010");
        assert_eq!(theme.image("icon-back").map(ImageRef::as_str), Some("acme/back"));
        assert_eq!(theme.primary_font.as_ref().map(FontRef::as_str), Some("Inter-Regular"));
    }

    #[test]
    fn test_missing_colors_take_defaults() {
        let theme = ThemeLoader::load_from_string(CORPORATE_YAML, ThemeFormat::Yaml).unwrap();
        let defaults = ColorTokens::default();
        assert_eq!(theme.colors.accent, defaults.accent);
        assert_eq!(theme.colors.danger, defaults.danger);
    }

    #[test]
    fn test_load_toml_and_json() {
        let toml = r##"
            id = "ocean"
            [colors]
            primary = "#0077be"
        "##;
        let theme = ThemeLoader::load_from_string(toml, ThemeFormat::Toml).unwrap();
        assert_eq!(theme.display_name, "ocean");
        assert_eq!(theme.color(ColorToken::Primary).unwrap().to_hex(), "#0077be");

        let json = r##"{"id": "forest", "colors": {"text_secondary": "#2e7d32"}}"##;
        let theme = ThemeLoader::load_from_string(json, ThemeFormat::Json).unwrap();
        assert_eq!(theme.color(ColorToken::TextSecondary).unwrap().to_hex(), "#2e7d32");
    }

    #[test]
    fn test_validation_failures() {
        let empty_id = r#"{"id": " "}"#;
        assert!(matches!(
            ThemeLoader::load_from_string(empty_id, ThemeFormat::Json),
            Err(ThemeError::ValidationError(_))
        ));

        let bad_color = r#"{"id": "x", "colors": {"accent": "orange"}}"#;
        assert!(matches!(
            ThemeLoader::load_from_string(bad_color, ThemeFormat::Json),
            Err(ThemeError::InvalidColor { ref field, .. }) if field == "accent"
        ));

        let unknown_token = r##"{"id": "x", "colors": {"glow": "#ffffff"}}"##;
        assert!(ThemeLoader::load_from_string(unknown_token, ThemeFormat::Json).is_err());

        let none_token = r##"{"id": "x", "colors": {"none": "#ffffff"}}"##;
        assert!(ThemeLoader::load_from_string(none_token, ThemeFormat::Json).is_err());

        let duplicate_images = r#"{"id": "x", "images": [
            {"key": "logo", "image": "a"},
            {"key": "logo", "image": "b"}
        ]}"#;
        assert!(matches!(
            ThemeLoader::load_from_string(duplicate_images, ThemeFormat::Json),
            Err(ThemeError::ValidationError(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let theme = ThemeDefinition::dark()
            .with_group("night")
            .with_image("btn-primary", ImageRef::new("dark/button"));

        for name in ["dark.yaml", "dark.toml", "dark.json"] {
            let path = dir.path().join(name);
            ThemeLoader::save_to_file(&theme, &path).unwrap();
            let loaded = ThemeLoader::load_from_file(&path).unwrap();
            assert_eq!(loaded.id, "dark");
            assert_eq!(loaded.group_tag.as_deref(), Some("night"));
            assert_eq!(loaded.image("btn-primary"), theme.image("btn-primary"));
            assert_eq!(
                loaded.color(ColorToken::Background).map(|c| c.to_rgb8()),
                theme.color(ColorToken::Background).map(|c| c.to_rgb8())
            );
        }
    }

    #[test]
    fn test_missing_file_and_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ThemeLoader::load_from_file(&dir.path().join("absent.yaml")),
            Err(ThemeError::FileNotFound(_))
        ));

        let path = dir.path().join("theme.txt");
        fs::write(&path, "id: x").unwrap();
        assert!(matches!(
            ThemeLoader::load_from_file(&path),
            Err(ThemeError::InvalidFormat(_))
        ));
    }

    #[test]
    #[traced_test]
    fn test_directory_sorted_and_bad_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.yaml"), "id: beta\n").unwrap();
        fs::write(dir.path().join("a.json"), r#"{"id": "alpha"}"#).unwrap();
        fs::write(dir.path().join("c.toml"), "id = \"\"\n").unwrap();
        fs::write(dir.path().join("notes.md"), "# not a theme").unwrap();

        let themes = ThemeLoader::load_from_directory(dir.path()).unwrap();
        let ids: Vec<_> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["alpha", "beta"]);
        assert!(logs_contain("Failed to load theme from"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let themes = ThemeLoader::load_from_directory(&dir.path().join("nope")).unwrap();
        assert!(themes.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_dedup_keeps_first() {
        let themes = vec![
            ThemeDefinition::new("light", "First"),
            ThemeDefinition::dark(),
            ThemeDefinition::new("light", "Second"),
        ];
        let themes = ThemeLoader::dedup_by_id(themes);
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].display_name, "First");
        assert!(logs_contain("Duplicate theme id 'light' ignored"));
    }
}
