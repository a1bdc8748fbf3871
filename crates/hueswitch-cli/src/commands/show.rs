// Render a theme's palette, fonts and images

use hueswitch_themes::{
    ApplierConfig, ColorToken, Rgba, StyleApplier, StyleSlot, ThemeDefinition, TuiStyleTarget,
};
use ratatui::style::Color;

use super::{Command, CommandContext};
use crate::error::{CliError, CliResult};

/// Show one theme; the active one when no id is given
pub struct ShowCommand {
    id: Option<String>,
}

impl ShowCommand {
    pub fn new(id: Option<String>) -> Self {
        Self { id }
    }

    /// Resolve `token` the way a terminal widget styled by `theme` would see it
    fn rendered_color(theme: &ThemeDefinition, token: ColorToken) -> Option<Rgba> {
        let target = TuiStyleTarget::new(token.as_str(), StyleSlot::Background);
        let cell = target.cell();
        let mut applier = StyleApplier::new(target, ApplierConfig::color(token));
        applier.apply(Some(theme));

        match cell.get().bg? {
            Color::Rgb(r, g, b) => Some(Rgba::rgb(
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
            )),
            _ => None,
        }
    }
}

impl Command for ShowCommand {
    fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        let theme = match &self.id {
            Some(id) => ctx
                .coordinator
                .find(id)
                .ok_or_else(|| CliError::UnknownTheme { id: id.clone() })?,
            None => ctx.coordinator.active().ok_or(CliError::NoThemes)?,
        };

        let style = &ctx.style;
        let mut lines = vec![style.header(&format!("{} ({})", theme.display_name, theme.id))];
        if let Some(tag) = &theme.group_tag {
            lines.push(format!("  group           {}", tag));
        }

        for token in ColorToken::ALL {
            if let Some(color) = Self::rendered_color(&theme, token) {
                lines.push(format!("  {:<15} {}", token.as_str(), style.swatch(color)));
            }
        }

        if let Some(font) = &theme.primary_font {
            lines.push(format!("  font            {}", font.as_str()));
        }
        if let Some(font) = &theme.alternate_font {
            lines.push(format!("  alternate font  {}", font.as_str()));
        }
        for entry in &theme.images {
            lines.push(format!("  image {:<9} {}", entry.key, entry.image.as_str()));
        }
        Ok(lines.join("\n"))
    }
}
