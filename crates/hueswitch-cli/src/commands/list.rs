// List themes and show the active one

use super::{Command, CommandContext};
use crate::error::{CliError, CliResult};

/// List every theme, marking the active one
pub struct ListCommand;

impl Command for ListCommand {
    fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        let coordinator = &ctx.coordinator;
        if coordinator.theme_count() == 0 {
            return Err(CliError::NoThemes);
        }
        let active = coordinator.active_id();

        let mut lines = vec![ctx.style.header("Themes")];
        for theme in coordinator.themes() {
            let is_active = active.as_deref() == Some(theme.id.as_str());
            let mut line = format!(
                "{} {:<16} {}",
                ctx.style.marker(is_active),
                theme.id,
                theme.display_name
            );
            if let Some(tag) = &theme.group_tag {
                line.push_str(&format!(" [{}]", tag));
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

/// Print the id of the active theme
pub struct CurrentCommand;

impl Command for CurrentCommand {
    fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        ctx.coordinator
            .active()
            .map(|theme| format!("{} ({})", theme.id, theme.display_name))
            .ok_or(CliError::NoThemes)
    }
}
