// Flip between two themes through a toggle trigger

use hueswitch_themes::{ThemeToggleTrigger, TriggerConfig, TriggerMode};

use super::{describe_outcome, Command, CommandContext};
use crate::error::{CliError, CliResult};

pub struct ToggleCommand {
    mode: TriggerMode,
}

impl ToggleCommand {
    /// Toggle between `first` and `second`, or light and dark when omitted
    pub fn new(first: Option<String>, second: Option<String>) -> Self {
        let defaults = TriggerConfig::default();
        Self {
            mode: TriggerMode::Toggle {
                light_id: first.unwrap_or(defaults.light_theme_id),
                dark_id: second.unwrap_or(defaults.dark_theme_id),
            },
        }
    }
}

impl Command for ToggleCommand {
    fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        if let TriggerMode::Toggle { light_id, .. } = &self.mode {
            if !ctx.coordinator.has_theme(light_id) {
                return Err(CliError::UnknownTheme {
                    id: light_id.clone(),
                });
            }
        }
        let trigger = ThemeToggleTrigger::new(self.mode.clone(), ctx.coordinator.downgrade());
        Ok(describe_outcome(&ctx.style, &trigger.activate()))
    }
}
