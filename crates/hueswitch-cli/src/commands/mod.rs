// Command handlers for the hue CLI

pub mod list;
pub mod show;
pub mod switch;
pub mod toggle;

pub use list::{CurrentCommand, ListCommand};
pub use show::ShowCommand;
pub use switch::{SwitchCommand, SwitchTarget};
pub use toggle::ToggleCommand;

use hueswitch_themes::{SwitchOutcome, ThemeCoordinator};

use crate::{error::CliResult, output::OutputStyle};

/// What every command runs against
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub coordinator: ThemeCoordinator,
    pub style: OutputStyle,
}

impl CommandContext {
    pub fn new(coordinator: ThemeCoordinator, style: OutputStyle) -> Self {
        Self { coordinator, style }
    }
}

/// Trait for command handlers
pub trait Command {
    /// Execute the command and return the text to print
    fn execute(&self, ctx: &CommandContext) -> CliResult<String>;
}

/// Render the result of a switch request
pub(crate) fn describe_outcome(style: &OutputStyle, outcome: &SwitchOutcome) -> String {
    match outcome {
        SwitchOutcome::Switched(theme) => {
            style.success(&format!("Switched to {} ({})", theme.display_name, theme.id))
        }
        SwitchOutcome::FellBack { requested, theme } => style.warning(&format!(
            "Theme '{}' not found; using {} ({})",
            requested, theme.display_name, theme.id
        )),
        SwitchOutcome::Unchanged => style.info("Theme unchanged"),
    }
}
