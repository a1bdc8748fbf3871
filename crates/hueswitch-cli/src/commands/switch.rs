// Switch the active theme

use super::{describe_outcome, Command, CommandContext};
use crate::error::{CliError, CliResult};

/// Which theme a switch request aims at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchTarget {
    Id { id: String, silent: bool },
    Next,
    Previous,
    Group(String),
}

pub struct SwitchCommand {
    target: SwitchTarget,
}

impl SwitchCommand {
    pub fn new(target: SwitchTarget) -> Self {
        Self { target }
    }
}

impl Command for SwitchCommand {
    fn execute(&self, ctx: &CommandContext) -> CliResult<String> {
        let coordinator = &ctx.coordinator;
        if coordinator.theme_count() == 0 {
            return Err(CliError::NoThemes);
        }

        let outcome = match &self.target {
            SwitchTarget::Id { id, silent } => coordinator.switch_by_id(id, *silent),
            SwitchTarget::Next => coordinator.next(),
            SwitchTarget::Previous => coordinator.previous(),
            SwitchTarget::Group(tag) => {
                let outcome = coordinator.switch_by_group_tag(tag);
                if outcome.is_unchanged() {
                    return Err(CliError::InvalidArgument {
                        message: format!("no theme has group tag '{}'", tag),
                    });
                }
                outcome
            }
        };
        Ok(describe_outcome(&ctx.style, &outcome))
    }
}
