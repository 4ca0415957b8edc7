//! Mode command implementation.

use crate::environment::{keys, Environment};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Prints the detected runtime mode.
pub struct ModeCommand<'a> {
    env: &'a Environment,
}

impl<'a> ModeCommand<'a> {
    /// Create a new mode command.
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }
}

impl Command for ModeCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mode = self.env.mode();
        if ui.output_mode() == OutputMode::Verbose {
            let source = self
                .env
                .source_of(keys::RUNTIME_MODE)
                .map(|s| s.to_string())
                .unwrap_or_default();
            ui.message(&format!("{}  ({})", mode, source));
        } else {
            ui.message(mode.as_str());
        }
        Ok(CommandResult::success())
    }
}
