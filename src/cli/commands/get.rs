//! Get command implementation.
//!
//! The `runenv get KEY` command prints a single entry, computing it if
//! needed.

use crate::cli::args::GetArgs;
use crate::environment::{Environment, KeyedLookup};
use crate::error::{EnvError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The get command implementation.
pub struct GetCommand<'a> {
    env: &'a Environment,
    args: GetArgs,
}

impl<'a> GetCommand<'a> {
    /// Create a new get command.
    pub fn new(env: &'a Environment, args: GetArgs) -> Self {
        Self { env, args }
    }
}

impl Command for GetCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let key = self.args.key.as_str();
        if !self.env.contains(key) {
            ui.error(&format!("Unknown entry '{}'", key));
            return Ok(CommandResult::failure(1));
        }

        let value = self.env.get(key);

        if self.args.json {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "key": key,
                "value": value,
                "source": self.env.source_of(key),
            }))
            .map_err(|e| EnvError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        match value {
            Some(value) => ui.message(&value.to_string()),
            None => ui.warning(&format!("'{}' has no value", key)),
        }

        Ok(CommandResult::success())
    }
}
