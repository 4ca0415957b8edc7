//! Show command implementation.
//!
//! The `runenv show` command prints every registry entry in merge order.

use serde::Serialize;

use crate::cli::args::ShowArgs;
use crate::environment::{
    Countable, EnvValue, Environment, ForwardCursor, LayerSource, SlotState,
};
use crate::error::{EnvError, Result};
use crate::ui::UserInterface;

use super::display::{entry_line, state_label, unresolved_line};
use super::dispatcher::{Command, CommandResult};

#[derive(Debug, Serialize)]
struct EntryJson<'a> {
    key: &'a str,
    value: Option<&'a EnvValue>,
    source: Option<LayerSource>,
    state: &'static str,
}

/// The show command implementation.
pub struct ShowCommand<'a> {
    env: &'a Environment,
    args: ShowArgs,
}

impl<'a> ShowCommand<'a> {
    /// Create a new show command.
    pub fn new(env: &'a Environment, args: ShowArgs) -> Self {
        Self { env, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ShowArgs {
        &self.args
    }

    /// Collect entries, resolving them through the shared cursor unless
    /// `--no-resolve` was given.
    fn entries(&self) -> Vec<(&'a str, SlotState<'a>)> {
        let env = self.env;
        let mut entries = Vec::with_capacity(env.len());

        if self.args.no_resolve {
            for key in env.keys() {
                if let Some(state) = env.peek(key) {
                    entries.push((key, state));
                }
            }
            return entries;
        }

        env.rewind();
        while env.valid() {
            if let Some(key) = env.key() {
                entries.push((key, SlotState::Resolved(env.current())));
            }
            env.next();
        }
        entries
    }
}

impl Command for ShowCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let entries = self.entries();

        if self.args.json {
            let rows: Vec<EntryJson<'_>> = entries
                .iter()
                .map(|(key, state)| EntryJson {
                    key,
                    value: match state {
                        SlotState::Resolved(value) => *value,
                        SlotState::Unresolved => None,
                    },
                    source: self.env.source_of(key),
                    state: state_label(*state),
                })
                .collect();
            let json =
                serde_json::to_string_pretty(&rows).map_err(|e| EnvError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let show_sources = ui.output_mode().shows_sources();
        for (key, state) in entries {
            let source = if show_sources {
                self.env.source_of(key)
            } else {
                None
            };
            let line = match state {
                SlotState::Resolved(value) => entry_line(ui.theme(), key, value, source),
                SlotState::Unresolved => unresolved_line(ui.theme(), key),
            };
            ui.message(&line);
        }

        Ok(CommandResult::success())
    }
}
