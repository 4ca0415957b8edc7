//! Export command implementation.
//!
//! The `runenv export` command prints resolved entries as shell
//! assignments, suitable for `eval "$(runenv export)"`.

use crate::cli::args::ExportArgs;
use crate::environment::{Environment, ShellSink};
use crate::error::{EnvError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The export command implementation.
pub struct ExportCommand<'a> {
    env: &'a Environment,
    args: ExportArgs,
}

impl<'a> ExportCommand<'a> {
    /// Create a new export command.
    pub fn new(env: &'a Environment, args: ExportArgs) -> Self {
        Self { env, args }
    }
}

impl Command for ExportCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.all {
            for (key, value) in self.env.iter() {
                if value.is_none() {
                    tracing::debug!("{} resolved to nothing, not exported", key);
                }
            }
        }

        let mut sink = ShellSink::new(Vec::new());
        let count = self.env.export(&mut sink)?;
        let output =
            String::from_utf8(sink.into_inner()).map_err(|e| EnvError::Other(e.into()))?;
        for line in output.lines() {
            ui.message(line);
        }
        tracing::debug!("Printed {} assignments", count);

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Ambient, CustomDefaults, InvocationContext};
    use crate::ui::MockUI;

    fn environment() -> Environment {
        Environment::new(
            Ambient::empty().with_process("GREETING", "hello world"),
            &InvocationContext::console(),
            &CustomDefaults::new(),
        )
    }

    #[test]
    fn exports_resolved_entries_only() {
        let env = environment();
        let mut ui = MockUI::new();
        ExportCommand::new(&env, ExportArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("GREETING='hello world'"));
        assert!(ui.has_message("RUNTIME_MODE=console"));
        assert!(!ui.has_message("PID="));
    }

    #[test]
    fn export_all_resolves_first() {
        let env = environment();
        let mut ui = MockUI::new();
        ExportCommand::new(&env, ExportArgs { all: true })
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message(&format!("PID={}", std::process::id())));
        assert!(!ui.has_message("RUNTIME_DEBUG_BACKTRACE="));
    }
}
