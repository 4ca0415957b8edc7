//! Explain command implementation.
//!
//! The `runenv explain KEY` command reports where an entry came from and
//! whether it has been computed, without computing it.

use crate::cli::args::ExplainArgs;
use crate::environment::{keys, Environment, SlotState};
use crate::error::Result;
use crate::ui::UserInterface;

use super::display::{inline_value, state_label};
use super::dispatcher::{Command, CommandResult};

/// The explain command implementation.
pub struct ExplainCommand<'a> {
    env: &'a Environment,
    args: ExplainArgs,
}

impl<'a> ExplainCommand<'a> {
    /// Create a new explain command.
    pub fn new(env: &'a Environment, args: ExplainArgs) -> Self {
        Self { env, args }
    }
}

impl Command for ExplainCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let key = self.args.key.as_str();
        let (Some(state), Some(source)) = (self.env.peek(key), self.env.source_of(key)) else {
            ui.error(&format!("Unknown entry '{}'", key));
            return Ok(CommandResult::failure(1));
        };

        let theme = ui.theme().clone();
        ui.message(&format!("{}", theme.key.apply_to(key)));
        ui.message(&format!("  source:       {}", source));
        ui.message(&format!("  state:        {}", state_label(state)));
        if let SlotState::Resolved(Some(value)) = state {
            ui.message(&format!("  value:        {}", inline_value(Some(value))));
        }
        let customizable = if keys::is_customizable(key) {
            "yes"
        } else {
            "no"
        };
        ui.message(&format!("  customizable: {}", customizable));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Ambient, CustomDefaults, InvocationContext};
    use crate::ui::MockUI;

    fn explain(env: &Environment, key: &str) -> (CommandResult, MockUI) {
        let cmd = ExplainCommand::new(
            env,
            ExplainArgs {
                key: key.to_string(),
            },
        );
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    fn environment(defaults: &CustomDefaults) -> Environment {
        Environment::new(Ambient::empty(), &InvocationContext::web(), defaults)
    }

    #[test]
    fn explain_does_not_resolve() {
        let env = environment(&CustomDefaults::new());
        let (result, ui) = explain(&env, "PID");
        assert!(result.success);
        assert!(ui.has_message("source:       defaults"));
        assert!(ui.has_message("state:        unresolved"));
        assert!(!ui.has_message("value:"));
        assert_eq!(env.peek("PID"), Some(SlotState::Unresolved));
    }

    #[test]
    fn explain_custom_value() {
        let mut defaults = CustomDefaults::new();
        defaults.set("RUNTIME_TICK_LINE", 3);
        let env = environment(&defaults);
        let (_, ui) = explain(&env, "RUNTIME_TICK_LINE");
        assert!(ui.has_message("source:       custom"));
        assert!(ui.has_message("value:        3"));
        assert!(ui.has_message("customizable: yes"));
    }

    #[test]
    fn explain_unknown_key_fails() {
        let env = environment(&CustomDefaults::new());
        let (result, ui) = explain(&env, "NOT_A_KEY");
        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors().len(), 1);
    }
}
