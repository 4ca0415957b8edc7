//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for building the registry and routing subcommands

use crate::cli::args::{Cli, Commands, ShowArgs};
use crate::environment::{Ambient, CustomDefaults, EnvValue, Environment, InvocationContext};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Exit code as a process status byte. Codes outside `0..=255` map to 1.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.exit_code).unwrap_or(1)
    }
}

/// Builds the registry from CLI flags and dispatches commands against it.
pub struct CommandDispatcher {
    ambient: Ambient,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandDispatcher {
    /// Create a dispatcher that reads the running process.
    pub fn new() -> Self {
        Self::with_ambient(Ambient::from_process())
    }

    /// Create a dispatcher over fixed ambient sources.
    pub fn with_ambient(ambient: Ambient) -> Self {
        Self { ambient }
    }

    /// Collect custom defaults from `--defaults` and `--set`.
    pub fn custom_defaults(cli: &Cli) -> Result<CustomDefaults> {
        let mut defaults = match &cli.defaults {
            Some(path) => CustomDefaults::load(path)?,
            None => CustomDefaults::new(),
        };
        for raw in &cli.set {
            defaults.apply_override(raw)?;
        }
        Ok(defaults)
    }

    /// Invocation context from `--interface`/`--rpc-method`, falling back to
    /// detection over the dispatcher's server table.
    pub fn invocation_context(&self, cli: &Cli) -> InvocationContext {
        let mut context = match cli.interface {
            Some(interface) => InvocationContext {
                interface,
                rpc_method: None,
            },
            None => InvocationContext::detect_with_env(|key| {
                self.ambient
                    .server
                    .get(key)
                    .and_then(EnvValue::as_str)
                    .map(str::to_string)
                    .ok_or(std::env::VarError::NotPresent)
            }),
        };
        if let Some(method) = &cli.rpc_method {
            context.rpc_method = Some(method.clone());
        }
        context
    }

    /// Build the registry for a CLI invocation.
    pub fn build_environment(&self, cli: &Cli) -> Result<Environment> {
        let defaults = Self::custom_defaults(cli)?;
        let context = self.invocation_context(cli);
        Ok(Environment::new(self.ambient.clone(), &context, &defaults))
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Show(args)) => {
                let env = self.build_environment(cli)?;
                super::show::ShowCommand::new(&env, args.clone()).execute(ui)
            }
            Some(Commands::Get(args)) => {
                let env = self.build_environment(cli)?;
                super::get::GetCommand::new(&env, args.clone()).execute(ui)
            }
            Some(Commands::Explain(args)) => {
                let env = self.build_environment(cli)?;
                super::explain::ExplainCommand::new(&env, args.clone()).execute(ui)
            }
            Some(Commands::Mode) => {
                let env = self.build_environment(cli)?;
                super::mode::ModeCommand::new(&env).execute(ui)
            }
            Some(Commands::Export(args)) => {
                let env = self.build_environment(cli)?;
                super::export::ExportCommand::new(&env, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                // Default to show with default args
                let env = self.build_environment(cli)?;
                super::show::ShowCommand::new(&env, ShowArgs::default()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Interface, KeyedLookup, RuntimeMode};
    use crate::ui::MockUI;
    use clap::Parser;

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::with_ambient(Ambient::empty().with_process("HOME", "/home/app"))
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn exit_status_does_not_truncate() {
        assert_eq!(CommandResult::success().exit_status(), 0);
        assert_eq!(CommandResult::failure(2).exit_status(), 2);
        assert_eq!(CommandResult::failure(256).exit_status(), 1);
        assert_eq!(CommandResult::failure(-1).exit_status(), 1);
    }

    #[test]
    fn set_flags_become_custom_defaults() {
        let cli = Cli::parse_from(["runenv", "--set", "RUNTIME_TICK_LINE=42"]);
        let env = dispatcher().build_environment(&cli).unwrap();
        assert_eq!(env.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(42)));
    }

    #[test]
    fn invalid_set_flag_is_an_error() {
        let cli = Cli::parse_from(["runenv", "--set", "RUNTIME_TICK_LINE"]);
        assert!(dispatcher().build_environment(&cli).is_err());
    }

    #[test]
    fn interface_flag_overrides_detection() {
        let cli = Cli::parse_from(["runenv", "--interface", "web", "--rpc-method", "FRPC_POST"]);
        let context = dispatcher().invocation_context(&cli);
        assert_eq!(context.interface, Interface::Web);
        let env = dispatcher().build_environment(&cli).unwrap();
        assert_eq!(env.mode(), RuntimeMode::Rpc);
    }

    #[test]
    fn detection_reads_the_injected_server_table() {
        let cli = Cli::parse_from(["runenv", "mode"]);

        let console = dispatcher();
        assert_eq!(console.invocation_context(&cli), InvocationContext::console());

        let gateway = CommandDispatcher::with_ambient(
            Ambient::empty()
                .with_server("GATEWAY_INTERFACE", "CGI/1.1")
                .with_server("QUERY_STRING", "FRPC_METHOD=FRPC_POST"),
        );
        let context = gateway.invocation_context(&cli);
        assert_eq!(context.interface, Interface::Web);
        assert_eq!(context.rpc_method.as_deref(), Some("FRPC_POST"));

        let mut ui = MockUI::new();
        gateway.dispatch(&cli, &mut ui).unwrap();
        assert_eq!(ui.messages(), &["rpc".to_string()]);
    }

    #[test]
    fn no_command_shows_everything() {
        let cli = Cli::parse_from(["runenv", "--interface", "console"]);
        let mut ui = MockUI::new();
        let result = dispatcher().dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("HOME=/home/app"));
        assert!(ui.has_message("RUNTIME_MODE=console"));
    }

    #[test]
    fn mode_command_prints_mode() {
        let cli = Cli::parse_from(["runenv", "--interface", "web", "mode"]);
        let mut ui = MockUI::new();
        dispatcher().dispatch(&cli, &mut ui).unwrap();
        assert_eq!(ui.messages(), &["web".to_string()]);
    }
}
