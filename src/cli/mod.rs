//! Command-line interface for runenv.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ExplainArgs, ExportArgs, GetArgs, ShowArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
