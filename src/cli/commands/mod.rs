//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which builds the
//! registry once per invocation from the global flags and routes the
//! subcommand to its implementation.

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod explain;
pub mod export;
pub mod get;
pub mod mode;
pub mod show;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
