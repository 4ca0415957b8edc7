//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::environment::Interface;

/// runenv - Inspect the merged runtime environment.
#[derive(Debug, Parser)]
#[command(name = "runenv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML file with custom defaults
    #[arg(long, global = true, env = "RUNENV_DEFAULTS")]
    pub defaults: Option<PathBuf>,

    /// Custom default as KEY=VALUE (repeatable, applied after --defaults)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Invocation interface (detected from the environment when omitted)
    #[arg(long, global = true, value_enum)]
    pub interface: Option<Interface>,

    /// RPC method carried on the request field
    #[arg(long, global = true)]
    pub rpc_method: Option<String>,

    /// Show where each value came from
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show every entry (default if no command specified)
    Show(ShowArgs),

    /// Show one entry
    Get(GetArgs),

    /// Explain where an entry came from without computing it
    Explain(ExplainArgs),

    /// Show the runtime mode
    Mode,

    /// Print resolved entries as shell assignments
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Leave lazily computed entries unresolved
    #[arg(long)]
    pub no_resolve: bool,
}

/// Arguments for the `get` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GetArgs {
    /// Entry name
    pub key: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `explain` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ExplainArgs {
    /// Entry name
    pub key: String,
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ExportArgs {
    /// Compute every lazy entry before exporting
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
