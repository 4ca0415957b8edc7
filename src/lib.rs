//! runenv - a read-only registry of runtime environment values.
//!
//! The registry merges the server table, process environment, compiled-in
//! defaults and custom defaults into one ordered mapping, detects the
//! runtime mode, and computes expensive entries on first read.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`environment`] - The registry, its layers and lazy resolution
//! - [`error`] - Error types and result aliases
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use runenv::{Ambient, CustomDefaults, Environment, InvocationContext, KeyedLookup};
//!
//! let ambient = Ambient::empty().with_process("HOME", "/home/app");
//! let env = Environment::new(ambient, &InvocationContext::console(), &CustomDefaults::new());
//!
//! assert_eq!(env.get("HOME").and_then(|v| v.as_str()), Some("/home/app"));
//! assert_eq!(env.get("RUNTIME_MODE").and_then(|v| v.as_str()), Some("console"));
//! ```

pub mod cli;
pub mod environment;
pub mod error;
pub mod ui;

pub use environment::{
    Ambient, Countable, CustomDefaults, EnvValue, Environment, ForwardCursor, InvocationContext,
    KeyedLookup, RuntimeMode,
};
pub use error::{EnvError, Result};
