//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for capturing output in tests
//! - [`RunenvTheme`] for styling
//!
//! # Example
//!
//! ```
//! use runenv::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("RUNTIME_MODE = console");
//! assert_eq!(ui.messages(), &["RUNTIME_MODE = console".to_string()]);
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, RunenvTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Theme used to style messages.
    fn theme(&self) -> &RunenvTheme;
}
