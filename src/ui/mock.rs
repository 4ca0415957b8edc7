//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all output
//! for later assertion.

use super::{OutputMode, RunenvTheme, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug)]
pub struct MockUI {
    mode: OutputMode,
    theme: RunenvTheme,
    messages: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl Default for MockUI {
    fn default() -> Self {
        Self::new()
    }
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::with_mode(OutputMode::Normal)
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: RunenvTheme::plain(),
            messages: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Captured warnings.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Captured errors.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Check if any message contains `needle`.
    pub fn has_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn theme(&self) -> &RunenvTheme {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_by_channel() {
        let mut ui = MockUI::new();
        ui.message("m");
        ui.warning("w");
        ui.error("e");
        assert_eq!(ui.messages(), &["m".to_string()]);
        assert_eq!(ui.warnings(), &["w".to_string()]);
        assert_eq!(ui.errors(), &["e".to_string()]);
    }

    #[test]
    fn has_message_matches_substring() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        ui.message("RUNTIME_MODE=console");
        assert!(ui.has_message("console"));
        assert!(!ui.has_message("web"));
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
