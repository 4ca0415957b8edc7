//! Visual theme and styling.

use console::Style;

/// runenv's visual theme.
#[derive(Debug, Clone)]
pub struct RunenvTheme {
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for keys in key-value displays (bold).
    pub key: Style,
    /// Style for values in key-value displays (normal).
    pub value: Style,
    /// Style for entries that have not been computed (dim italic).
    pub unresolved: Style,
}

impl Default for RunenvTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RunenvTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            key: Style::new().bold(),
            value: Style::new(),
            unresolved: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            key: Style::new(),
            value: Style::new(),
            unresolved: Style::new(),
        }
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a `KEY=value` line.
    pub fn format_entry(&self, key: &str, value: &str) -> String {
        format!("{}={}", self.key.apply_to(key), self.value.apply_to(value))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_warning() {
        let theme = RunenvTheme::plain();
        let msg = theme.format_warning("Caution");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Caution"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = RunenvTheme::plain();
        let msg = theme.format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }

    #[test]
    fn plain_theme_formats_entry_without_escapes() {
        let theme = RunenvTheme::plain();
        assert_eq!(theme.format_entry("PID", "42"), "PID=42");
    }

    #[test]
    fn default_theme_creates_without_panic() {
        let theme = RunenvTheme::default();
        let _ = theme.format_entry("KEY", "value");
    }
}
