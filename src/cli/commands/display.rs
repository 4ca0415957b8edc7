//! Shared display helpers for registry entries.
//!
//! These helpers are used by `show`, `get`, and `explain` to render values
//! and slot states consistently.

use crate::environment::{EnvValue, LayerSource, SlotState};
use crate::ui::RunenvTheme;

/// Render a value on one line. Lists are summarized by length.
pub fn inline_value(value: Option<&EnvValue>) -> String {
    match value {
        Some(EnvValue::List(items)) => format!("[{} entries]", items.len()),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Short label for a slot state.
pub fn state_label(state: SlotState<'_>) -> &'static str {
    match state {
        SlotState::Unresolved => "unresolved",
        SlotState::Resolved(Some(_)) => "resolved",
        SlotState::Resolved(None) => "empty",
    }
}

/// Render one `KEY=value` line, optionally followed by its source.
pub fn entry_line(
    theme: &RunenvTheme,
    key: &str,
    value: Option<&EnvValue>,
    source: Option<LayerSource>,
) -> String {
    let line = theme.format_entry(key, &inline_value(value));
    match source {
        Some(source) => format!("{}  {}", line, theme.dim.apply_to(format!("({})", source))),
        None => line,
    }
}

/// Render an unresolved entry without computing it.
pub fn unresolved_line(theme: &RunenvTheme, key: &str) -> String {
    format!(
        "{}={}",
        theme.key.apply_to(key),
        theme.unresolved.apply_to("<unresolved>")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_value_summarizes_lists() {
        let list = EnvValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(inline_value(Some(&list)), "[2 entries]");
        assert_eq!(inline_value(Some(&EnvValue::from(7))), "7");
        assert_eq!(inline_value(None), "");
    }

    #[test]
    fn state_labels() {
        let value = EnvValue::from("x");
        assert_eq!(state_label(SlotState::Unresolved), "unresolved");
        assert_eq!(state_label(SlotState::Resolved(Some(&value))), "resolved");
        assert_eq!(state_label(SlotState::Resolved(None)), "empty");
    }

    #[test]
    fn entry_line_with_source() {
        let theme = RunenvTheme::plain();
        let value = EnvValue::from("web");
        assert_eq!(
            entry_line(&theme, "RUNTIME_MODE", Some(&value), Some(LayerSource::Defaults)),
            "RUNTIME_MODE=web  (defaults)"
        );
        assert_eq!(
            entry_line(&theme, "RUNTIME_MODE", Some(&value), None),
            "RUNTIME_MODE=web"
        );
    }

    #[test]
    fn unresolved_line_marks_value() {
        let theme = RunenvTheme::plain();
        assert_eq!(unresolved_line(&theme, "PID"), "PID=<unresolved>");
    }
}
