//! Values held by the environment registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single environment value.
///
/// Ambient variables arrive as strings, platform probes produce integers
/// (process ids, memory sizes), and a few entries such as `argv` or the
/// debug backtrace are lists.
///
/// # Example
///
/// ```
/// use runenv::environment::EnvValue;
///
/// let tick = EnvValue::from(10);
/// assert_eq!(tick.as_int(), Some(10));
/// assert_eq!(tick.to_string(), "10");
///
/// let name = EnvValue::from("runenv");
/// assert_eq!(name.as_str(), Some("runenv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// Integer value (ids, sizes, tuning values).
    Int(i64),
    /// String value.
    Str(String),
    /// List of strings (argv, backtrace frames).
    List(Vec<String>),
}

impl EnvValue {
    /// Parse a command-line style value: integers stay integers, everything
    /// else is kept as a string.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map(Self::Int)
            .unwrap_or_else(|_| Self::Str(raw.to_string()))
    }

    /// The string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The list payload, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Check if this value can be written to a flat environment table.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_))
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
            Self::List(items) => write!(f, "{}", items.join("\n")),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for EnvValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for EnvValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for EnvValue {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<Vec<String>> for EnvValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_integer() {
        assert_eq!(EnvValue::parse("42"), EnvValue::Int(42));
        assert_eq!(EnvValue::parse(" -7 "), EnvValue::Int(-7));
    }

    #[test]
    fn parse_string_fallback() {
        assert_eq!(EnvValue::parse("9.9.9"), EnvValue::Str("9.9.9".into()));
        assert_eq!(EnvValue::parse(""), EnvValue::Str(String::new()));
    }

    #[test]
    fn accessors_match_variant() {
        let list = EnvValue::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.as_list().map(<[String]>::len), Some(2));
        assert_eq!(list.as_str(), None);
        assert_eq!(list.as_int(), None);
        assert!(!list.is_scalar());
        assert!(EnvValue::from("x").is_scalar());
        assert!(EnvValue::from(1).is_scalar());
    }

    #[test]
    fn display_joins_lists_by_line() {
        let list = EnvValue::from(vec!["frame 0".to_string(), "frame 1".to_string()]);
        assert_eq!(list.to_string(), "frame 0\nframe 1");
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&EnvValue::from(10)).unwrap();
        assert_eq!(json, "10");
        let json = serde_json::to_string(&EnvValue::from("web")).unwrap();
        assert_eq!(json, "\"web\"");
    }

    #[test]
    fn from_unsigned_widens() {
        assert_eq!(EnvValue::from(u32::MAX), EnvValue::Int(4_294_967_295));
    }
}
