//! Compiled-in defaults and bootstrap-supplied custom defaults.
//!
//! Custom defaults are the only way to tune the registry. They are collected
//! by the bootstrap before the registry is built and passed to
//! [`Environment::new`](super::Environment::new). Keys outside the
//! allow-list are dropped without error.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use super::keys::{self, is_customizable};
use super::layer::{EnvLayer, LayerSource};
use super::mode::RuntimeMode;
use super::value::EnvValue;
use crate::error::{EnvError, Result};

/// Build the compiled-in defaults layer.
///
/// Declared-only entries are computed lazily by the registry. The order here
/// is the order in which these keys appear when not already supplied by an
/// ambient layer.
pub fn compiled_defaults() -> EnvLayer {
    let mut layer = EnvLayer::new(LayerSource::Defaults);
    layer.set(keys::FRAMEWORK_NAME, env!("CARGO_PKG_NAME"));
    layer.set(keys::FRAMEWORK_PATH, env!("CARGO_MANIFEST_DIR"));
    layer.set(keys::FRAMEWORK_VERSION, env!("CARGO_PKG_VERSION"));
    layer.set(keys::PHP_VERSION, keys::TOOLCHAIN_VERSION);
    layer.set(keys::PHP_VERSION_ID, keys::version_id(keys::TOOLCHAIN_VERSION));
    layer.set(keys::PHP_OS, std::env::consts::OS);
    for key in [
        keys::PHP_PATH,
        keys::PID,
        keys::GID,
        keys::UID,
        keys::USER,
        keys::SYSTEM_NAME,
        keys::HOSTNAME,
        keys::SYSTEM_VERSION_NAME,
        keys::SYSTEM_VERSION_INFO,
        keys::MACHINE_TYPE,
    ] {
        layer.declare(key);
    }
    layer.set(keys::RUNTIME_TICK_LINE, keys::DEFAULT_TICK_LINE);
    for key in [
        keys::RUNTIME_MEMORY_SIZE,
        keys::RUNTIME_DEBUG_BACKTRACE,
        keys::SCRIPT_DIR,
        keys::SCRIPT_FILENAME,
    ] {
        layer.declare(key);
    }
    layer.set(keys::RUNTIME_MODE, RuntimeMode::Web.value());
    layer.set(keys::RUNTIME_MODE_CONSOLE, RuntimeMode::Console.value());
    layer.set(keys::RUNTIME_MODE_WEB, RuntimeMode::Web.value());
    layer.set(keys::RUNTIME_MODE_RPC, RuntimeMode::Rpc.value());
    layer
}

/// Overrides for allow-listed registry keys.
///
/// # Example
///
/// ```
/// use runenv::environment::{CustomDefaults, EnvValue};
///
/// let mut defaults = CustomDefaults::new();
/// defaults.extend([("RUNTIME_TICK_LINE", 42), ("PHP_VERSION", 9)]);
///
/// assert_eq!(defaults.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(42)));
/// assert_eq!(defaults.get("PHP_VERSION"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomDefaults {
    values: Vec<(String, EnvValue)>,
}

impl CustomDefaults {
    /// Create an empty set of custom defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an override if its key is allow-listed, replacing any prior
    /// value. Other keys are ignored.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        let key = key.into();
        if !is_customizable(&key) {
            tracing::debug!("Ignoring custom default for non-customizable key {}", key);
            return;
        }
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((key, value)),
        }
    }

    /// Store several overrides, applying [`set`](Self::set) to each.
    pub fn extend<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<EnvValue>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Apply a `KEY=VALUE` override from the command line.
    ///
    /// Integer values are stored as integers.
    pub fn apply_override(&mut self, raw: &str) -> Result<()> {
        let (key, value) = raw
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| EnvError::InvalidOverride {
                input: raw.to_string(),
            })?;
        self.set(key.trim(), EnvValue::parse(value));
        Ok(())
    }

    /// Load overrides from a YAML mapping of key to scalar.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EnvError::DefaultsNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| EnvError::DefaultsParse {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let document: Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        let mapping = match document {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(mapping) => mapping,
            _ => return Err("expected a mapping of key to value".to_string()),
        };

        let mut defaults = Self::new();
        for (key, value) in mapping {
            let key = key
                .as_str()
                .ok_or_else(|| format!("non-string key: {:?}", key))?
                .to_string();
            let value = match value {
                Value::Number(n) => match n.as_i64() {
                    Some(i) => EnvValue::Int(i),
                    None => EnvValue::Str(n.to_string()),
                },
                Value::String(s) => EnvValue::Str(s),
                Value::Bool(b) => EnvValue::Str(b.to_string()),
                other => return Err(format!("value for '{}' is not a scalar: {:?}", key, other)),
            };
            defaults.set(key, value);
        }
        Ok(defaults)
    }

    /// Get an override.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of stored overrides.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no overrides are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The overrides as the highest-priority merge layer.
    pub fn to_layer(&self) -> EnvLayer {
        let mut layer = EnvLayer::new(LayerSource::Custom);
        for (key, value) in &self.values {
            layer.set(key.clone(), value.clone());
        }
        layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn compiled_defaults_order_and_values() {
        let layer = compiled_defaults();
        let keys: Vec<&str> = layer.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"FRAMEWORK_NAME"));
        assert_eq!(keys.last(), Some(&"RUNTIME_MODE_RPC"));
        assert_eq!(keys.len(), 25);
        assert_eq!(layer.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(10)));
        assert_eq!(layer.get("RUNTIME_MODE"), Some(&EnvValue::from("web")));
        assert!(layer.contains("PID"));
        assert_eq!(layer.get("PID"), None);
    }

    #[test]
    fn set_ignores_keys_outside_allow_list() {
        let mut defaults = CustomDefaults::new();
        defaults.set("PHP_VERSION", "9.9.9");
        defaults.set("RUNTIME_MODE", "rpc");
        assert!(defaults.is_empty());
    }

    #[test]
    fn set_overwrites_prior_value() {
        let mut defaults = CustomDefaults::new();
        defaults.set("RUNTIME_TICK_LINE", 1);
        defaults.set("RUNTIME_TICK_LINE", 2);
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(2)));
    }

    #[test]
    fn apply_override_parses_integer() {
        let mut defaults = CustomDefaults::new();
        defaults.apply_override("RUNTIME_TICK_LINE=42").unwrap();
        assert_eq!(defaults.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(42)));
    }

    #[test]
    fn apply_override_rejects_missing_equals() {
        let mut defaults = CustomDefaults::new();
        let err = defaults.apply_override("RUNTIME_TICK_LINE").unwrap_err();
        assert!(matches!(err, EnvError::InvalidOverride { .. }));
        let err = defaults.apply_override("=5").unwrap_err();
        assert!(matches!(err, EnvError::InvalidOverride { .. }));
    }

    #[test]
    fn apply_override_drops_unknown_key_silently() {
        let mut defaults = CustomDefaults::new();
        defaults.apply_override("PHP_VERSION=9.9.9").unwrap();
        assert!(defaults.is_empty());
    }

    #[test]
    fn load_reads_yaml_mapping() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "RUNTIME_TICK_LINE: 25\nPHP_VERSION: \"9.9.9\"").unwrap();

        let defaults = CustomDefaults::load(file.path()).unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(25)));
    }

    #[test]
    fn load_empty_file_is_empty() {
        let file = NamedTempFile::new().unwrap();
        let defaults = CustomDefaults::load(file.path()).unwrap();
        assert!(defaults.is_empty());
    }

    #[test]
    fn load_missing_file_errors() {
        let err = CustomDefaults::load(Path::new("/nonexistent/runenv.yml")).unwrap_err();
        assert!(matches!(err, EnvError::DefaultsNotFound { .. }));
    }

    #[test]
    fn load_rejects_nested_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "RUNTIME_TICK_LINE:\n  nested: 1").unwrap();

        let err = CustomDefaults::load(file.path()).unwrap_err();
        assert!(matches!(err, EnvError::DefaultsParse { .. }));
    }

    #[test]
    fn load_rejects_sequence_document() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "- RUNTIME_TICK_LINE").unwrap();

        let err = CustomDefaults::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("expected a mapping"));
    }

    #[test]
    fn to_layer_is_custom_source() {
        let mut defaults = CustomDefaults::new();
        defaults.set("RUNTIME_TICK_LINE", 7);
        let layer = defaults.to_layer();
        assert_eq!(layer.source, LayerSource::Custom);
        assert_eq!(layer.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(7)));
    }
}
