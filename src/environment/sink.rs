//! Destinations for the merged environment.
//!
//! The registry never writes to shared state on its own. A bootstrap that
//! wants other collaborators to observe the merged view calls
//! [`Environment::export`](super::Environment::export) with a sink.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::error::Result;

/// Receives exported `key = value` pairs.
pub trait EnvSink {
    /// Publish one variable.
    fn publish(&mut self, key: &str, value: &str) -> Result<()>;
}

impl EnvSink for BTreeMap<String, String> {
    fn publish(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl EnvSink for HashMap<String, String> {
    fn publish(&mut self, key: &str, value: &str) -> Result<()> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Writes into the process environment of the current process.
///
/// Variables the platform cannot represent (empty names, names containing
/// `=`, or NUL bytes anywhere) are skipped with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvSink;

impl ProcessEnvSink {
    /// Check if a variable can be stored in the process environment.
    pub fn accepts(key: &str, value: &str) -> bool {
        !key.is_empty() && !key.contains('=') && !key.contains('\0') && !value.contains('\0')
    }
}

impl EnvSink for ProcessEnvSink {
    fn publish(&mut self, key: &str, value: &str) -> Result<()> {
        if !Self::accepts(key, value) {
            tracing::warn!("Skipping export of unrepresentable variable {:?}", key);
            return Ok(());
        }
        std::env::set_var(key, value);
        Ok(())
    }
}

/// Writes `KEY=value` lines, quoting values for POSIX shells.
///
/// Only keys that are valid shell names (`[A-Za-z_][A-Za-z0-9_]*`) are
/// written; any other key is skipped with a warning, so the output is safe
/// to `eval`.
#[derive(Debug)]
pub struct ShellSink<W: Write> {
    writer: W,
}

impl<W: Write> ShellSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Check if `key` is a valid shell variable name.
    pub fn accepts(key: &str) -> bool {
        let mut chars = key.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}

impl<W: Write> EnvSink for ShellSink<W> {
    fn publish(&mut self, key: &str, value: &str) -> Result<()> {
        if !Self::accepts(key) {
            tracing::warn!("Skipping export of non-shell variable name {:?}", key);
            return Ok(());
        }
        writeln!(self.writer, "{}={}", key, shell_quote(value))?;
        Ok(())
    }
}

/// Quote a value for a POSIX shell when it contains anything unsafe.
pub fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:,+@%".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
