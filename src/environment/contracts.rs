//! Container contracts implemented by the registry.
//!
//! The registry is keyed, countable, and cursor-iterable at the same time.
//! Each capability is its own trait so callers can depend on only the part
//! they need.

use super::value::EnvValue;
use crate::error::Result;

/// Keyed access with existence checks. Writes are part of the contract so
/// that read-only containers can reject them explicitly.
pub trait KeyedLookup {
    /// Get the value for `key`, computing it on first access if needed.
    ///
    /// Absent keys and keys that resolve to nothing return `None`.
    fn get(&self, key: &str) -> Option<&EnvValue>;

    /// Check if `key` exists, whether or not its value is resolved yet.
    fn contains(&self, key: &str) -> bool;

    /// Set `key` to `value`.
    fn set(&self, key: &str, value: EnvValue) -> Result<()>;

    /// Remove `key`.
    fn unset(&self, key: &str) -> Result<()>;
}

/// Size query.
pub trait Countable {
    /// Number of keys.
    fn len(&self) -> usize;

    /// Check if there are no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A restartable forward cursor over `(key, value)` pairs.
///
/// There is one cursor per container; interleaved traversals share it.
pub trait ForwardCursor {
    /// Move the cursor to the first entry.
    fn rewind(&self);

    /// Value at the cursor, computing it on first access if needed.
    fn current(&self) -> Option<&EnvValue>;

    /// Key at the cursor.
    fn key(&self) -> Option<&str>;

    /// Advance the cursor.
    fn next(&self);

    /// Check if the cursor references an entry.
    fn valid(&self) -> bool;
}
