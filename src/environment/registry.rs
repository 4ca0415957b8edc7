//! The environment registry.
//!
//! Merges the ambient layers, compiled-in defaults and custom defaults into
//! one ordered, read-only mapping. Expensive entries start out unresolved
//! and are computed by a [`LazyResolver`] on first read, then cached.

use std::cell::{Cell, OnceCell};
use std::collections::HashMap;
use std::fmt;

use super::ambient::Ambient;
use super::contracts::{Countable, ForwardCursor, KeyedLookup};
use super::defaults::{compiled_defaults, CustomDefaults};
use super::keys;
use super::layer::{EnvLayer, EnvLayerStack, LayerSource};
use super::mode::{InvocationContext, RuntimeMode};
use super::probe::{LazyResolver, SystemProbe};
use super::sink::EnvSink;
use super::value::EnvValue;
use crate::error::{EnvError, Result};

/// Resolution state of one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState<'a> {
    /// Not computed yet.
    Unresolved,
    /// Computed (or supplied at construction). `None` means the computation
    /// produced nothing; it is not retried.
    Resolved(Option<&'a EnvValue>),
}

#[derive(Debug)]
struct Slot {
    key: String,
    source: LayerSource,
    value: OnceCell<Option<EnvValue>>,
}

impl Slot {
    fn state(&self) -> SlotState<'_> {
        match self.value.get() {
            Some(value) => SlotState::Resolved(value.as_ref()),
            None => SlotState::Unresolved,
        }
    }
}

/// Read-only view of the entries that already have values.
///
/// Handed to resolvers so they can derive values from ambient entries
/// without triggering further resolution.
#[derive(Clone, Copy)]
pub struct ResolvedView<'a> {
    env: &'a Environment,
}

impl<'a> ResolvedView<'a> {
    /// Value of `key` if it is present and already resolved.
    pub fn value(&self, key: &str) -> Option<&'a EnvValue> {
        match self.env.peek(key)? {
            SlotState::Resolved(value) => value,
            SlotState::Unresolved => None,
        }
    }

    /// Value the ambient layers supplied for `key`, including values
    /// replaced by a lazily computed declaration.
    pub fn ambient(&self, key: &str) -> Option<&'a EnvValue> {
        self.env.shadowed.get(key).or_else(|| self.value(key))
    }
}

/// Read-only runtime environment.
///
/// Build one per process (or per logical execution context) and pass it
/// down by reference. The registry caches lazily computed values in place,
/// so it is not `Sync`; each thread needs its own instance.
///
/// # Example
///
/// ```
/// use runenv::environment::{
///     Ambient, Countable, CustomDefaults, EnvValue, Environment, InvocationContext,
///     KeyedLookup, RuntimeMode,
/// };
///
/// let mut defaults = CustomDefaults::new();
/// defaults.set("RUNTIME_TICK_LINE", 42);
///
/// let env = Environment::new(Ambient::empty(), &InvocationContext::console(), &defaults);
///
/// assert_eq!(env.mode(), RuntimeMode::Console);
/// assert_eq!(env.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(42)));
/// assert_eq!(env.get("RUNTIME_MODE"), Some(&EnvValue::from("console")));
/// assert!(env.get("NOT_A_KEY").is_none());
/// assert!(env.set("RUNTIME_TICK_LINE", EnvValue::from(1)).is_err());
/// assert_eq!(env.len(), 25);
/// ```
pub struct Environment {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
    cursor: Cell<usize>,
    mode: RuntimeMode,
    resolver: Box<dyn LazyResolver>,
    shadowed: HashMap<String, EnvValue>,
}

impl Environment {
    /// Build the registry from explicit sources.
    ///
    /// Merge precedence, lowest to highest: server table, process
    /// environment, compiled-in defaults, custom defaults. The runtime mode
    /// is detected from `context` and the server's `REQUEST_METHOD`.
    pub fn new(ambient: Ambient, context: &InvocationContext, defaults: &CustomDefaults) -> Self {
        let request_method = ambient
            .server
            .get(keys::REQUEST_METHOD)
            .and_then(EnvValue::as_str);
        let mode = RuntimeMode::detect(context, request_method);

        // Ambient values of lazily declared keys stay visible to resolvers.
        let compiled = compiled_defaults();
        let mut shadowed = HashMap::new();
        for (key, value) in compiled.iter() {
            if value.is_some() {
                continue;
            }
            let captured = ambient
                .process
                .get(key)
                .or_else(|| ambient.server.get(key));
            if let Some(captured) = captured {
                shadowed.insert(key.to_string(), captured.clone());
            }
        }

        let mut stack = EnvLayerStack::new();
        stack.push(ambient.server);
        stack.push(ambient.process);
        stack.push(compiled);
        stack.push(defaults.to_layer());
        if mode != RuntimeMode::default() {
            let mut detected = EnvLayer::new(LayerSource::Detected);
            detected.set(keys::RUNTIME_MODE, mode.value());
            stack.push(detected);
        }

        let mut slots = Vec::new();
        let mut index = HashMap::new();
        for var in stack.resolve() {
            let value = OnceCell::new();
            if let Some(v) = var.value {
                // A fresh cell always accepts its first value.
                let _ = value.set(Some(v));
            }
            index.insert(var.key.clone(), slots.len());
            slots.push(Slot {
                key: var.key,
                source: var.source,
                value,
            });
        }

        tracing::debug!(
            "Environment registry built: {} entries, mode {}",
            slots.len(),
            mode
        );

        Self {
            slots,
            index,
            cursor: Cell::new(0),
            mode,
            resolver: Box::new(SystemProbe),
            shadowed,
        }
    }

    /// Build the registry from the running process.
    pub fn from_process(defaults: &CustomDefaults) -> Self {
        Self::new(Ambient::from_process(), &InvocationContext::detect(), defaults)
    }

    /// Replace the resolver used for unresolved entries.
    ///
    /// Entries that are already resolved keep their values.
    pub fn with_resolver(mut self, resolver: impl LazyResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// The runtime mode detected at construction.
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Resolution state of `key` without computing anything.
    pub fn peek(&self, key: &str) -> Option<SlotState<'_>> {
        self.index.get(key).map(|&idx| self.slots[idx].state())
    }

    /// The layer that supplied `key`.
    pub fn source_of(&self, key: &str) -> Option<LayerSource> {
        self.index.get(key).map(|&idx| self.slots[idx].source)
    }

    /// View of already resolved entries, as seen by resolvers.
    pub fn resolved_view(&self) -> ResolvedView<'_> {
        ResolvedView { env: self }
    }

    /// Keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.key.as_str())
    }

    /// Iterate `(key, value)` pairs in order, resolving lazily.
    ///
    /// Independent of the shared cursor.
    pub fn iter(&self) -> Iter<'_> {
        Iter { env: self, pos: 0 }
    }

    /// Resolve every entry and return an owned, ordered copy.
    pub fn snapshot(&self) -> Vec<(String, Option<EnvValue>)> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.cloned()))
            .collect()
    }

    /// Publish every resolved scalar entry to `sink`.
    ///
    /// Unresolved entries stay unresolved and lists are skipped. Returns the
    /// number of entries handed to the sink; a sink may still skip some.
    pub fn export(&self, sink: &mut dyn EnvSink) -> Result<usize> {
        let mut published = 0;
        for slot in &self.slots {
            if let SlotState::Resolved(Some(value)) = slot.state() {
                if value.is_scalar() {
                    sink.publish(&slot.key, &value.to_string())?;
                    published += 1;
                }
            }
        }
        tracing::debug!("Exported {} environment entries", published);
        Ok(published)
    }

    fn resolve_at(&self, idx: usize) -> Option<&EnvValue> {
        let slot = self.slots.get(idx)?;
        slot.value
            .get_or_init(|| {
                tracing::trace!("Resolving environment entry {}", slot.key);
                self.resolver.resolve(&slot.key, &self.resolved_view())
            })
            .as_ref()
    }
}

impl KeyedLookup for Environment {
    fn get(&self, key: &str) -> Option<&EnvValue> {
        let idx = *self.index.get(key)?;
        self.resolve_at(idx)
    }

    fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn set(&self, key: &str, _value: EnvValue) -> Result<()> {
        Err(EnvError::ImmutableWrite {
            key: key.to_string(),
        })
    }

    fn unset(&self, key: &str) -> Result<()> {
        Err(EnvError::ImmutableWrite {
            key: key.to_string(),
        })
    }
}

impl Countable for Environment {
    fn len(&self) -> usize {
        self.slots.len()
    }
}

impl ForwardCursor for Environment {
    fn rewind(&self) {
        self.cursor.set(0);
    }

    fn current(&self) -> Option<&EnvValue> {
        self.resolve_at(self.cursor.get())
    }

    fn key(&self) -> Option<&str> {
        self.slots.get(self.cursor.get()).map(|slot| slot.key.as_str())
    }

    fn next(&self) {
        let pos = self.cursor.get();
        if pos < self.slots.len() {
            self.cursor.set(pos + 1);
        }
    }

    fn valid(&self) -> bool {
        self.cursor.get() < self.slots.len()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("mode", &self.mode)
            .field("entries", &self.slots.len())
            .field("cursor", &self.cursor.get())
            .finish_non_exhaustive()
    }
}

/// Borrowing iterator over registry entries.
pub struct Iter<'a> {
    env: &'a Environment,
    pos: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, Option<&'a EnvValue>);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.env.slots.get(self.pos)?;
        let value = self.env.resolve_at(self.pos);
        self.pos += 1;
        Some((slot.key.as_str(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.env.slots.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Environment {
    type Item = (&'a str, Option<&'a EnvValue>);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
