//! Ordered environment layering.
//!
//! Each source of variables (server table, process environment, compiled-in
//! defaults, custom defaults) is an [`EnvLayer`]. An [`EnvLayerStack`] merges
//! them with source tracking so the registry can explain where a value
//! came from.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::value::EnvValue;

/// Where a layer's variables came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerSource {
    /// Server/request table (CGI variables, argv, request time).
    Server,
    /// Process environment variables.
    Process,
    /// Compiled-in defaults.
    Defaults,
    /// Custom defaults supplied by the bootstrap.
    Custom,
    /// Set by runtime mode detection during construction.
    Detected,
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Process => write!(f, "process"),
            Self::Defaults => write!(f, "defaults"),
            Self::Custom => write!(f, "custom"),
            Self::Detected => write!(f, "detected"),
        }
    }
}

/// A layer of environment variables, kept in insertion order.
///
/// A variable may be declared without a value; the registry computes such
/// variables lazily.
///
/// # Example
///
/// ```
/// use runenv::environment::{EnvLayer, EnvValue, LayerSource};
///
/// let mut layer = EnvLayer::new(LayerSource::Process);
/// layer.set("HOME", "/home/app");
/// layer.declare("PID");
///
/// assert_eq!(layer.get("HOME"), Some(&EnvValue::from("/home/app")));
/// assert!(layer.contains("PID"));
/// assert_eq!(layer.get("PID"), None);
/// ```
#[derive(Debug, Clone)]
pub struct EnvLayer {
    /// Source of this layer.
    pub source: LayerSource,
    vars: Vec<(String, Option<EnvValue>)>,
}

impl EnvLayer {
    /// Create a new empty layer.
    pub fn new(source: LayerSource) -> Self {
        Self {
            source,
            vars: Vec::new(),
        }
    }

    /// Build a layer from string pairs, as returned by `std::env::vars`.
    pub fn from_pairs<K, V>(source: LayerSource, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut layer = Self::new(source);
        for (key, value) in pairs {
            layer.set(key, EnvValue::Str(value.into()));
        }
        layer
    }

    /// Add or replace a variable. A replaced variable keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) {
        self.insert(key.into(), Some(value.into()));
    }

    /// Declare a variable whose value is computed later.
    pub fn declare(&mut self, key: impl Into<String>) {
        self.insert(key.into(), None);
    }

    fn insert(&mut self, key: String, value: Option<EnvValue>) {
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.vars.push((key, value)),
        }
    }

    /// Get a variable's value. Declared-only variables return `None`.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Check if this layer has a variable, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.iter().any(|(k, _)| k == key)
    }

    /// Iterate variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&EnvValue>)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Get the number of variables in this layer.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if this layer is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// One merged variable with the layer that supplied its final value.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedVar {
    pub key: String,
    pub value: Option<EnvValue>,
    pub source: LayerSource,
}

/// Manages layered environment variables.
///
/// The first layer pushed has lowest priority, the last has highest. Merged
/// output keeps each key at the position where it first appeared, carrying
/// the value of the highest layer that has it.
///
/// # Example
///
/// ```
/// use runenv::environment::{EnvLayer, EnvLayerStack, EnvValue, LayerSource};
///
/// let mut stack = EnvLayerStack::new();
///
/// let mut process = EnvLayer::new(LayerSource::Process);
/// process.set("RUNTIME_TICK_LINE", "3");
/// process.set("HOME", "/root");
/// stack.push(process);
///
/// let mut defaults = EnvLayer::new(LayerSource::Defaults);
/// defaults.set("RUNTIME_TICK_LINE", 10);
/// stack.push(defaults);
///
/// assert_eq!(stack.get("RUNTIME_TICK_LINE"), Some(&EnvValue::from(10)));
/// assert_eq!(stack.source_of("HOME"), Some(LayerSource::Process));
///
/// let merged = stack.resolve();
/// assert_eq!(merged[0].key, "RUNTIME_TICK_LINE");
/// assert_eq!(merged[0].source, LayerSource::Defaults);
/// ```
#[derive(Debug, Default)]
pub struct EnvLayerStack {
    /// Layers from lowest to highest priority.
    layers: Vec<EnvLayer>,
}

impl EnvLayerStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Add a layer. Later layers have higher priority.
    pub fn push(&mut self, layer: EnvLayer) {
        self.layers.push(layer);
    }

    /// Get the resolved value for a variable.
    ///
    /// A declared-only variable in a higher layer shadows values below it,
    /// so this returns `None` for it.
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains(key))
            .and_then(|layer| layer.get(key))
    }

    /// Get the source of a variable's value.
    pub fn source_of(&self, key: &str) -> Option<LayerSource> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains(key))
            .map(|layer| layer.source)
    }

    /// Merge all layers into one ordered list.
    pub fn resolve(&self) -> Vec<MergedVar> {
        let mut merged: Vec<MergedVar> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for layer in &self.layers {
            for (key, value) in layer.iter() {
                match positions.get(key) {
                    Some(&idx) => {
                        merged[idx].value = value.cloned();
                        merged[idx].source = layer.source;
                    }
                    None => {
                        positions.insert(key, merged.len());
                        merged.push(MergedVar {
                            key: key.to_string(),
                            value: value.cloned(),
                            source: layer.source,
                        });
                    }
                }
            }
        }
        merged
    }

    /// Get all layers for inspection.
    pub fn layers(&self) -> &[EnvLayer] {
        &self.layers
    }

    /// Get the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
