//! Runtime environment registry.
//!
//! Merges ambient variables and defaults into one read-only, ordered
//! mapping. The merge order, lowest to highest priority, is:
//!
//! 1. Server table (request and invocation metadata)
//! 2. Process environment variables
//! 3. Compiled-in defaults
//! 4. Custom defaults from the bootstrap (allow-listed keys only)
//!
//! Expensive entries (process ids, uname strings, memory usage, backtrace)
//! are computed on first read and cached.

pub mod ambient;
pub mod contracts;
pub mod defaults;
pub mod keys;
pub mod layer;
pub mod mode;
pub mod probe;
pub mod registry;
pub mod sink;
pub mod value;

pub use ambient::Ambient;
pub use contracts::{Countable, ForwardCursor, KeyedLookup};
pub use defaults::{compiled_defaults, CustomDefaults};
pub use layer::{EnvLayer, EnvLayerStack, LayerSource, MergedVar};
pub use mode::{Interface, InvocationContext, RuntimeMode};
pub use probe::{LazyResolver, SystemProbe, Uname};
pub use registry::{Environment, Iter, ResolvedView, SlotState};
pub use sink::{EnvSink, ProcessEnvSink, ShellSink};
pub use value::EnvValue;
