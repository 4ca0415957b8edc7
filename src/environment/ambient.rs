//! Ambient variable capture.
//!
//! The two lowest merge layers: the server table (request and invocation
//! metadata) and the process environment.

use chrono::Utc;

use super::layer::{EnvLayer, LayerSource};
use super::value::EnvValue;

/// Ambient variables visible to the process at construction time.
///
/// # Example
///
/// ```
/// use runenv::environment::{Ambient, EnvValue};
///
/// let ambient = Ambient::empty()
///     .with_server("REQUEST_METHOD", "GET")
///     .with_process("HOME", "/srv/app");
///
/// assert_eq!(ambient.server.get("REQUEST_METHOD"), Some(&EnvValue::from("GET")));
/// assert_eq!(ambient.process.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Ambient {
    /// Server/request table.
    pub server: EnvLayer,
    /// Process environment variables.
    pub process: EnvLayer,
}

impl Ambient {
    /// Ambient sources with no variables.
    pub fn empty() -> Self {
        Self {
            server: EnvLayer::new(LayerSource::Server),
            process: EnvLayer::new(LayerSource::Process),
        }
    }

    /// Capture the current process.
    ///
    /// The server table carries the process variables plus invocation
    /// metadata (`PHP_SELF`, `SCRIPT_NAME`, `argv`, `argc`, `REQUEST_TIME`).
    /// Non-UTF-8 names and values are converted lossily.
    pub fn from_process() -> Self {
        let vars: Vec<(String, String)> = std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();
        let argv: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        let mut server = EnvLayer::from_pairs(LayerSource::Server, vars.iter().cloned());
        if let Some(program) = argv.first() {
            server.set("PHP_SELF", program.as_str());
            server.set("SCRIPT_NAME", program.as_str());
        }
        server.set("argc", EnvValue::Int(argv.len() as i64));
        server.set("argv", EnvValue::List(argv));
        server.set("REQUEST_TIME", Utc::now().timestamp());

        Self {
            server,
            process: EnvLayer::from_pairs(LayerSource::Process, vars),
        }
    }

    /// Add a server variable.
    pub fn with_server(mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> Self {
        self.server.set(key, value);
        self
    }

    /// Add a process environment variable.
    pub fn with_process(mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> Self {
        self.process.set(key, value);
        self
    }
}

impl Default for Ambient {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_variables() {
        let ambient = Ambient::empty();
        assert!(ambient.server.is_empty());
        assert!(ambient.process.is_empty());
        assert_eq!(ambient.server.source, LayerSource::Server);
        assert_eq!(ambient.process.source, LayerSource::Process);
    }

    #[test]
    fn from_process_records_invocation_metadata() {
        let ambient = Ambient::from_process();
        let argc = ambient.server.get("argc").and_then(EnvValue::as_int).unwrap();
        let argv = ambient.server.get("argv").and_then(EnvValue::as_list).unwrap();
        assert_eq!(argc, argv.len() as i64);
        assert!(ambient.server.get("REQUEST_TIME").and_then(EnvValue::as_int).unwrap() > 0);
    }

    #[test]
    fn from_process_copies_environment() {
        let ambient = Ambient::from_process();
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(ambient.process.get("PATH"), Some(&EnvValue::from(path)));
        }
    }

    #[test]
    fn builders_append_variables() {
        let ambient = Ambient::default()
            .with_server("A", 1)
            .with_process("B", "two");
        assert_eq!(ambient.server.get("A"), Some(&EnvValue::from(1)));
        assert_eq!(ambient.process.get("B"), Some(&EnvValue::from("two")));
    }
}
