//! Runtime mode detection.
//!
//! Decides whether the process runs as a console program, serves web
//! requests, or answers RPC calls. The priority chain is:
//!
//! 1. Console invocation
//! 2. RPC method marker on the request field or the transport method
//! 3. Fallback to web

use std::fmt;
use std::str::FromStr;

use super::keys::{RPC_METHOD_FIELD, RPC_METHOD_MARKER};
use super::value::EnvValue;

/// Execution mode of the running process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuntimeMode {
    /// Batch or interactive command-line invocation.
    Console,
    /// Serving web requests.
    #[default]
    Web,
    /// Serving RPC calls.
    Rpc,
}

impl RuntimeMode {
    /// All modes, in the order their constants appear in the registry.
    pub const ALL: [RuntimeMode; 3] = [Self::Console, Self::Web, Self::Rpc];

    /// Stable name stored in the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Web => "web",
            Self::Rpc => "rpc",
        }
    }

    /// Registry value for this mode.
    pub fn value(&self) -> EnvValue {
        EnvValue::from(self.as_str())
    }

    /// Decide the mode for an invocation.
    ///
    /// `request_method` is the transport-level method from the server table.
    ///
    /// ```
    /// use runenv::environment::{InvocationContext, RuntimeMode};
    ///
    /// let ctx = InvocationContext::web().with_rpc_method("FRPC_POST");
    /// assert_eq!(RuntimeMode::detect(&ctx, None), RuntimeMode::Rpc);
    ///
    /// let ctx = InvocationContext::console().with_rpc_method("FRPC_POST");
    /// assert_eq!(RuntimeMode::detect(&ctx, None), RuntimeMode::Console);
    /// ```
    pub fn detect(context: &InvocationContext, request_method: Option<&str>) -> Self {
        if context.interface == Interface::Console {
            return Self::Console;
        }
        let marked = |method: Option<&str>| method == Some(RPC_METHOD_MARKER);
        if marked(context.rpc_method.as_deref()) || marked(request_method) {
            return Self::Rpc;
        }
        Self::Web
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "web" => Ok(Self::Web),
            "rpc" => Ok(Self::Rpc),
            _ => Err(format!("unknown runtime mode: {}", s)),
        }
    }
}

/// How the process was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Interface {
    /// Command-line invocation.
    #[default]
    Console,
    /// Behind a web server gateway.
    Web,
}

/// Invocation signals used for mode detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    /// How the process was invoked.
    pub interface: Interface,
    /// RPC method carried on the internal request field, if any.
    pub rpc_method: Option<String>,
}

impl InvocationContext {
    /// Context for a command-line invocation.
    pub fn console() -> Self {
        Self {
            interface: Interface::Console,
            rpc_method: None,
        }
    }

    /// Context for a request arriving through a web gateway.
    pub fn web() -> Self {
        Self {
            interface: Interface::Web,
            rpc_method: None,
        }
    }

    /// Attach an RPC method from the request fields.
    pub fn with_rpc_method(mut self, method: impl Into<String>) -> Self {
        self.rpc_method = Some(method.into());
        self
    }

    /// Detect the invocation from the process environment.
    pub fn detect() -> Self {
        Self::detect_with_env(|key| std::env::var(key))
    }

    /// Detect with a custom env var lookup (for testing).
    ///
    /// A CGI gateway (`GATEWAY_INTERFACE`) means a web invocation. The RPC
    /// field is read from `FRPC_METHOD` in the query string.
    pub fn detect_with_env<F>(env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        if env_fn("GATEWAY_INTERFACE").is_err() {
            return Self::console();
        }

        let rpc_method = env_fn("QUERY_STRING")
            .ok()
            .and_then(|query| query_field(&query, RPC_METHOD_FIELD));

        Self {
            interface: Interface::Web,
            rpc_method,
        }
    }
}

/// Find a field in an `a=1&b=2` query string.
fn query_field(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then(|| value.to_string())
    })
}
