//! Well-known registry keys.
//!
//! The names are part of the public contract: ambient consumers look them up
//! verbatim, including the historical `SYSTME_VERSION_NAME` spelling.

pub const FRAMEWORK_NAME: &str = "FRAMEWORK_NAME";
pub const FRAMEWORK_PATH: &str = "FRAMEWORK_PATH";
pub const FRAMEWORK_VERSION: &str = "FRAMEWORK_VERSION";
pub const PHP_VERSION: &str = "PHP_VERSION";
pub const PHP_VERSION_ID: &str = "PHP_VERSION_ID";
pub const PHP_OS: &str = "PHP_OS";
pub const PHP_PATH: &str = "PHP_PATH";
pub const PID: &str = "PID";
pub const GID: &str = "GID";
pub const UID: &str = "UID";
pub const USER: &str = "USER";
pub const SYSTEM_NAME: &str = "SYSTEM_NAME";
pub const HOSTNAME: &str = "HOSTNAME";
pub const SYSTEM_VERSION_NAME: &str = "SYSTME_VERSION_NAME";
pub const SYSTEM_VERSION_INFO: &str = "SYSTEM_VERSION_INFO";
pub const MACHINE_TYPE: &str = "MACHINE_TYPE";
pub const RUNTIME_TICK_LINE: &str = "RUNTIME_TICK_LINE";
pub const RUNTIME_MEMORY_SIZE: &str = "RUNTIME_MEMORY_SIZE";
pub const RUNTIME_DEBUG_BACKTRACE: &str = "RUNTIME_DEBUG_BACKTRACE";
pub const SCRIPT_DIR: &str = "SCRIPT_DIR";
pub const SCRIPT_FILENAME: &str = "SCRIPT_FILENAME";
pub const RUNTIME_MODE: &str = "RUNTIME_MODE";
pub const RUNTIME_MODE_CONSOLE: &str = "RUNTIME_MODE_CONSOLE";
pub const RUNTIME_MODE_WEB: &str = "RUNTIME_MODE_WEB";
pub const RUNTIME_MODE_RPC: &str = "RUNTIME_MODE_RPC";

/// Ambient key holding the path of the invoking program (set by POSIX shells).
pub const INVOKER_PATH: &str = "_";

/// Internal request field carrying the RPC method marker.
pub const RPC_METHOD_FIELD: &str = "FRPC_METHOD";

/// Transport-level request method variable.
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";

/// Marker value that selects RPC mode.
pub const RPC_METHOD_MARKER: &str = "FRPC_POST";

/// Default for `RUNTIME_TICK_LINE`.
pub const DEFAULT_TICK_LINE: i64 = 10;

/// Keys that custom defaults are allowed to override.
pub const CUSTOMIZABLE: &[&str] = &[RUNTIME_TICK_LINE];

/// Check if a key may be overridden by custom defaults.
pub fn is_customizable(key: &str) -> bool {
    CUSTOMIZABLE.contains(&key)
}

/// Toolchain floor the crate was built against, e.g. `"1.80"`.
pub const TOOLCHAIN_VERSION: &str = match option_env!("CARGO_PKG_RUST_VERSION") {
    Some(version) => version,
    None => "",
};

/// Numeric form of a dotted version: `major * 10000 + minor * 100 + patch`.
///
/// Missing or non-numeric components count as zero.
///
/// ```
/// use runenv::environment::keys::version_id;
///
/// assert_eq!(version_id("1.80"), 18000);
/// assert_eq!(version_id("8.1.12"), 80112);
/// ```
pub fn version_id(version: &str) -> i64 {
    let mut parts = version
        .split('.')
        .map(|part| part.trim().parse::<i64>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    major * 10000 + minor * 100 + patch
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_tick_line_is_customizable() {
        assert!(is_customizable(RUNTIME_TICK_LINE));
        assert!(!is_customizable(PHP_VERSION));
        assert!(!is_customizable(RUNTIME_MODE));
        assert!(!is_customizable("ANYTHING"));
    }

    #[test]
    fn version_id_handles_short_and_garbage_versions() {
        assert_eq!(version_id(""), 0);
        assert_eq!(version_id("2"), 20000);
        assert_eq!(version_id("1.x.3"), 10003);
    }

    #[test]
    fn release_key_keeps_historical_spelling() {
        assert_eq!(SYSTEM_VERSION_NAME, "SYSTME_VERSION_NAME");
    }
}
