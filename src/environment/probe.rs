//! Lazy computation of expensive registry entries.
//!
//! The registry leaves some keys unresolved at construction and asks a
//! [`LazyResolver`] for them the first time they are read. [`SystemProbe`]
//! answers from the operating system; tests plug in their own resolvers.

use std::backtrace::Backtrace;

use super::keys;
use super::registry::ResolvedView;
use super::value::EnvValue;

/// Computes the value of an unresolved registry key.
///
/// Returning `None` records the key as resolved to nothing; it will not be
/// asked for again.
pub trait LazyResolver {
    /// Compute `key`. `resolved` exposes entries that already have values.
    fn resolve(&self, key: &str, resolved: &ResolvedView<'_>) -> Option<EnvValue>;
}

/// Resolver backed by process and platform queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl LazyResolver for SystemProbe {
    fn resolve(&self, key: &str, resolved: &ResolvedView<'_>) -> Option<EnvValue> {
        match key {
            keys::PID => Some(EnvValue::from(std::process::id())),
            keys::GID => platform::gid().map(EnvValue::from),
            keys::UID => platform::uid().map(EnvValue::from),
            keys::USER => login_name(resolved),
            keys::SYSTEM_NAME => platform::uname().map(|u| EnvValue::from(u.sysname)),
            keys::HOSTNAME => platform::uname().map(|u| EnvValue::from(u.nodename)),
            keys::SYSTEM_VERSION_NAME => {
                platform::uname().and_then(|u| u.release.map(EnvValue::from))
            }
            keys::SYSTEM_VERSION_INFO => {
                platform::uname().and_then(|u| u.version.map(EnvValue::from))
            }
            keys::MACHINE_TYPE => platform::uname().map(|u| EnvValue::from(u.machine)),
            keys::SCRIPT_FILENAME => std::env::current_exe()
                .ok()
                .map(|path| EnvValue::from(path.to_string_lossy().into_owned())),
            keys::SCRIPT_DIR => std::env::current_exe().ok().and_then(|path| {
                path.parent()
                    .map(|dir| EnvValue::from(dir.to_string_lossy().into_owned()))
            }),
            keys::RUNTIME_MEMORY_SIZE => platform::memory_usage().map(EnvValue::from),
            keys::RUNTIME_DEBUG_BACKTRACE => Some(EnvValue::List(backtrace_frames())),
            keys::PHP_PATH => resolved.value(keys::INVOKER_PATH).cloned(),
            _ => None,
        }
    }
}

/// Name of the user running the process, from the captured login variables.
fn login_name(resolved: &ResolvedView<'_>) -> Option<EnvValue> {
    [keys::USER, "LOGNAME", "USERNAME"].iter().find_map(|var| {
        resolved
            .ambient(var)
            .filter(|name| !name.to_string().is_empty())
            .cloned()
    })
}

/// Current call stack, one line per entry.
fn backtrace_frames() -> Vec<String> {
    Backtrace::force_capture()
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Kernel identification strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uname {
    /// Kernel name, e.g. `Linux`.
    pub sysname: String,
    /// Network node hostname.
    pub nodename: String,
    /// Kernel release.
    pub release: Option<String>,
    /// Kernel version string.
    pub version: Option<String>,
    /// Hardware identifier, e.g. `x86_64`.
    pub machine: String,
}

#[cfg(unix)]
mod platform {
    use super::Uname;
    use std::ffi::CStr;

    pub fn gid() -> Option<u32> {
        // SAFETY: getgid() is a simple syscall that cannot fail
        Some(unsafe { libc::getgid() })
    }

    pub fn uid() -> Option<u32> {
        // SAFETY: getuid() is a simple syscall that cannot fail
        Some(unsafe { libc::getuid() })
    }

    pub fn uname() -> Option<Uname> {
        // SAFETY: utsname is plain old data, so the zeroed value is valid
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        // SAFETY: uts is a valid, writable utsname
        if unsafe { libc::uname(&mut uts) } != 0 {
            return None;
        }
        let field = |raw: &[libc::c_char]| {
            // SAFETY: uname() NUL-terminates every field it fills
            unsafe { CStr::from_ptr(raw.as_ptr()) }
                .to_string_lossy()
                .into_owned()
        };
        Some(Uname {
            sysname: field(&uts.sysname[..]),
            nodename: field(&uts.nodename[..]),
            release: Some(field(&uts.release[..])),
            version: Some(field(&uts.version[..])),
            machine: field(&uts.machine[..]),
        })
    }

    #[cfg(target_os = "linux")]
    pub fn memory_usage() -> Option<i64> {
        let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
        let resident: i64 = statm.split_whitespace().nth(1)?.parse().ok()?;
        // SAFETY: sysconf() only reads a configuration value
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        (page_size > 0).then(|| resident * page_size as i64)
    }

    #[cfg(not(target_os = "linux"))]
    pub fn memory_usage() -> Option<i64> {
        // SAFETY: rusage is plain old data, so the zeroed value is valid
        let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
        // SAFETY: usage is a valid, writable rusage
        if unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) } != 0 {
            return None;
        }
        let max_rss = usage.ru_maxrss as i64;
        // macOS reports bytes, the BSDs report kilobytes
        if cfg!(target_os = "macos") {
            Some(max_rss)
        } else {
            Some(max_rss * 1024)
        }
    }
}

#[cfg(not(unix))]
mod platform {
    use super::Uname;

    pub fn gid() -> Option<u32> {
        None
    }

    pub fn uid() -> Option<u32> {
        None
    }

    pub fn uname() -> Option<Uname> {
        Some(Uname {
            sysname: std::env::consts::OS.to_string(),
            nodename: std::env::var("COMPUTERNAME").unwrap_or_default(),
            release: None,
            version: None,
            machine: std::env::consts::ARCH.to_string(),
        })
    }

    pub fn memory_usage() -> Option<i64> {
        None
    }
}
