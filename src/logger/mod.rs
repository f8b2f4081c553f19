//! Internal logger.
//! Feature flags: `log-info`, `log-debug`, `verbose`, `file-logging`.
//!
//! Unlike a process-wide logger, a [`Logger`] is a value: the CLI builds one from config and
//! flags, then hands it to the session and command executor. Tests can build their own.

use std::fmt::Arguments;
use std::str::FromStr;

#[cfg(feature = "file-logging")]
use std::{
    fs::{File, OpenOptions},
    io::Write,
    sync::Mutex,
};

/// Logging levels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Error-level messages (always enabled).
    Error = 1,
    /// Warning-level messages (always enabled).
    Warn = 2,
    /// Info-level messages (requires `log-info` feature).
    Info = 3,
    /// Debug-level messages (requires `log-debug` feature and runtime enablement).
    Debug = 4,
}

impl Level {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Warn => "[WARN]",
            Self::Info => "[INFO]",
            Self::Debug => "[DEBUG]",
        }
    }
}

impl FromStr for Level {
    type Err = String;

    /// Parse a level (case-insensitive), accepting `err` and `warning` as aliases.
    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.to_ascii_lowercase().as_str() {
            "error" | "err" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(format!("Unknown log level: '{level}'")),
        }
    }
}

const fn default_level() -> Level {
    if cfg!(feature = "log-debug") {
        Level::Debug
    } else if cfg!(feature = "log-info") {
        Level::Info
    } else {
        Level::Warn
    }
}

/// Logging context injected into the session and command executor.
#[derive(Debug)]
pub struct Logger {
    level: Level,
    debug_enabled: bool,
    verbose: bool,
    #[cfg(feature = "file-logging")]
    file: Option<Mutex<File>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(default_level())
    }
}

impl Logger {
    /// Create a logger that emits messages up to `level` on stdout/stderr.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self {
            level,
            debug_enabled: matches!(level, Level::Debug),
            verbose: false,
            #[cfg(feature = "file-logging")]
            file: None,
        }
    }

    /// Logger that only reports errors. Handy for tests and quiet runs.
    #[must_use]
    pub const fn quiet() -> Self {
        Self::new(Level::Error)
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Change the level.
    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    /// Enable debug logging at runtime.
    pub fn enable_debug(&mut self) {
        self.debug_enabled = true;
    }

    /// Disable debug logging at runtime.
    pub fn disable_debug(&mut self) {
        self.debug_enabled = false;
    }

    /// Returns whether debug logging is enabled (always false without `log-debug`).
    #[must_use]
    pub const fn is_debug_enabled(&self) -> bool {
        cfg!(feature = "log-debug") && self.debug_enabled
    }

    /// Enable verbose output at runtime.
    pub fn enable_verbose(&mut self) {
        self.verbose = true;
    }

    /// Returns whether verbose output is enabled (always false without `verbose`).
    #[must_use]
    pub const fn is_verbose_enabled(&self) -> bool {
        cfg!(feature = "verbose") && self.verbose
    }

    #[cfg(feature = "file-logging")]
    #[must_use]
    /// Send tagged log lines to a file (appending). Returns `true` on success.
    pub fn init_file_logging(&mut self, path: &std::path::Path) -> bool {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .is_ok_and(|file| {
                self.file = Some(Mutex::new(file));
                true
            })
    }

    #[cfg(not(feature = "file-logging"))]
    #[must_use]
    /// Initialize file logging (no-op when `file-logging` feature is disabled).
    pub fn init_file_logging(&mut self, _path: &std::path::Path) -> bool {
        false
    }

    /// Returns whether a message at `level` would be emitted.
    #[must_use]
    pub const fn enabled(&self, level: Level) -> bool {
        let compiled_in = match level {
            Level::Info => cfg!(feature = "log-info"),
            Level::Debug => cfg!(feature = "log-debug"),
            Level::Error | Level::Warn => true,
        };
        compiled_in
            && (level as u8) <= (self.level as u8)
            && (!matches!(level, Level::Debug) || self.debug_enabled)
    }

    /// Logging dispatcher used by the macros.
    pub fn log(&self, level: Level, args: Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        let msg = args.to_string();
        self.emit(level, &msg);
    }

    /// Untagged console output shown only in verbose mode. Never written to the log file.
    pub fn verbose(&self, args: Arguments<'_>) {
        if self.is_verbose_enabled() {
            println!("{args}");
        }
    }

    fn emit(&self, level: Level, msg: &str) {
        #[cfg(feature = "file-logging")]
        {
            if let Some(file) = &self.file {
                if let Ok(mut file) = file.lock() {
                    let _ = writeln!(file, "{} {msg}", level.prefix());
                    let _ = file.flush();
                    return;
                }
            }
        }
        match level {
            Level::Error | Level::Warn => eprintln!("{} {msg}", level.prefix()),
            Level::Info | Level::Debug => println!("{} {msg}", level.prefix()),
        }
    }
}

#[macro_export]
/// Logs an error-level message (always enabled).
macro_rules! error { ($logger:expr, $($arg:tt)*) => { $logger.log($crate::logger::Level::Error, format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a warning-level message (always enabled).
macro_rules! warn  { ($logger:expr, $($arg:tt)*) => { $logger.log($crate::logger::Level::Warn,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs an info-level message (requires `log-info` feature).
macro_rules! info  { ($logger:expr, $($arg:tt)*) => { $logger.log($crate::logger::Level::Info,  format_args!($($arg)*)) }; }
#[macro_export]
/// Logs a debug-level message (requires `log-debug` feature and runtime enablement).
macro_rules! debug { ($logger:expr, $($arg:tt)*) => { $logger.log($crate::logger::Level::Debug, format_args!($($arg)*)) }; }
#[macro_export]
/// Prints a verbose message (requires `verbose` feature and runtime enablement). This does not write to log files.
macro_rules! verbose { ($logger:expr, $($arg:tt)*) => { $logger.verbose(format_args!($($arg)*)) }; }
