/// VideoCore - process-wide state of the view layer
///
/// Holds the active configuration, the logger, and the set of diagnostics already
/// reported. Everything else in this crate is pure; this is the only global state,
/// kept in thread-safe static storage so it can be read from any thread.

use std::sync::{Mutex, OnceLock, RwLock};
use std::time::SystemTime;
use rustc_hash::FxHashSet;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

// ===== INTERNAL STATE =====

/// Global view-layer state storage
static VIDEO_CORE_STATE: OnceLock<VideoCoreState> = OnceLock::new();

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

struct VideoCoreState {
    /// Active configuration
    config: RwLock<Config>,
    /// Keys already reported through `log_once()`
    reported: Mutex<FxHashSet<String>>,
}

impl VideoCoreState {
    fn new() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            reported: Mutex::new(FxHashSet::default()),
        }
    }
}

fn state() -> &'static VideoCoreState {
    VIDEO_CORE_STATE.get_or_init(VideoCoreState::new)
}

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// View-layer singleton manager
///
/// # Example
///
/// ```no_run
/// use liverpool_gpu::liverpool::{Config, VideoCore};
///
/// VideoCore::initialize(Config::default())?;
/// assert!(VideoCore::config().log_unsupported_once);
/// VideoCore::shutdown();
/// # Ok::<(), liverpool_gpu::liverpool::Error>(())
/// ```
pub struct VideoCore;

impl VideoCore {
    /// Install the configuration
    ///
    /// May be called again to replace the configuration; already-reported
    /// diagnostics stay suppressed.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the config lock is poisoned.
    pub fn initialize(config: Config) -> Result<()> {
        let mut lock = state().config.write()
            .map_err(|_| Error::BackendError("Config lock poisoned".to_string()))?;
        *lock = config;
        drop(lock);

        crate::video_debug!("liverpool::VideoCore", "Configuration installed");
        Ok(())
    }

    /// Restore the default configuration and forget every reported diagnostic
    pub fn shutdown() {
        let state = state();
        if let Ok(mut config) = state.config.write() {
            *config = Config::default();
        }
        if let Ok(mut reported) = state.reported.lock() {
            reported.clear();
        }
    }

    /// Snapshot of the active configuration (the default one if never initialized)
    pub fn config() -> Config {
        state().config.read()
            .map(|config| config.clone())
            .unwrap_or_default()
    }

    // ===== LOGGING API =====

    /// Replace the default logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(custom: L) {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(custom);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like video_info!, video_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Internal logging method with file:line information (for ERROR logs)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    /// Log a message at most once per `key`
    ///
    /// Deduplication only applies while `Config::log_unsupported_once` is set;
    /// otherwise every call is logged. Returns true if the message was emitted.
    pub fn log_once(severity: LogSeverity, source: &str, key: &str, message: String) -> bool {
        if Self::config().log_unsupported_once {
            let first = match state().reported.lock() {
                Ok(mut reported) => reported.insert(key.to_string()),
                Err(_) => true,
            };
            if !first {
                return false;
            }
        }
        Self::log(severity, source, message);
        true
    }

    /// Report a broken internal invariant
    ///
    /// Panics when `Config::panic_on_unreachable` is set (the default in debug builds).
    /// Otherwise logs at ERROR level and degrades to `UnsupportedFormat`, so only the
    /// affected view is lost.
    #[track_caller]
    pub fn unreachable(source: &str, message: String) -> Error {
        if Self::config().panic_on_unreachable {
            panic!("[{}] unreachable state: {}", source, message);
        }
        let location = std::panic::Location::caller();
        Self::log_detailed(
            LogSeverity::Error,
            source,
            format!("unreachable state: {}", message),
            location.file(),
            location.line(),
        );
        Error::UnsupportedFormat(message)
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if severity < Self::config().min_log_severity {
            return;
        }
        if let Ok(lock) = logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "video_core_tests.rs"]
mod tests;
