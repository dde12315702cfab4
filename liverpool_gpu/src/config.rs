/// View-layer configuration
///
/// Installed once through `VideoCore::initialize()`. Reading the config before
/// initialization yields `Config::default()`.

use crate::log::LogSeverity;

/// Runtime switches for the surface/view translation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Entries below this severity are dropped before reaching the logger
    pub min_log_severity: LogSeverity,
    /// Report each distinct unsupported format combination only once
    pub log_unsupported_once: bool,
    /// Panic when a builder invariant is broken instead of degrading to `UnsupportedFormat`
    pub panic_on_unreachable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_log_severity: if cfg!(debug_assertions) {
                LogSeverity::Debug
            } else {
                LogSeverity::Info
            },
            log_unsupported_once: true,
            panic_on_unreachable: cfg!(debug_assertions),
        }
    }
}
