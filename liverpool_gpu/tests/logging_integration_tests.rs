//! Integration tests for the VideoCore logging system
//!
//! These tests verify routing, severity filtering and deduplication through
//! the public API only. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use liverpool_gpu::liverpool::{Config, Error, VideoCore};
use liverpool_gpu::liverpool::log::{Logger, LogEntry, LogSeverity};
use liverpool_gpu::{video_bail, video_err, video_info, video_trace};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install(config: Config) -> Arc<Mutex<Vec<LogEntry>>> {
    VideoCore::initialize(config).unwrap();
    let (test_logger, entries) = TestLogger::new();
    VideoCore::set_logger(test_logger);
    entries
}

fn verbose() -> Config {
    Config { min_log_severity: LogSeverity::Trace, ..Config::default() }
}

fn teardown() {
    VideoCore::reset_logger();
    VideoCore::shutdown();
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let entries = install(verbose());

    VideoCore::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    VideoCore::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    VideoCore::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert!(captured.iter().all(|entry| entry.source == "test::module"));
        assert_eq!(captured[1].message, "Test warning message");
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let entries = install(verbose());

    VideoCore::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let entries = install(verbose());

    VideoCore::log(LogSeverity::Info, "test", "Message 1".to_string());
    VideoCore::reset_logger();
    VideoCore::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);

    teardown();
}

#[test]
#[serial]
fn test_integration_severity_filter() {
    let entries = install(Config { min_log_severity: LogSeverity::Warn, ..Config::default() });

    video_trace!("test", "Trace message");
    video_info!("test", "Info message");
    VideoCore::log(LogSeverity::Warn, "test", "Warn message".to_string());
    VideoCore::log(LogSeverity::Error, "test", "Error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert_eq!(captured[0].severity, LogSeverity::Warn);
        assert_eq!(captured[1].severity, LogSeverity::Error);
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_log_once_deduplicates() {
    let entries = install(verbose());

    assert!(VideoCore::log_once(LogSeverity::Warn, "test", "Format8_24/Unorm", "first".to_string()));
    assert!(!VideoCore::log_once(LogSeverity::Warn, "test", "Format8_24/Unorm", "second".to_string()));
    assert!(VideoCore::log_once(LogSeverity::Warn, "test", "Format24_8/Unorm", "other".to_string()));

    assert_eq!(entries.lock().unwrap().len(), 2);

    // Shutdown forgets what was reported
    VideoCore::shutdown();
    assert!(VideoCore::log_once(LogSeverity::Warn, "test", "Format8_24/Unorm", "again".to_string()));

    teardown();
}

#[test]
#[serial]
fn test_integration_log_once_disabled_logs_every_time() {
    let entries = install(Config { log_unsupported_once: false, ..verbose() });

    for _ in 0..3 {
        assert!(VideoCore::log_once(LogSeverity::Warn, "test", "same", "repeat".to_string()));
    }
    assert_eq!(entries.lock().unwrap().len(), 3);

    teardown();
}

fn checked_layers(base: u32, last: u32) -> Result<u32, Error> {
    if last < base {
        video_bail!("test::builder", InvalidDescriptor, "layers {}..={} reversed", base, last);
    }
    Ok(last - base + 1)
}

#[test]
#[serial]
fn test_integration_error_macros_log_and_build() {
    let entries = install(verbose());

    let error = video_err!("test::backend", BackendError, "device lost ({})", 7);
    assert_eq!(error, Error::BackendError("device lost (7)".to_string()));

    assert_eq!(checked_layers(2, 5), Ok(4));
    assert_eq!(
        checked_layers(5, 2),
        Err(Error::InvalidDescriptor("layers 5..=2 reversed".to_string()))
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 2);
        assert!(captured.iter().all(|entry| entry.severity == LogSeverity::Error));
        assert!(captured.iter().all(|entry| entry.file.is_some() && entry.line.is_some()));
        assert_eq!(captured[1].source, "test::builder");
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_unreachable_degrades_in_release_mode() {
    let entries = install(Config { panic_on_unreachable: false, ..verbose() });

    let error = VideoCore::unreachable("test::builder", "impossible format".to_string());
    assert_eq!(error, Error::UnsupportedFormat("impossible format".to_string()));

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
        assert!(captured[0].message.contains("impossible format"));
    }

    teardown();
}
