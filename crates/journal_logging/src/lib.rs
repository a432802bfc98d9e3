#![deny(missing_docs)]
//! Shared logging utilities for the journal workspace.
//!
//! This crate provides the `journal_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. The binary installs
//! the real logger; library crates only ever go through the macros.

use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! journal_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: "journal", $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! journal_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: "journal", $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! journal_info {
    ($($arg:tt)*) => {{
        log::info!(target: "journal", $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
///
/// Asset-level and entry-level failures are reported through this macro.
#[macro_export]
macro_rules! journal_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: "journal", $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! journal_error {
    ($($arg:tt)*) => {{
        log::error!(target: "journal", $($arg)*);
    }};
}

/// Level used by [`initialize_for_tests`].
///
/// Debug in debug builds, info in release builds.
pub fn default_test_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        default_test_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
