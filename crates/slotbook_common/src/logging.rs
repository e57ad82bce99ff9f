//! Logging utilities for slotbook.
//!
//! Every crate logs through the `tracing` macros directly; this module only owns
//! subscriber setup plus a couple of helpers for logging at error boundaries.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// # Examples
///
/// ```
/// use slotbook_common::logging;
///
/// logging::init();
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// `RUST_LOG` is honoured; `level` is added as the directive for all `slotbook*` targets.
/// Calling this more than once is harmless: the first subscriber stays installed.
///
/// # Arguments
///
/// * `level` - The minimum log level to display.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("slotbook={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Log an error with context at the ERROR level.
///
/// # Arguments
///
/// * `error` - The error to log.
/// * `context` - Additional context information about the error.
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}

/// Log a result, with different messages for success and error cases.
///
/// # Returns
///
/// The original result, allowing this function to be used in a chain.
pub fn log_result<T, E: std::fmt::Display>(
    result: Result<T, E>,
    success_message: &str,
    error_context: &str,
) -> Result<T, E> {
    match &result {
        Ok(_) => info!("{}", success_message),
        Err(e) => error!("{}: {}", error_context, e),
    }
    result
}
