// --- File: crates/slotbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod cancel;    // View teardown signalling
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod logging;   // Logging utilities
pub mod models;    // Wire records shared with the backend
pub mod services;  // Backend abstraction

// Re-export error types and utilities for easier access
pub use error::{
    ApiError,
    ErrorDetail,
    FieldError,
    SlotbookError,
    config_error,
    internal_error,
};

// Re-export HTTP utilities for easier access
pub use http::{
    error_from_response,
    read_json,
    client::{create_client, client_for},
};

pub use cancel::{Cancelled, CancellationToken};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use services::{BookingBackend, BoxFuture};
