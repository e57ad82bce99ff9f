// --- File: crates/slotbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

/// Base address of the booking backend when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout applied by the HTTP client, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Zone used for displaying slot times when none is configured.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_follow_redirects() -> bool {
    true
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

// --- Booking API Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String, // Loaded via SLOTBOOK__API__BASE_URL
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            follow_redirects: default_follow_redirects(),
        }
    }
}

impl ApiConfig {
    /// Same defaults, different backend. Mostly useful for pointing at a fake server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

// --- Display Config ---
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// IANA zone name used when rendering slot times (e.g. "Europe/Paris").
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}
