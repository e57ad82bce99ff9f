// --- File: crates/services/slotbook_cli/src/app_state.rs ---
use chrono_tz::Tz;
use slotbook_booking::HttpBookingBackend;
use slotbook_common::{config_error, BookingBackend, CancellationToken, SlotbookError};
use slotbook_config::AppConfig;
use std::sync::Arc;

/// State shared by every command.
///
/// Built once at startup from the loaded configuration. The token is cancelled on
/// Ctrl-C so whatever request is pending resolves immediately.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn BookingBackend>,
    pub token: CancellationToken,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, SlotbookError> {
        if config.display.time_zone.parse::<Tz>().is_err() {
            return Err(config_error(format!(
                "Unknown display time zone `{}`",
                config.display.time_zone
            )));
        }
        let backend = HttpBookingBackend::new(&config.api)?;
        Ok(Self {
            config: Arc::new(config),
            backend: Arc::new(backend),
            token: CancellationToken::new(),
        })
    }

    /// The zone requested on the command line, else the configured one.
    pub fn time_zone<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.config.display.time_zone)
    }
}
