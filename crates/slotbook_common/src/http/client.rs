// --- File: crates/slotbook_common/src/http/client.rs ---
use reqwest::{Client, Error as ReqwestError};
use slotbook_config::ApiConfig;
use std::time::Duration;

/// Creates a new HTTP client with custom configuration.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for the client
/// * `follow_redirects` - Whether the client should follow redirects
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}

/// Creates the client used to talk to the booking backend described by `api`.
pub fn client_for(api: &ApiConfig) -> Result<Client, ReqwestError> {
    create_client(api.timeout_secs, api.follow_redirects)
}
