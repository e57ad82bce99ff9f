// --- File: crates/slotbook_common/src/http.rs ---
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApiError, ErrorDetail};

// Include the client module
pub mod client;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

/// Turns a response into `T`, or into an [`ApiError`] describing what went wrong.
///
/// Non-2xx statuses become [`ApiError::Status`] with whatever `detail` the body carried;
/// a 2xx body that does not decode becomes [`ApiError::DataShape`].
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::DataShape(err.to_string()))
}

/// Builds an [`ApiError::Status`] from a failed response.
///
/// The body is parsed as `{"detail": ...}`; anything else (empty body, HTML error page,
/// unexpected JSON) leaves the detail empty.
pub async fn error_from_response(response: Response) -> ApiError {
    let status = response.status().as_u16();
    let detail = match response.bytes().await {
        Ok(bytes) => serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.detail),
        Err(err) => {
            debug!("Could not read error body for status {}: {}", status, err);
            None
        }
    };
    ApiError::Status { status, detail }
}
