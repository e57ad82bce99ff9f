use slotbook_common::{ApiError, Cancelled, SlotbookError};
use thiserror::Error;

/// Shown instead of a view whose backing data could not be decoded.
pub const EVENT_DATA_INVALID: &str = "Event data invalid. Please try again.";

/// Everything that can go wrong while loading or submitting through a view.
///
/// None of these are fatal to the process; each maps to one line of text via
/// [`BookingError::display_message`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BookingError {
    /// Rejected locally; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No response from the backend.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("Server error: {0}")]
    Server(String),

    /// The backend answered with something that is not the record we asked for.
    #[error("Invalid data: {0}")]
    DataShape(String),

    #[error("A booking is already being submitted")]
    SubmissionInFlight,

    #[error("Cancelled")]
    Cancelled,
}

impl BookingError {
    /// Classifies a backend failure.
    ///
    /// `fallback` is used when the backend rejected the call without a usable
    /// `detail`; `network` is the text for transport failures.
    pub fn from_api(err: ApiError, fallback: &str, network: &str) -> Self {
        match err {
            ApiError::Transport(_) => BookingError::Network(network.to_string()),
            ApiError::Status { detail, .. } => BookingError::Server(
                detail
                    .and_then(|detail| detail.message())
                    .unwrap_or_else(|| fallback.to_string()),
            ),
            ApiError::DataShape(reason) => BookingError::DataShape(reason),
        }
    }

    /// Text suitable for showing next to the form.
    pub fn display_message(&self) -> String {
        match self {
            BookingError::Validation(message)
            | BookingError::Network(message)
            | BookingError::Server(message) => message.clone(),
            BookingError::DataShape(_) => EVENT_DATA_INVALID.to_string(),
            BookingError::SubmissionInFlight => {
                "A booking is already being submitted.".to_string()
            }
            BookingError::Cancelled => "The request was cancelled.".to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BookingError::Validation(_))
    }
}

impl From<Cancelled> for BookingError {
    fn from(_: Cancelled) -> Self {
        BookingError::Cancelled
    }
}

impl From<BookingError> for SlotbookError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(message) => SlotbookError::ValidationError(message),
            BookingError::Network(message) => SlotbookError::HttpError(message),
            BookingError::Server(message) => SlotbookError::ServerError(message),
            BookingError::DataShape(reason) => SlotbookError::DataShapeError(reason),
            BookingError::SubmissionInFlight => {
                SlotbookError::InternalError("A booking is already being submitted".to_string())
            },
            BookingError::Cancelled => SlotbookError::CancelledError,
        }
    }
}
