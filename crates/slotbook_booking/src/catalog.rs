// --- File: crates/slotbook_booking/src/catalog.rs ---
//! Event listing, event creation and the per-attendee bookings lookup.

use std::sync::Arc;

use serde::Deserialize;
use slotbook_common::models::{Booking, Event, NewEvent};
use slotbook_common::{ApiError, BookingBackend, CancellationToken};
use tracing::{debug, info};

use crate::error::BookingError;
use crate::logic::{is_valid_email, EMAIL_INVALID};
use crate::timezone::parse_timestamp;

pub const EVENTS_FETCH_FAILED: &str = "Failed to fetch events";
pub const EVENT_CREATE_FAILED: &str = "Failed to create event";
pub const EVENT_CREATE_NETWORK_ERROR: &str = "Error creating event";
pub const EVENT_CREATED: &str = "Event created successfully!";
pub const MY_BOOKINGS_FAILED: &str = "Could not fetch bookings. Please try again later.";
pub const MY_BOOKINGS_NETWORK_ERROR: &str = "Network error. Please try again.";

/// Event form contents before validation.
///
/// `max_bookings` stays signed so out-of-range input reaches [`EventDraft::validate`]
/// instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub organizer: String,
    pub slots: Vec<String>,
    pub max_bookings: i64,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            organizer: String::new(),
            slots: vec![String::new()],
            max_bookings: 1,
        }
    }
}

impl EventDraft {
    /// Checks the draft and turns it into a creation request.
    ///
    /// Presence checks run before format checks; the first failure wins.
    pub fn validate(&self) -> Result<NewEvent, BookingError> {
        let invalid = |message: &str| -> Result<NewEvent, BookingError> {
            Err(BookingError::Validation(message.to_string()))
        };

        let required = [
            (&self.title, "Title is required"),
            (&self.description, "Description is required"),
            (&self.start_time, "Start time is required"),
            (&self.end_time, "End time is required"),
            (&self.organizer, "Organizer is required"),
        ];
        if let Some((_, message)) = required.iter().find(|(value, _)| value.trim().is_empty()) {
            return invalid(*message);
        }
        if self.slots.is_empty() || self.slots.iter().any(|slot| slot.trim().is_empty()) {
            return invalid("At least one valid slot is required");
        }
        let Some(max_bookings) = u32::try_from(self.max_bookings).ok().filter(|max| *max >= 1)
        else {
            return invalid("Max bookings must be at least 1");
        };
        if self.slots.iter().any(|slot| parse_timestamp(slot.trim()).is_none()) {
            return invalid("Slots must be valid ISO8601 dates");
        }
        if parse_timestamp(self.start_time.trim()).is_none() {
            return invalid("Start time must be valid ISO8601 date");
        }
        if parse_timestamp(self.end_time.trim()).is_none() {
            return invalid("End time must be valid ISO8601 date");
        }

        Ok(NewEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            organizer: self.organizer.clone(),
            slots: self.slots.clone(),
            max_bookings,
        })
    }
}

/// Entry points that are not tied to a single event view.
#[derive(Clone)]
pub struct Catalog {
    backend: Arc<dyn BookingBackend>,
    token: CancellationToken,
}

impl Catalog {
    pub fn new(backend: Arc<dyn BookingBackend>, token: CancellationToken) -> Self {
        Self { backend, token }
    }

    /// All events, in the backend's order.
    pub async fn list_events(&self) -> Result<Vec<Event>, BookingError> {
        self.token
            .run(self.backend.list_events())
            .await?
            .map_err(|err| match err {
                ApiError::DataShape(reason) => BookingError::DataShape(reason),
                ApiError::Transport(_) => BookingError::Network(EVENTS_FETCH_FAILED.to_string()),
                ApiError::Status { .. } => BookingError::Server(EVENTS_FETCH_FAILED.to_string()),
            })
    }

    /// Validates `draft` locally, then creates the event.
    ///
    /// Server-side field errors come back one per line as `loc.path: message`.
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, BookingError> {
        let new_event = draft.validate()?;
        info!("Creating event '{}'", new_event.title);
        let created = self
            .token
            .run(self.backend.create_event(new_event))
            .await?
            .map_err(|err| {
                BookingError::from_api(err, EVENT_CREATE_FAILED, EVENT_CREATE_NETWORK_ERROR)
            })?;
        info!("Event {} created", created.id);
        Ok(created)
    }

    /// Bookings made with `email` across all events.
    pub async fn my_bookings(&self, email: &str) -> Result<Vec<Booking>, BookingError> {
        if !is_valid_email(email) {
            return Err(BookingError::Validation(EMAIL_INVALID.to_string()));
        }
        debug!("Looking up bookings for {}", email);
        self.token
            .run(self.backend.list_user_bookings(email))
            .await?
            .map_err(|err| match err {
                ApiError::DataShape(reason) => BookingError::DataShape(reason),
                ApiError::Transport(_) => {
                    BookingError::Network(MY_BOOKINGS_NETWORK_ERROR.to_string())
                }
                ApiError::Status { .. } => BookingError::Server(MY_BOOKINGS_FAILED.to_string()),
            })
    }
}
