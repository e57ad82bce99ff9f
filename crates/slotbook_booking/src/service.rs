// --- File: crates/slotbook_booking/src/service.rs ---
//! Booking backend implementations.
//!
//! [`HttpBookingBackend`] talks to the real REST API; [`mock::MockBookingBackend`]
//! keeps everything in memory and applies the same booking rules as the server.

use reqwest::{Client, Url};
use slotbook_common::models::{Booking, Event, NewBooking, NewEvent};
use slotbook_common::{client_for, read_json, ApiError, BookingBackend, BoxFuture, SlotbookError};
use slotbook_config::ApiConfig;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while setting up a backend.
#[derive(Error, Debug)]
pub enum BookingServiceError {
    #[error("Invalid backend base URL `{url}`: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<BookingServiceError> for SlotbookError {
    fn from(err: BookingServiceError) -> Self {
        SlotbookError::ConfigError(err.to_string())
    }
}

/// REST implementation of [`BookingBackend`].
#[derive(Clone, Debug)]
pub struct HttpBookingBackend {
    client: Client,
    base_url: Url,
}

impl HttpBookingBackend {
    /// Builds a backend from the configured API section.
    pub fn new(api: &ApiConfig) -> Result<Self, BookingServiceError> {
        let client = client_for(api)?;
        Self::with_client(client, &api.base_url)
    }

    /// Uses an existing client, e.g. one shared with other services.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BookingServiceError> {
        let invalid = |reason: String| BookingServiceError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("not a hierarchical URL".to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded on its own;
    /// a trailing `""` produces a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl BookingBackend for HttpBookingBackend {
    fn list_events(&self) -> BoxFuture<'_, Vec<Event>, ApiError> {
        let url = self.endpoint(&["events", ""]);
        Box::pin(async move {
            debug!("GET {}", url);
            let response = self.client.get(url).send().await?;
            read_json(response).await
        })
    }

    fn create_event(&self, event: NewEvent) -> BoxFuture<'_, Event, ApiError> {
        let url = self.endpoint(&["events", ""]);
        Box::pin(async move {
            info!("Creating event '{}' with {} slots", event.title, event.slots.len());
            let response = self.client.post(url).json(&event).send().await?;
            info!("Response received with status: {}", response.status());
            read_json(response).await
        })
    }

    fn get_event(&self, event_id: i64) -> BoxFuture<'_, Event, ApiError> {
        let url = self.endpoint(&["events", &event_id.to_string()]);
        Box::pin(async move {
            debug!("GET {}", url);
            let response = self.client.get(url).send().await?;
            read_json(response).await
        })
    }

    fn list_event_bookings(&self, event_id: i64) -> BoxFuture<'_, Vec<Booking>, ApiError> {
        let url = self.endpoint(&["events", &event_id.to_string(), "bookings", ""]);
        Box::pin(async move {
            debug!("GET {}", url);
            let response = self.client.get(url).send().await?;
            read_json(response).await
        })
    }

    fn create_booking(
        &self,
        event_id: i64,
        booking: NewBooking,
    ) -> BoxFuture<'_, Booking, ApiError> {
        let url = self.endpoint(&["events", &event_id.to_string(), "bookings"]);
        Box::pin(async move {
            info!("Booking slot {} of event {}", booking.slot, event_id);
            let response = self.client.post(url).json(&booking).send().await?;
            info!("Response received with status: {}", response.status());
            read_json(response).await
        })
    }

    fn list_user_bookings(&self, email: &str) -> BoxFuture<'_, Vec<Booking>, ApiError> {
        let url = self.endpoint(&["users", email, "bookings"]);
        Box::pin(async move {
            debug!("GET {}", url);
            let response = self.client.get(url).send().await?;
            read_json(response).await
        })
    }
}

pub mod mock {
    use super::*;
    use slotbook_common::ErrorDetail;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tokio::sync::Notify;

    /// How often each backend operation was invoked.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct CallCounts {
        pub list_events: usize,
        pub create_event: usize,
        pub get_event: usize,
        pub list_event_bookings: usize,
        pub create_booking: usize,
        pub list_user_bookings: usize,
    }

    impl CallCounts {
        pub fn total(&self) -> usize {
            self.list_events
                + self.create_event
                + self.get_event
                + self.list_event_bookings
                + self.create_booking
                + self.list_user_bookings
        }
    }

    #[derive(Default)]
    struct MockState {
        events: Vec<Event>,
        bookings: Vec<Booking>,
        next_event_id: i64,
        next_booking_id: i64,
        offline: bool,
        booking_list_unavailable: bool,
        booking_gate: Option<Arc<Notify>>,
        calls: CallCounts,
    }

    /// In-memory backend for tests and demos.
    ///
    /// Booking rules match the server: unknown event, unknown slot, same email twice
    /// on one slot and full slots are all rejected with a 400/404 and a `detail`.
    #[derive(Default)]
    pub struct MockBookingBackend {
        state: Mutex<MockState>,
    }

    fn rejected(status: u16, detail: &str) -> ApiError {
        ApiError::Status {
            status,
            detail: Some(ErrorDetail::Message(detail.to_string())),
        }
    }

    fn offline() -> ApiError {
        ApiError::Transport("connection refused".to_string())
    }

    impl MockBookingBackend {
        /// Create a new, empty mock backend.
        pub fn new() -> Self {
            Self::default()
        }

        fn lock(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        /// Stores `event` as-is, keeping its id.
        pub fn insert_event(&self, event: Event) {
            let mut state = self.lock();
            state.next_event_id = state.next_event_id.max(event.id);
            state.events.push(event);
        }

        /// Stores `booking` as-is, bypassing every rule.
        pub fn insert_booking(&self, booking: Booking) {
            let mut state = self.lock();
            state.next_booking_id = state.next_booking_id.max(booking.id);
            state.bookings.push(booking);
        }

        pub fn bookings(&self) -> Vec<Booking> {
            self.lock().bookings.clone()
        }

        /// While offline every call fails as if no response arrived.
        pub fn set_offline(&self, offline: bool) {
            self.lock().offline = offline;
        }

        /// Makes `GET /events/{id}/bookings/` answer 503 while set.
        pub fn set_booking_list_unavailable(&self, unavailable: bool) {
            self.lock().booking_list_unavailable = unavailable;
        }

        /// Holds every booking submission until `gate` is notified.
        pub fn set_booking_gate(&self, gate: Option<Arc<Notify>>) {
            self.lock().booking_gate = gate;
        }

        pub fn calls(&self) -> CallCounts {
            self.lock().calls.clone()
        }

        fn event_bookings(state: &MockState, event_id: i64) -> Vec<Booking> {
            state
                .bookings
                .iter()
                .filter(|booking| booking.event_id == event_id)
                .cloned()
                .collect()
        }
    }

    impl BookingBackend for MockBookingBackend {
        fn list_events(&self) -> BoxFuture<'_, Vec<Event>, ApiError> {
            Box::pin(async move {
                let mut state = self.lock();
                state.calls.list_events += 1;
                if state.offline {
                    return Err(offline());
                }
                Ok(state.events.clone())
            })
        }

        fn create_event(&self, event: NewEvent) -> BoxFuture<'_, Event, ApiError> {
            Box::pin(async move {
                let mut state = self.lock();
                state.calls.create_event += 1;
                if state.offline {
                    return Err(offline());
                }
                state.next_event_id += 1;
                let created = Event {
                    id: state.next_event_id,
                    title: event.title,
                    description: Some(event.description),
                    start_time: event.start_time,
                    end_time: event.end_time,
                    organizer: Some(event.organizer),
                    slots: event.slots,
                    max_bookings: event.max_bookings,
                };
                state.events.push(created.clone());
                Ok(created)
            })
        }

        fn get_event(&self, event_id: i64) -> BoxFuture<'_, Event, ApiError> {
            Box::pin(async move {
                let mut state = self.lock();
                state.calls.get_event += 1;
                if state.offline {
                    return Err(offline());
                }
                state
                    .events
                    .iter()
                    .find(|event| event.id == event_id)
                    .cloned()
                    .ok_or_else(|| rejected(404, "Event not found"))
            })
        }

        fn list_event_bookings(&self, event_id: i64) -> BoxFuture<'_, Vec<Booking>, ApiError> {
            Box::pin(async move {
                let mut state = self.lock();
                state.calls.list_event_bookings += 1;
                if state.offline {
                    return Err(offline());
                }
                if state.booking_list_unavailable {
                    return Err(ApiError::Status {
                        status: 503,
                        detail: None,
                    });
                }
                Ok(Self::event_bookings(&state, event_id))
            })
        }

        fn create_booking(
            &self,
            event_id: i64,
            booking: NewBooking,
        ) -> BoxFuture<'_, Booking, ApiError> {
            Box::pin(async move {
                let gate = {
                    let mut state = self.lock();
                    state.calls.create_booking += 1;
                    state.booking_gate.clone()
                };
                if let Some(gate) = gate {
                    gate.notified().await;
                }

                let mut state = self.lock();
                if state.offline {
                    return Err(offline());
                }
                let event = state
                    .events
                    .iter()
                    .find(|event| event.id == event_id)
                    .cloned()
                    .ok_or_else(|| rejected(404, "Event not found"))?;
                if !event.slots.contains(&booking.slot) {
                    return Err(rejected(400, "Slot not valid"));
                }
                let existing = Self::event_bookings(&state, event_id);
                if existing.iter().any(|b| {
                    b.slot == booking.slot && b.attendee_email == booking.attendee_email
                }) {
                    return Err(rejected(400, "You have already booked this slot."));
                }
                let taken = existing.iter().filter(|b| b.slot == booking.slot).count();
                if taken >= event.max_bookings as usize {
                    return Err(rejected(400, "Slot already fully booked"));
                }

                state.next_booking_id += 1;
                let created = Booking {
                    id: state.next_booking_id,
                    event_id,
                    attendee_name: booking.attendee_name,
                    attendee_email: booking.attendee_email,
                    booked_at: booking.booked_at,
                    slot: booking.slot,
                };
                state.bookings.push(created.clone());
                Ok(created)
            })
        }

        fn list_user_bookings(&self, email: &str) -> BoxFuture<'_, Vec<Booking>, ApiError> {
            let email = email.to_string();
            Box::pin(async move {
                let mut state = self.lock();
                state.calls.list_user_bookings += 1;
                if state.offline {
                    return Err(offline());
                }
                Ok(state
                    .bookings
                    .iter()
                    .filter(|booking| booking.attendee_email == email)
                    .cloned()
                    .collect())
            })
        }
    }
}
