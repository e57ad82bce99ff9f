// --- File: crates/slotbook_booking/src/coordinator.rs ---
//! Availability and booking coordinator for a single event view.
//!
//! A [`BookingCoordinator`] owns the view's event, its bookings snapshot, the derived
//! [`Occupancy`] and the attendee's [`BookingDraft`]. Clones share the same view, so a
//! render loop and input handlers can hold one each.
//!
//! The view lock is only taken for short synchronous sections; backend calls run
//! without it and are raced against the view's [`CancellationToken`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use slotbook_common::models::{Booking, Event};
use slotbook_common::{ApiError, BookingBackend, CancellationToken};
use tracing::{debug, info, warn};

use crate::error::BookingError;
use crate::logic::{build_submission, compute_occupancy, slot_options, BookingDraft, Occupancy, SlotOption};

pub const BOOKING_FAILED: &str = "Booking failed. Please try again.";
pub const BOOKING_NETWORK_ERROR: &str = "A network error occurred. Please try again.";
pub const EVENT_NOT_FOUND: &str = "Event not found";
pub const BOOKING_CONFIRMED: &str =
    "Your booking was successful! Check your email for confirmation.";
pub const REFRESH_FAILED_NOTICE: &str =
    "Booking saved, but the booking list could not be refreshed.";

/// Submission state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug)]
struct ViewState {
    event: Event,
    bookings: Vec<Booking>,
    occupancy: Occupancy,
    draft: BookingDraft,
    state: SubmitState,
    last_error: Option<String>,
    notice: Option<String>,
}

fn lock_view(view: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Puts the view back to `Idle` however the submission ends, including when the
/// submitting future is dropped half way.
struct SubmittingGuard<'a> {
    view: &'a Mutex<ViewState>,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        lock_view(self.view).state = SubmitState::Idle;
    }
}

/// Coordinates slot availability and booking submission for one event.
#[derive(Clone)]
pub struct BookingCoordinator {
    backend: Arc<dyn BookingBackend>,
    token: CancellationToken,
    view: Arc<Mutex<ViewState>>,
}

impl BookingCoordinator {
    /// Builds a view from data the caller already holds.
    pub fn new(
        backend: Arc<dyn BookingBackend>,
        event: Event,
        bookings: Vec<Booking>,
        token: CancellationToken,
    ) -> Self {
        let occupancy = compute_occupancy(&event.slots, &bookings);
        Self {
            backend,
            token,
            view: Arc::new(Mutex::new(ViewState {
                event,
                bookings,
                occupancy,
                draft: BookingDraft::default(),
                state: SubmitState::Idle,
                last_error: None,
                notice: None,
            })),
        }
    }

    /// Fetches event `event_id` and its bookings concurrently and builds the view.
    ///
    /// The event must load. A bookings list that cannot be fetched is replaced by an
    /// empty one; a bookings list that arrives malformed fails the load.
    pub async fn load(
        backend: Arc<dyn BookingBackend>,
        event_id: i64,
        token: CancellationToken,
    ) -> Result<Self, BookingError> {
        debug!("Loading event {} and its bookings", event_id);
        let (event, bookings) = token
            .run(async {
                tokio::join!(
                    backend.get_event(event_id),
                    backend.list_event_bookings(event_id)
                )
            })
            .await?;

        let event = event
            .map_err(|err| BookingError::from_api(err, EVENT_NOT_FOUND, BOOKING_NETWORK_ERROR))?;
        let bookings = match bookings {
            Ok(bookings) => bookings,
            Err(ApiError::DataShape(reason)) => return Err(BookingError::DataShape(reason)),
            Err(err) => {
                warn!("Bookings for event {} unavailable, showing none: {}", event_id, err);
                Vec::new()
            }
        };

        info!(
            "Loaded event {} with {} slots and {} bookings",
            event.id,
            event.slots.len(),
            bookings.len()
        );
        Ok(Self::new(backend, event, bookings, token))
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        lock_view(&self.view)
    }

    // --- Snapshot accessors ---

    pub fn event(&self) -> Event {
        self.lock().event.clone()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.lock().bookings.clone()
    }

    pub fn occupancy(&self) -> Occupancy {
        self.lock().occupancy.clone()
    }

    pub fn draft(&self) -> BookingDraft {
        self.lock().draft.clone()
    }

    pub fn state(&self) -> SubmitState {
        self.lock().state
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmitState::Submitting
    }

    /// Display message of the last failed submission.
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    /// Informational message left by the last successful submission.
    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    /// Picker entries with times rendered in `time_zone`.
    pub fn slot_options(&self, time_zone: &str) -> Vec<SlotOption> {
        let view = self.lock();
        slot_options(&view.event, &view.occupancy, time_zone)
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.token.is_cancelled() && self.state() == SubmitState::Idle
    }

    // --- Draft editing ---

    pub fn set_name(&self, name: impl Into<String>) {
        let mut view = self.lock();
        view.draft.attendee_name = name.into();
        view.last_error = None;
    }

    pub fn set_email(&self, email: impl Into<String>) {
        let mut view = self.lock();
        view.draft.attendee_email = email.into();
        view.last_error = None;
    }

    /// Selects `slot`. Full slots are not refused here; the backend has the final say.
    pub fn select_slot(&self, slot: impl Into<String>) {
        let mut view = self.lock();
        view.draft.slot = slot.into();
        view.last_error = None;
    }

    // --- Submission ---

    /// Validates the draft, submits it, then refreshes the bookings snapshot.
    ///
    /// Validation failures never reach the backend. On any failure the draft and the
    /// snapshot stay as they were and the message lands in [`last_error`](Self::last_error).
    pub async fn submit(&self) -> Result<Booking, BookingError> {
        if self.token.is_cancelled() {
            return Err(BookingError::Cancelled);
        }

        let (event_id, payload) = {
            let mut view = self.lock();
            if view.state == SubmitState::Submitting {
                return Err(BookingError::SubmissionInFlight);
            }
            view.last_error = None;
            view.notice = None;
            match build_submission(&view.draft, &view.event, Utc::now()) {
                Ok(payload) => {
                    view.state = SubmitState::Submitting;
                    (view.event.id, payload)
                }
                Err(err) => {
                    debug!("Booking draft rejected: {}", err);
                    view.last_error = Some(err.display_message());
                    return Err(err);
                }
            }
        };
        let _submitting = SubmittingGuard { view: &self.view };

        let created = match self
            .token
            .run(self.backend.create_booking(event_id, payload))
            .await?
        {
            Ok(created) => created,
            Err(err) => {
                let err = BookingError::from_api(err, BOOKING_FAILED, BOOKING_NETWORK_ERROR);
                warn!("Booking for event {} failed: {}", event_id, err);
                self.lock().last_error = Some(err.display_message());
                return Err(err);
            }
        };
        info!("Booking {} created for slot {}", created.id, created.slot);

        let refreshed = self
            .token
            .run(self.backend.list_event_bookings(event_id))
            .await?;

        let mut view = self.lock();
        view.draft = BookingDraft::default();
        match refreshed {
            Ok(bookings) => {
                view.occupancy = compute_occupancy(&view.event.slots, &bookings);
                view.bookings = bookings;
            }
            Err(err) => {
                warn!("Could not refresh bookings of event {}: {}", event_id, err);
                view.notice = Some(REFRESH_FAILED_NOTICE.to_string());
            }
        }
        Ok(created)
    }

    // --- Teardown ---

    /// Tears the view down. Pending calls resolve to [`BookingError::Cancelled`]
    /// and every later load or submit is refused.
    pub fn teardown(&self) {
        debug!("Tearing down view");
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }
}
