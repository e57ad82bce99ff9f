// --- File: crates/slotbook_common/src/services.rs ---
//! Service abstraction for the booking backend.
//!
//! Coordinators talk to the backend only through [`BookingBackend`], so tests can
//! swap the HTTP implementation for an in-memory one.

use std::future::Future;
use std::pin::Pin;

use crate::error::ApiError;
use crate::models::{Booking, Event, NewBooking, NewEvent};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations offered by the booking backend.
///
/// Implementations report raw outcomes as [`ApiError`]; deciding what the user
/// should read is left to the caller.
pub trait BookingBackend: Send + Sync {
    /// `GET /events/`
    fn list_events(&self) -> BoxFuture<'_, Vec<Event>, ApiError>;

    /// `POST /events/`
    fn create_event(&self, event: NewEvent) -> BoxFuture<'_, Event, ApiError>;

    /// `GET /events/{id}`
    fn get_event(&self, event_id: i64) -> BoxFuture<'_, Event, ApiError>;

    /// `GET /events/{id}/bookings/`
    fn list_event_bookings(&self, event_id: i64) -> BoxFuture<'_, Vec<Booking>, ApiError>;

    /// `POST /events/{id}/bookings`
    fn create_booking(
        &self,
        event_id: i64,
        booking: NewBooking,
    ) -> BoxFuture<'_, Booking, ApiError>;

    /// `GET /users/{email}/bookings`
    fn list_user_bookings(&self, email: &str) -> BoxFuture<'_, Vec<Booking>, ApiError>;
}
