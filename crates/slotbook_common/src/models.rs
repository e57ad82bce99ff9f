// --- File: crates/slotbook_common/src/models.rs ---

// Records exchanged with the booking backend.
//
// Incoming records are decoded through loosely-typed `*Record` structs and then
// checked, so a malformed payload surfaces as one decode error naming the problem
// instead of a half-filled value.

use serde::{Deserialize, Serialize};

/// An event with a fixed list of bookable slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// ISO 8601, treated as opaque.
    pub start_time: String,
    /// ISO 8601, treated as opaque.
    pub end_time: String,
    pub organizer: Option<String>,
    /// Slot timestamps in display order. Never empty.
    pub slots: Vec<String>,
    /// Bookings allowed per slot. Always at least 1.
    pub max_bookings: u32,
}

/// One attendee's booking of one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BookingRecord")]
pub struct Booking {
    pub id: i64,
    pub event_id: i64,
    pub attendee_name: String,
    pub attendee_email: String,
    pub booked_at: String,
    /// Equal to one of the owning event's slot values.
    pub slot: String,
}

/// Body of a booking submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBooking {
    pub event_id: i64,
    pub attendee_name: String,
    pub attendee_email: String,
    pub slot: String,
    pub booked_at: String,
}

/// Body of an event creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub organizer: String,
    pub slots: Vec<String>,
    pub max_bookings: u32,
}

#[derive(Deserialize)]
struct EventRecord {
    id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    organizer: Option<String>,
    slots: Option<Vec<String>>,
    max_bookings: Option<i64>,
}

#[derive(Deserialize)]
struct BookingRecord {
    id: Option<i64>,
    event_id: Option<i64>,
    attendee_name: Option<String>,
    attendee_email: Option<String>,
    booked_at: Option<String>,
    slot: Option<String>,
}

fn required<T>(value: Option<T>, record: &str, field: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("{record} is missing `{field}`"))
}

impl TryFrom<EventRecord> for Event {
    type Error = String;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let id = required(record.id, "event", "id")?;
        let slots = required(record.slots, "event", "slots")?;
        if slots.is_empty() {
            return Err(format!("event {id} has no slots"));
        }
        let max_bookings = required(record.max_bookings, "event", "max_bookings")?;
        let max_bookings = u32::try_from(max_bookings)
            .ok()
            .filter(|max| *max >= 1)
            .ok_or_else(|| format!("event {id} has invalid max_bookings {max_bookings}"))?;

        Ok(Event {
            id,
            title: required(record.title, "event", "title")?,
            description: record.description,
            start_time: required(record.start_time, "event", "start_time")?,
            end_time: required(record.end_time, "event", "end_time")?,
            organizer: record.organizer,
            slots,
            max_bookings,
        })
    }
}

impl TryFrom<BookingRecord> for Booking {
    type Error = String;

    fn try_from(record: BookingRecord) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: required(record.id, "booking", "id")?,
            event_id: required(record.event_id, "booking", "event_id")?,
            attendee_name: required(record.attendee_name, "booking", "attendee_name")?,
            attendee_email: required(record.attendee_email, "booking", "attendee_email")?,
            booked_at: required(record.booked_at, "booking", "booked_at")?,
            slot: required(record.slot, "booking", "slot")?,
        })
    }
}
