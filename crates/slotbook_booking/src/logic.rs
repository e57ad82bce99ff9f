use chrono::{DateTime, SecondsFormat, Utc};
use slotbook_common::models::{Booking, Event, NewBooking};
use std::collections::BTreeMap;

use crate::error::BookingError;
use crate::timezone::format_slot;

// --- Occupancy ---

/// Number of bookings recorded against each slot of one event, sorted by slot value.
///
/// Built in one go by [`compute_occupancy`] and never edited afterwards; when the
/// bookings change, a new map replaces the old one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    counts: BTreeMap<String, usize>,
}

impl Occupancy {
    /// Bookings held by `slot`. Unknown slots hold none.
    pub fn count(&self, slot: &str) -> usize {
        self.counts.get(slot).copied().unwrap_or(0)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.counts.contains_key(slot)
    }

    /// Number of distinct slots tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bookings counted across all slots.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(slot, count)| (slot.as_str(), *count))
    }
}

/// Counts `bookings` per slot of `slots`.
///
/// Every slot gets a key, starting at zero. Bookings pointing at a slot the event
/// does not offer are skipped: the backend may know slots this snapshot does not.
pub fn compute_occupancy(slots: &[String], bookings: &[Booking]) -> Occupancy {
    let mut counts: BTreeMap<String, usize> =
        slots.iter().map(|slot| (slot.clone(), 0)).collect();
    for booking in bookings {
        if let Some(count) = counts.get_mut(&booking.slot) {
            *count += 1;
        }
    }
    Occupancy { counts }
}

/// Whether `slot` can take one more booking.
pub fn is_slot_available(slot: &str, occupancy: &Occupancy, max_bookings: u32) -> bool {
    (occupancy.count(slot) as u64) < u64::from(max_bookings)
}

/// Bookings `slot` can still take.
pub fn remaining_capacity(slot: &str, occupancy: &Occupancy, max_bookings: u32) -> usize {
    (max_bookings as usize).saturating_sub(occupancy.count(slot))
}

// --- Slot choices ---

/// One entry of the slot picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotOption {
    pub slot: String,
    pub booked: usize,
    pub remaining: usize,
    /// `false` means the entry is shown but cannot be picked.
    pub available: bool,
    pub label: String,
}

/// Picker entries for every slot of `event`, in the event's order, with times shown in `time_zone`.
pub fn slot_options(event: &Event, occupancy: &Occupancy, time_zone: &str) -> Vec<SlotOption> {
    event
        .slots
        .iter()
        .map(|slot| {
            let booked = occupancy.count(slot);
            let remaining = remaining_capacity(slot, occupancy, event.max_bookings);
            let available = is_slot_available(slot, occupancy, event.max_bookings);
            let status = if available {
                format!("{remaining} available")
            } else {
                "Fully booked".to_string()
            };
            SlotOption {
                slot: slot.clone(),
                booked,
                remaining,
                available,
                label: format!("{} ({})", format_slot(slot, time_zone), status),
            }
        })
        .collect()
}

// --- Draft validation ---

/// What the attendee has typed so far. An empty `slot` means nothing is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingDraft {
    pub attendee_name: String,
    pub attendee_email: String,
    pub slot: String,
}

impl BookingDraft {
    pub fn new(
        attendee_name: impl Into<String>,
        attendee_email: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            attendee_name: attendee_name.into(),
            attendee_email: attendee_email.into(),
            slot: slot.into(),
        }
    }
}

pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const SLOT_REQUIRED: &str = "Please select a slot.";
pub const SLOT_UNKNOWN: &str = "Selected slot is not offered by this event.";

/// Accepts `local@domain.tld`: exactly one `@`, no whitespace anywhere, and a `.`
/// inside the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Checks `draft` against `event`, stopping at the first problem.
///
/// Order: name, email, slot.
pub fn validate_draft(draft: &BookingDraft, event: &Event) -> Result<(), BookingError> {
    if draft.attendee_name.trim().is_empty() {
        return Err(BookingError::Validation(NAME_REQUIRED.to_string()));
    }
    if draft.attendee_email.trim().is_empty() || !is_valid_email(&draft.attendee_email) {
        return Err(BookingError::Validation(EMAIL_INVALID.to_string()));
    }
    if draft.slot.is_empty() {
        return Err(BookingError::Validation(SLOT_REQUIRED.to_string()));
    }
    if !event.slots.iter().any(|slot| slot == &draft.slot) {
        return Err(BookingError::Validation(SLOT_UNKNOWN.to_string()));
    }
    Ok(())
}

/// Validates `draft` and builds the submission body, stamped with `now`.
pub fn build_submission(
    draft: &BookingDraft,
    event: &Event,
    now: DateTime<Utc>,
) -> Result<NewBooking, BookingError> {
    validate_draft(draft, event)?;
    Ok(NewBooking {
        event_id: event.id,
        attendee_name: draft.attendee_name.trim().to_string(),
        attendee_email: draft.attendee_email.clone(),
        slot: draft.slot.clone(),
        booked_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
