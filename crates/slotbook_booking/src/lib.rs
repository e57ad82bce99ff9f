// --- File: crates/slotbook_booking/src/lib.rs ---
// Declare modules within this crate
pub mod catalog;
#[cfg(test)]
mod catalog_test;
pub mod coordinator;
pub mod error;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod service;
pub mod timezone;

pub use catalog::{Catalog, EventDraft};
pub use coordinator::{BookingCoordinator, SubmitState};
pub use error::BookingError;
pub use logic::{BookingDraft, Occupancy, SlotOption};
pub use service::HttpBookingBackend;
