// --- File: crates/services/slotbook_cli/src/commands.rs ---
use chrono_tz::Tz;
use slotbook_booking::coordinator::BOOKING_CONFIRMED;
use slotbook_booking::catalog::EVENT_CREATED;
use slotbook_booking::timezone::{format_slot, timezone_choices};
use slotbook_booking::{BookingCoordinator, BookingError, Catalog, EventDraft};
use slotbook_common::models::Booking;
use slotbook_common::{internal_error, SlotbookError};
use std::path::PathBuf;
use tracing::info;

use crate::app_state::AppState;

pub const USAGE: &str = "\
Usage:
  slotbook events
  slotbook show <event-id> [--tz ZONE]
  slotbook book <event-id> <name> <email> <slot>
  slotbook my-bookings <email> [--tz ZONE]
  slotbook create-event <json-file>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Events,
    Show {
        event_id: i64,
        time_zone: Option<String>,
    },
    Book {
        event_id: i64,
        name: String,
        email: String,
        slot: String,
    },
    MyBookings {
        email: String,
        time_zone: Option<String>,
    },
    CreateEvent {
        path: PathBuf,
    },
    Help,
}

fn usage_error(message: impl Into<String>) -> SlotbookError {
    SlotbookError::ParseError(format!("{}\n\n{}", message.into(), USAGE))
}

fn parse_event_id(value: &str) -> Result<i64, SlotbookError> {
    value
        .parse()
        .map_err(|_| usage_error(format!("`{value}` is not an event id")))
}

/// Splits `args` into positionals and an optional `--tz ZONE`.
fn split_time_zone(args: &[String]) -> Result<(Vec<&str>, Option<String>), SlotbookError> {
    let mut positionals = Vec::new();
    let mut time_zone = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--tz" {
            let zone = iter
                .next()
                .ok_or_else(|| usage_error("--tz needs a zone name"))?;
            if zone.parse::<Tz>().is_err() {
                return Err(usage_error(format!(
                    "Unknown time zone `{zone}`. Try one of: {}",
                    timezone_choices("UTC").join(", ")
                )));
            }
            time_zone = Some(zone.clone());
        } else {
            positionals.push(arg.as_str());
        }
    }
    Ok((positionals, time_zone))
}

impl Command {
    /// Parses the arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self, SlotbookError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        let (positionals, time_zone) = split_time_zone(rest)?;
        let command = match (name.as_str(), positionals.as_slice()) {
            ("events", []) => Command::Events,
            ("show", [event_id]) => Command::Show {
                event_id: parse_event_id(event_id)?,
                time_zone,
            },
            ("book", [event_id, name, email, slot]) => Command::Book {
                event_id: parse_event_id(event_id)?,
                name: name.to_string(),
                email: email.to_string(),
                slot: slot.to_string(),
            },
            ("my-bookings", [email]) => Command::MyBookings {
                email: email.to_string(),
                time_zone,
            },
            ("create-event", [path]) => Command::CreateEvent {
                path: PathBuf::from(*path),
            },
            ("help" | "-h" | "--help", _) => Command::Help,
            (other, _) => return Err(usage_error(format!("Unexpected arguments for `{other}`"))),
        };
        Ok(command)
    }
}

/// Prints the user-facing text of `err` and hands it on for logging.
fn report(err: BookingError) -> SlotbookError {
    eprintln!("{}", err.display_message());
    err.into()
}

pub async fn run(command: Command, state: &AppState) -> Result<(), SlotbookError> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Events => list_events(state).await,
        Command::Show {
            event_id,
            time_zone,
        } => show_event(state, event_id, state.time_zone(time_zone.as_deref())).await,
        Command::Book {
            event_id,
            name,
            email,
            slot,
        } => book(state, event_id, name, email, slot).await,
        Command::MyBookings { email, time_zone } => {
            my_bookings(state, &email, state.time_zone(time_zone.as_deref())).await
        }
        Command::CreateEvent { path } => create_event(state, path).await,
    }
}

async fn list_events(state: &AppState) -> Result<(), SlotbookError> {
    let catalog = Catalog::new(state.backend.clone(), state.token.clone());
    let events = catalog.list_events().await.map_err(report)?;
    if events.is_empty() {
        println!("No events yet.");
    }
    for event in events {
        println!(
            "#{} {} ({} slots, up to {} per slot)",
            event.id,
            event.title,
            event.slots.len(),
            event.max_bookings
        );
    }
    Ok(())
}

async fn load_view(state: &AppState, event_id: i64) -> Result<BookingCoordinator, SlotbookError> {
    BookingCoordinator::load(state.backend.clone(), event_id, state.token.clone())
        .await
        .map_err(report)
}

/// One line per existing booking, with its slot shown in `time_zone`.
fn booking_lines(bookings: &[Booking], time_zone: &str) -> Vec<String> {
    if bookings.is_empty() {
        return vec!["No bookings yet.".to_string()];
    }
    bookings
        .iter()
        .map(|booking| {
            format!(
                "{} ({}) — {}",
                booking.attendee_name,
                booking.attendee_email,
                format_slot(&booking.slot, time_zone)
            )
        })
        .collect()
}

async fn show_event(state: &AppState, event_id: i64, time_zone: &str) -> Result<(), SlotbookError> {
    let view = load_view(state, event_id).await?;
    let event = view.event();

    println!("{}", event.title);
    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        println!("{description}");
    }
    if let Some(organizer) = event.organizer.as_deref() {
        println!("Organized by {organizer}");
    }
    println!(
        "{} to {}",
        format_slot(&event.start_time, time_zone),
        format_slot(&event.end_time, time_zone)
    );
    println!("Slots (times in {time_zone}):");
    for option in view.slot_options(time_zone) {
        let marker = if option.available { " " } else { "x" };
        println!("  [{marker}] {}    {}", option.label, option.slot);
    }
    println!("Existing bookings:");
    for line in booking_lines(&view.bookings(), time_zone) {
        println!("  {line}");
    }
    Ok(())
}

async fn book(
    state: &AppState,
    event_id: i64,
    name: String,
    email: String,
    slot: String,
) -> Result<(), SlotbookError> {
    let view = load_view(state, event_id).await?;
    view.set_name(name);
    view.set_email(email);
    view.select_slot(slot);

    let booking = view.submit().await.map_err(report)?;
    info!("Booked slot {} of event {} as booking {}", booking.slot, event_id, booking.id);
    println!("{BOOKING_CONFIRMED}");
    if let Some(notice) = view.notice() {
        println!("{notice}");
    }
    Ok(())
}

async fn my_bookings(state: &AppState, email: &str, time_zone: &str) -> Result<(), SlotbookError> {
    let catalog = Catalog::new(state.backend.clone(), state.token.clone());
    let bookings = catalog.my_bookings(email).await.map_err(report)?;
    if bookings.is_empty() {
        println!("No bookings found for {email}.");
    }
    for booking in bookings {
        println!(
            "Event #{}: {} ({})",
            booking.event_id,
            format_slot(&booking.slot, time_zone),
            booking.attendee_name
        );
    }
    Ok(())
}

async fn create_event(state: &AppState, path: PathBuf) -> Result<(), SlotbookError> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| internal_error(format!("Cannot read {}: {}", path.display(), err)))?;
    let draft: EventDraft = serde_json::from_str(&raw)?;

    let catalog = Catalog::new(state.backend.clone(), state.token.clone());
    let event = catalog.create_event(&draft).await.map_err(report)?;
    println!("{EVENT_CREATED} (#{})", event.id);
    Ok(())
}
