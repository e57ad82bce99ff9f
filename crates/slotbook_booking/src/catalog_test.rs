#[cfg(test)]
mod tests {
    use crate::catalog::{
        Catalog, EventDraft, EVENTS_FETCH_FAILED, MY_BOOKINGS_NETWORK_ERROR,
    };
    use crate::error::BookingError;
    use crate::logic::EMAIL_INVALID;
    use crate::service::mock::MockBookingBackend;
    use slotbook_common::models::Booking;
    use slotbook_common::CancellationToken;
    use std::sync::Arc;

    fn valid_draft() -> EventDraft {
        EventDraft {
            title: "Office hours".to_string(),
            description: "Bring questions".to_string(),
            start_time: "2024-01-01T09:00".to_string(),
            end_time: "2024-01-01T12:00".to_string(),
            organizer: "Ada".to_string(),
            slots: vec![
                "2024-01-01T10:00:00Z".to_string(),
                "2024-01-01T11:00".to_string(),
            ],
            max_bookings: 2,
        }
    }

    fn validation_message(draft: &EventDraft) -> String {
        match draft.validate() {
            Err(BookingError::Validation(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_event_draft_presence_checks_in_order() {
        let mut draft = EventDraft::default();
        assert_eq!(validation_message(&draft), "Title is required");
        draft.title = "Office hours".to_string();
        assert_eq!(validation_message(&draft), "Description is required");
        draft.description = "Bring questions".to_string();
        assert_eq!(validation_message(&draft), "Start time is required");
        draft.start_time = "tomorrow".to_string();
        assert_eq!(validation_message(&draft), "End time is required");
        draft.end_time = "later".to_string();
        assert_eq!(validation_message(&draft), "Organizer is required");
        draft.organizer = "Ada".to_string();
        assert_eq!(validation_message(&draft), "At least one valid slot is required");
    }

    #[test]
    fn test_event_draft_format_checks() {
        let mut draft = valid_draft();
        draft.slots.push("  ".to_string());
        assert_eq!(validation_message(&draft), "At least one valid slot is required");

        let mut draft = valid_draft();
        draft.slots.clear();
        assert_eq!(validation_message(&draft), "At least one valid slot is required");

        let mut draft = valid_draft();
        draft.max_bookings = 0;
        draft.slots.push("not a date".to_string());
        assert_eq!(validation_message(&draft), "Max bookings must be at least 1");

        let mut draft = valid_draft();
        draft.slots.push("not a date".to_string());
        assert_eq!(validation_message(&draft), "Slots must be valid ISO8601 dates");

        let mut draft = valid_draft();
        draft.start_time = "Monday".to_string();
        assert_eq!(validation_message(&draft), "Start time must be valid ISO8601 date");

        let mut draft = valid_draft();
        draft.end_time = "Monday".to_string();
        assert_eq!(validation_message(&draft), "End time must be valid ISO8601 date");
    }

    #[test]
    fn test_event_draft_from_json_defaults() {
        let draft: EventDraft = serde_json::from_str(r#"{"title": "Standup"}"#).unwrap();
        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.max_bookings, 1);
        assert_eq!(draft.slots, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_create_then_list_events() {
        let backend = Arc::new(MockBookingBackend::new());
        let catalog = Catalog::new(backend.clone(), CancellationToken::new());

        let created = catalog.create_event(&valid_draft()).await.unwrap();
        assert_eq!(created.max_bookings, 2);
        assert_eq!(created.slots.len(), 2);

        let events = catalog.list_events().await.unwrap();
        assert_eq!(events, vec![created]);
    }

    #[tokio::test]
    async fn test_invalid_event_draft_is_not_sent() {
        let backend = Arc::new(MockBookingBackend::new());
        let catalog = Catalog::new(backend.clone(), CancellationToken::new());

        let result = catalog.create_event(&EventDraft::default()).await;
        assert!(result.unwrap_err().is_validation());
        assert_eq!(backend.calls().create_event, 0);
    }

    #[tokio::test]
    async fn test_list_events_offline() {
        let backend = Arc::new(MockBookingBackend::new());
        backend.set_offline(true);
        let catalog = Catalog::new(backend, CancellationToken::new());

        assert_eq!(
            catalog.list_events().await,
            Err(BookingError::Network(EVENTS_FETCH_FAILED.to_string()))
        );
    }

    #[tokio::test]
    async fn test_my_bookings_filters_by_email() {
        let backend = Arc::new(MockBookingBackend::new());
        for (id, email) in [(1, "ada@example.com"), (2, "grace@example.com"), (3, "ada@example.com")] {
            backend.insert_booking(Booking {
                id,
                event_id: id,
                attendee_name: "Someone".to_string(),
                attendee_email: email.to_string(),
                booked_at: "2024-01-01T00:00:00Z".to_string(),
                slot: "2024-01-02T10:00:00Z".to_string(),
            });
        }
        let catalog = Catalog::new(backend, CancellationToken::new());

        let mine = catalog.my_bookings("ada@example.com").await.unwrap();
        assert_eq!(mine.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_my_bookings_checks_email_first() {
        let backend = Arc::new(MockBookingBackend::new());
        let catalog = Catalog::new(backend.clone(), CancellationToken::new());

        assert_eq!(
            catalog.my_bookings("ada").await,
            Err(BookingError::Validation(EMAIL_INVALID.to_string()))
        );
        assert_eq!(backend.calls().total(), 0);

        backend.set_offline(true);
        assert_eq!(
            catalog.my_bookings("ada@example.com").await,
            Err(BookingError::Network(MY_BOOKINGS_NETWORK_ERROR.to_string()))
        );
    }

    #[tokio::test]
    async fn test_cancelled_catalog() {
        let token = CancellationToken::new();
        let catalog = Catalog::new(Arc::new(MockBookingBackend::new()), token.clone());
        token.cancel();

        assert_eq!(catalog.list_events().await, Err(BookingError::Cancelled));
    }
}
