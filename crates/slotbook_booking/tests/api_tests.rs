use reqwest::Client;
use serde_json::json;
use slotbook_booking::service::BookingServiceError;
use slotbook_booking::HttpBookingBackend;
use slotbook_common::models::{NewBooking, NewEvent};
use slotbook_common::{ApiError, BookingBackend, ErrorDetail};
use slotbook_config::ApiConfig;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fixtures::{booking_json, detail_json, event_json, http_backend, TEN};

#[tokio::test]
async fn test_get_event_decodes_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json(1, &[TEN], 2)))
        .expect(1)
        .mount(&server)
        .await;

    let event = http_backend(&server).get_event(1).await.unwrap();
    assert_eq!(event.id, 1);
    assert_eq!(event.slots, vec![TEN.to_string()]);
    assert_eq!(event.max_bookings, 2);
    assert_eq!(event.organizer.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn test_event_without_slot_list_is_data_shape() {
    let server = MockServer::start().await;
    let mut body = event_json(1, &[TEN], 1);
    body["slots"] = json!("2024-01-01T10:00:00Z");
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = http_backend(&server).get_event(1).await.unwrap_err();
    assert!(matches!(err, ApiError::DataShape(_)), "got {err:?}");
}

#[tokio::test]
async fn test_event_with_zero_capacity_is_data_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(event_json(1, &[TEN], 0)))
        .mount(&server)
        .await;

    let err = http_backend(&server).get_event(1).await.unwrap_err();
    assert!(matches!(err, ApiError::DataShape(reason) if reason.contains("max_bookings")));
}

#[tokio::test]
async fn test_bookings_list_uses_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/3/bookings/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([booking_json(1, 3, TEN, "ada@example.com")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let bookings = http_backend(&server).list_event_bookings(3).await.unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].attendee_email, "ada@example.com");
}

#[tokio::test]
async fn test_create_booking_posts_payload() {
    let server = MockServer::start().await;
    let payload = NewBooking {
        event_id: 1,
        attendee_name: "Ada Lovelace".to_string(),
        attendee_email: "ada@example.com".to_string(),
        slot: TEN.to_string(),
        booked_at: "2024-01-01T08:00:00.000Z".to_string(),
    };
    Mock::given(method("POST"))
        .and(path("/events/1/bookings"))
        .and(body_json(json!({
            "event_id": 1,
            "attendee_name": "Ada Lovelace",
            "attendee_email": "ada@example.com",
            "slot": TEN,
            "booked_at": "2024-01-01T08:00:00.000Z"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(booking_json(9, 1, TEN, "ada@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let booking = http_backend(&server).create_booking(1, payload).await.unwrap();
    assert_eq!(booking.id, 9);
    assert_eq!(booking.slot, TEN);
}

#[tokio::test]
async fn test_rejection_keeps_string_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/1/bookings"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(detail_json(json!("Slot already fully booked"))),
        )
        .mount(&server)
        .await;

    let payload = NewBooking {
        event_id: 1,
        attendee_name: "Ada".to_string(),
        attendee_email: "ada@example.com".to_string(),
        slot: TEN.to_string(),
        booked_at: "2024-01-01T08:00:00.000Z".to_string(),
    };
    let err = http_backend(&server).create_booking(1, payload).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 400,
            detail: Some(ErrorDetail::Message("Slot already fully booked".to_string())),
        }
    );
}

#[tokio::test]
async fn test_field_errors_join_locations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(detail_json(json!([
            {"loc": ["body", "slots", 0], "msg": "invalid datetime format", "type": "value_error"},
            {"loc": ["body", "title"], "msg": "field required", "type": "missing"}
        ]))))
        .mount(&server)
        .await;

    let new_event = NewEvent {
        title: "x".to_string(),
        description: "y".to_string(),
        start_time: "2024-01-01T09:00".to_string(),
        end_time: "2024-01-01T12:00".to_string(),
        organizer: "Ada".to_string(),
        slots: vec![TEN.to_string()],
        max_bookings: 1,
    };
    let err = http_backend(&server).create_event(new_event).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(
        err.detail_message().as_deref(),
        Some("body.slots.0: invalid datetime format\nbody.title: field required")
    );
}

#[tokio::test]
async fn test_error_page_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let err = http_backend(&server).list_events().await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            status: 502,
            detail: None
        }
    );
}

#[tokio::test]
async fn test_user_email_is_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/a%2Fb@example.com/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let bookings = http_backend(&server)
        .list_user_bookings("a/b@example.com")
        .await
        .unwrap();
    assert!(bookings.is_empty());
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/events/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([event_json(1, &[TEN], 1)])))
        .expect(1)
        .mount(&server)
        .await;

    let backend =
        HttpBookingBackend::new(&ApiConfig::with_base_url(format!("{}/api/", server.uri())))
            .unwrap();
    assert_eq!(backend.base_url().path(), "/api/");
    assert!(format!("{backend:?}").contains("/api/"));
    assert_eq!(backend.list_events().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let backend =
        HttpBookingBackend::new(&ApiConfig::with_base_url(fixtures::unreachable_base_url()))
            .unwrap();
    let err = backend.list_events().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let err = HttpBookingBackend::with_client(Client::new(), "not a url").unwrap_err();
    assert!(matches!(err, BookingServiceError::InvalidBaseUrl { .. }));

    let err = HttpBookingBackend::with_client(Client::new(), "mailto:ada@example.com").unwrap_err();
    assert!(matches!(err, BookingServiceError::InvalidBaseUrl { .. }));
}
