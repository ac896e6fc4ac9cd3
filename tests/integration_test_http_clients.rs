mod common;

use axum::http::StatusCode;
use chrono_tz::Tz;
use common::{date, rendered, slot, MockServer};
use pet_booking::config::Config;
use pet_booking::domain::models::{booking::BookingRequest, session::UserSession};
use pet_booking::domain::ports::AvailabilityView;
use pet_booking::domain::services::availability_editor::AvailabilityEditor;
use pet_booking::error::AppError;
use pet_booking::infra::factory::bootstrap_state;
use pet_booking::state::AppState;
use serde_json::json;
use uuid::Uuid;

fn state_for(server: &MockServer, token: Option<&str>) -> AppState {
    let mut session = UserSession::new("user-1".into(), "Sam Rivera".into(), Tz::UTC);
    if let Some(token) = token {
        session = session.with_token(token.to_string());
    }
    bootstrap_state(&server.config(), session).unwrap()
}

fn booking() -> BookingRequest {
    BookingRequest {
        date: date("2024-12-05"),
        time: slot("09:00"),
        pet_id: "pet-1".into(),
        description: "Weekly grooming session".into(),
        owner_name: "Sam Rivera".into(),
        owner_email: "sam@example.com".into(),
        owner_phone: "5551234567".into(),
    }
}

fn two_days() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "providerId": "prov-1",
            "availability": [
                {
                    "date": "2024-12-05",
                    "allTimeSlots": ["09:00", "10:00", "14:00"],
                    "bookedTimeSlots": ["10:00"],
                    "availableTimeSlots": ["14:00", "09:00"],
                    "isAvailable": true
                },
                {
                    "date": "2024-12-06",
                    "allTimeSlots": ["11:00"],
                    "bookedTimeSlots": ["11:00"],
                    "availableTimeSlots": [],
                    "isAvailable": false
                }
            ]
        }
    })
}

#[tokio::test]
async fn test_bookable_view_uses_available_slots() {
    let server = MockServer::start().await;
    *server.state.availability.lock().unwrap() = two_days();
    let state = state_for(&server, None);

    let map = state.availability_api.fetch("prov-1", AvailabilityView::Bookable).await.unwrap();

    assert_eq!(rendered(map.slots(date("2024-12-05"))), vec!["09:00", "14:00"]);
    assert!(!map.contains_date(date("2024-12-06")));
}

#[tokio::test]
async fn test_configured_view_uses_all_slots() {
    let server = MockServer::start().await;
    *server.state.availability.lock().unwrap() = two_days();
    let state = state_for(&server, None);

    let map = state.availability_api.fetch("prov-1", AvailabilityView::Configured).await.unwrap();

    assert_eq!(rendered(map.slots(date("2024-12-05"))), vec!["09:00", "10:00", "14:00"]);
    assert_eq!(rendered(map.slots(date("2024-12-06"))), vec!["11:00"]);
}

#[tokio::test]
async fn test_malformed_entries_are_skipped() {
    let server = MockServer::start().await;
    *server.state.availability.lock().unwrap() = json!({
        "success": true,
        "data": {
            "providerId": "prov-1",
            "availability": [
                { "date": "05/12/2024", "availableTimeSlots": ["09:00"], "isAvailable": true },
                { "date": "2024-12-07", "availableTimeSlots": ["9am", "25:00", "10:30"], "isAvailable": true },
                { "date": "2024-12-08", "availableTimeSlots": ["noon"], "isAvailable": true }
            ]
        }
    });
    let state = state_for(&server, None);

    let map = state.availability_api.fetch("prov-1", AvailabilityView::Bookable).await.unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(rendered(map.slots(date("2024-12-07"))), vec!["10:30"]);
}

#[tokio::test]
async fn test_unsuccessful_envelope_is_rejected() {
    let server = MockServer::start().await;
    *server.state.availability.lock().unwrap() = json!({ "success": false, "error": "Provider not found" });
    let state = state_for(&server, None);

    match state.availability_api.fetch("missing", AvailabilityView::Bookable).await {
        Err(AppError::Rejected(reason)) => assert_eq!(reason, "Provider not found"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_editor_commit_puts_flat_records() {
    let server = MockServer::start().await;
    *server.state.availability.lock().unwrap() = two_days();
    let state = state_for(&server, Some("provider-token"));

    let mut editor: AvailabilityEditor = state.availability_editor("prov-1").await.unwrap();
    editor.select_date(date("2024-12-06"));
    editor.clear_day().unwrap();
    editor.select_date(date("2024-12-09"));
    editor.add_slot(slot("16:00")).unwrap();
    editor.add_slot(slot("08:30")).unwrap();

    editor.commit(state.availability_api.as_ref(), "prov-1").await.unwrap();

    let commits = server.state.commits.lock().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(
        commits[0],
        json!([
            { "date": "2024-12-05", "time": ["09:00", "10:00", "14:00"] },
            { "date": "2024-12-09", "time": ["08:30", "16:00"] }
        ])
    );
}

#[tokio::test]
async fn test_empty_commit_sends_empty_array() {
    let server = MockServer::start().await;
    let state = state_for(&server, None);

    let mut editor = state.availability_editor("prov-1").await.unwrap();
    editor.commit(state.availability_api.as_ref(), "prov-1").await.unwrap();

    let commits = server.state.commits.lock().unwrap();
    assert_eq!(commits.as_slice(), &[json!([])]);
}

#[tokio::test]
async fn test_commit_rejection_keeps_staged_edits() {
    let server = MockServer::start().await;
    *server.state.commit_reply.lock().unwrap() = (StatusCode::OK, json!({ "success": false, "error": "Date is in the past" }));
    let state = state_for(&server, None);

    let mut editor = state.availability_editor("prov-1").await.unwrap();
    editor.select_date(date("2024-12-09"));
    editor.add_slot(slot("16:00")).unwrap();

    match editor.commit(state.availability_api.as_ref(), "prov-1").await {
        Err(AppError::Rejected(reason)) => assert_eq!(reason, "Date is in the past"),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(editor.has_unsaved_changes());
}

#[tokio::test]
async fn test_booking_rejection_carries_server_reason() {
    let server = MockServer::start().await;
    *server.state.booking_reply.lock().unwrap() = (StatusCode::OK, json!({ "success": false, "error": "Slot already booked" }));
    let state = state_for(&server, None);

    let err = state.booking_api.book("prov-1", &booking()).await.unwrap_err();
    assert!(matches!(err, AppError::Rejected(_)));
    assert_eq!(err.user_message(), "Slot already booked");
}

#[tokio::test]
async fn test_server_error_status_is_reported() {
    let server = MockServer::start().await;
    *server.state.booking_reply.lock().unwrap() = (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "database unavailable" }));
    let state = state_for(&server, None);

    match state.booking_api.book("prov-1", &booking()).await {
        Err(AppError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let config = Config {
        api_base_url: "http://127.0.0.1:1/api".to_string(),
        ..Config::default()
    };
    let state = bootstrap_state(&config, UserSession::anonymous(Tz::UTC)).unwrap();

    let err = state.pet_api.list_pets().await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert_eq!(err.user_message(), "Could not reach the server. Please try again.");
}

#[tokio::test]
async fn test_pet_list_accepts_bare_and_wrapped_shapes() {
    let server = MockServer::start().await;
    let state = state_for(&server, None);

    *server.state.pets.lock().unwrap() = json!([
        { "_id": "pet-1", "name": "Rex", "type": "Dog", "breed": "Beagle", "img": "rex.png" },
        { "id": "pet-2", "name": "Mittens" }
    ]);
    let pets = state.pet_api.list_pets().await.unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[0].label(), "Rex (Dog, Beagle)");
    assert_eq!(pets[0].image.as_deref(), Some("rex.png"));
    assert_eq!(pets[1].id, "pet-2");
    assert_eq!(pets[1].label(), "Mittens");

    *server.state.pets.lock().unwrap() = json!({ "success": true, "data": [{ "_id": "pet-3", "name": "Kiwi", "type": "Bird" }] });
    let pets = state.pet_api.list_pets().await.unwrap();
    assert_eq!(pets.len(), 1);
    assert_eq!(pets[0].kind, "Bird");

    *server.state.pets.lock().unwrap() = json!({ "success": false, "message": "Session expired" });
    assert!(matches!(state.pet_api.list_pets().await, Err(AppError::Rejected(_))));
}

#[tokio::test]
async fn test_requests_carry_bearer_token_and_request_id() {
    let server = MockServer::start().await;
    let state = state_for(&server, Some("abc"));
    state.pet_api.list_pets().await.unwrap();
    state.booking_api.book("prov-1", &booking()).await.unwrap();

    let auth = server.state.auth_headers.lock().unwrap();
    assert_eq!(auth.as_slice(), &[Some("Bearer abc".to_string()), Some("Bearer abc".to_string())]);

    let ids = server.state.request_ids.lock().unwrap();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(ids.iter().all(|id| Uuid::parse_str(id).is_ok()));
}

#[tokio::test]
async fn test_anonymous_requests_send_no_authorization() {
    let server = MockServer::start().await;
    let state = state_for(&server, None);
    state.pet_api.list_pets().await.unwrap();

    let auth = server.state.auth_headers.lock().unwrap();
    assert_eq!(auth.as_slice(), &[None::<String>]);
}
