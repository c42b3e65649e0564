use axum::http::StatusCode;
use chrono::Duration;
use tower::ServiceExt;

use crate::modules::reservations::core::ports::ReservationStore;
use crate::shell::http::router;
use crate::tests::fixtures::app::{json_request, read_json, test_state};
use crate::tests::fixtures::reservations::ReservationBuilder;

const STAFF: Option<(&str, &str)> = Some(("staff-1", "staff"));

#[tokio::test]
async fn a_staff_booking_runs_through_check_in_check_out_and_adjustment() {
    let (state, clock) = test_state();
    let app = router(state);
    let slot = ReservationBuilder::new().build().slot;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/reservations",
            STAFF,
            r#"{"user_id":"user-9","device_type_id":"type-a","date":"2025-03-01","start_hour":14,"end_hour":16,"preferred_device_id":"device-a-3"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = read_json(response).await;
    let booked = &json["reservations"][0];
    assert_eq!(booked["status"], "approved");
    assert_eq!(booked["device_id"], "device-a-3");
    assert_eq!(json["preference_honored"], true);
    let id = booked["reservation_id"].as_str().unwrap().to_string();

    clock.set(slot.starts_at() - Duration::minutes(5));
    let response = app
        .clone()
        .oneshot(json_request("POST", &format!("/reservations/{id}/check-in"), STAFF, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    clock.set(slot.starts_at() + Duration::minutes(90));
    let response = app
        .clone()
        .oneshot(json_request("POST", &format!("/reservations/{id}/check-out"), STAFF, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["status"], "completed");
    assert_eq!(json["actual_end_time"], "2025-03-01T15:30:00");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/reservations/{id}/time-adjustments"),
            STAFF,
            r#"{"actual_start":"2025-03-01T14:00:00","actual_end":"2025-03-01T15:30:00","reason":"early_finish"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("GET", &format!("/reservations/{id}/audit"), STAFF, ""))
        .await
        .unwrap();
    let trail = read_json(response).await;
    let kinds: Vec<_> = trail
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event"]["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "ReservationRequestedV1",
            "ReservationTransitionedV1",
            "ReservationTransitionedV1",
            "ReservationTransitionedV1",
            "ReservationTimeAdjustedV1",
        ]
    );
    assert_eq!(trail[2]["event"]["transition"], "auto_start");

    let response = app
        .oneshot(json_request(
            "GET",
            "/availability?device_type_id=type-a&date=2025-03-01&start_hour=15&end_hour=16",
            None,
            "",
        ))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["available_count"], 3);
}

#[tokio::test]
async fn unclaimed_bookings_are_released_once_availability_is_read_past_the_grace() {
    let (state, clock) = test_state();
    let app = router(state.clone());
    let slot = ReservationBuilder::new().build().slot;
    let booking = r#"{"user_id":"user-1","device_type_id":"type-a","date":"2025-03-01","start_hour":14,"end_hour":16}"#;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/reservations",
            STAFF,
            r#"{"user_id":"user-1","device_type_id":"type-a","date":"2025-03-01","start_hour":14,"end_hour":16,"units":3}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/reservations", STAFF, booking))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = read_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("already taken"));

    let rest_of_slot = "/availability?device_type_id=type-a&date=2025-03-01&start_hour=15&end_hour=16";
    clock.set(slot.starts_at() + Duration::minutes(10));
    let response = app
        .clone()
        .oneshot(json_request("GET", rest_of_slot, None, ""))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["available_count"], 0);

    clock.set(slot.starts_at() + Duration::minutes(31));
    let response = app
        .clone()
        .oneshot(json_request("GET", rest_of_slot, None, ""))
        .await
        .unwrap();
    assert_eq!(read_json(response).await["available_count"], 3);
    assert_eq!(state.store.no_show_count("user-1").await.unwrap(), 3);

    let response = app
        .oneshot(json_request("POST", "/reservations", STAFF, booking))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
