//! Integration tests for events and the registration ledger.

mod common;

use axum::http::{Method, StatusCode};
use common::{json_request, parse_response_body, request, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_register_until_full() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let event_id = app.create_event(&admin, Some(2)).await;
    let uri = format!("/api/v1/events/{}/register", event_id);

    for _ in 0..2 {
        let (_, member) = app.member().await;
        let response = app.send(request(Method::POST, &uri, Some(&member))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let (_, late) = app.member().await;
    let response = app.send(request(Method::POST, &uri, Some(&late))).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        parse_response_body(response).await["error"],
        "capacity_exceeded"
    );

    let response = app
        .send(request(
            Method::GET,
            &format!("/api/v1/events/{}", event_id),
            Some(&admin),
        ))
        .await;
    assert_eq!(parse_response_body(response).await["registered_count"], 2);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, member) = app.member().await;
    let event_id = app.create_event(&admin, None).await;
    let uri = format!("/api/v1/events/{}/register", event_id);

    let first = app.send(request(Method::POST, &uri, Some(&member))).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.send(request(Method::POST, &uri, Some(&member))).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        parse_response_body(second).await["error"],
        "already_registered"
    );
}

#[tokio::test]
async fn test_register_unknown_event_not_found() {
    let app = TestApp::new();
    let (_, member) = app.member().await;

    let uri = format!("/api/v1/events/{}/register", uuid::Uuid::new_v4());
    let response = app.send(request(Method::POST, &uri, Some(&member))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_events_ordered_by_date() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;
    let (_, member) = app.member().await;
    let now = chrono::Utc::now();

    for (title, days) in [("Later", 30), ("Past", -5), ("Sooner", 3)] {
        let response = app
            .send(json_request(
                Method::POST,
                "/api/v1/admin/events",
                Some(&admin),
                json!({
                    "title": title,
                    "event_date": (now + chrono::Duration::days(days)).to_rfc3339(),
                    "event_type": "networking"
                }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .send(request(Method::GET, "/api/v1/events", Some(&member)))
        .await;
    let titles: Vec<_> = parse_response_body(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Past", "Sooner", "Later"]);

    let response = app
        .send(request(Method::GET, "/api/v1/events?upcoming=true", Some(&member)))
        .await;
    assert_eq!(parse_response_body(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_member_cannot_create_event() {
    let app = TestApp::new();
    let (_, member) = app.member().await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/admin/events",
            Some(&member),
            json!({
                "title": "Unauthorized",
                "event_date": chrono::Utc::now().to_rfc3339(),
                "event_type": "panel"
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_zero_capacity_rejected() {
    let app = TestApp::new();
    let (_, admin) = app.admin().await;

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/admin/events",
            Some(&admin),
            json!({
                "title": "Nobody",
                "event_date": chrono::Utc::now().to_rfc3339(),
                "event_type": "panel",
                "max_attendees": 0
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
