mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use appointment_cell::{appointment_routes, provider_routes};
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

use common::{Harness, NOW};

fn app(harness: &Harness) -> Router {
    Router::new()
        .nest("/appointments", appointment_routes(harness.state.clone()))
        .nest("/providers", provider_routes(harness.state.clone()))
}

fn bearer(id: &str) -> String {
    JwtTestUtils::bearer(&TestUser::with_id(id, "customer"), &TestConfig::default())
}

fn get(uri: &str, user_id: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, bearer(user_id))
        .body(Body::empty())
        .unwrap()
}

fn post_appointment(user_id: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/appointments")
        .header(header::AUTHORIZATION, bearer(user_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

// ==============================================================================
// AUTHENTICATION
// ==============================================================================

#[tokio::test]
async fn test_requests_without_token_are_unauthorized() {
    let harness = Harness::new(NOW);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/appointments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"provider_id": "P1", "date": "2030-05-10T14:00:00Z"}).to_string()))
        .unwrap();
    let (status, body) = send(app(&harness), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
    assert!(harness.appointments.inner.all().await.is_empty());

    let request = Request::builder()
        .uri("/providers/P1/day-availability?day=10&month=5&year=2030")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(&harness), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let harness = Harness::new(NOW);
    let token = JwtTestUtils::create_invalid_signature_token(&TestUser::with_id("U1", "customer"));

    let request = Request::builder()
        .uri("/appointments/me?day=10&month=5&year=2030")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app(&harness), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ==============================================================================
// POST /appointments
// ==============================================================================

#[tokio::test]
async fn test_create_returns_persisted_appointment() {
    let harness = Harness::new(NOW);

    let (status, body) = send(
        app(&harness),
        post_appointment("U1", json!({"provider_id": "P1", "date": "2030-05-10T14:37:00Z"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider_id"], "P1");
    assert_eq!(body["user_id"], "U1");
    assert_eq!(body["date"], "2030-05-10T14:00:00Z");
    assert!(body["id"].is_string());
    assert_eq!(harness.notifications.all().await.len(), 1);
}

#[tokio::test]
async fn test_create_rule_violation_is_bad_request_with_message() {
    let harness = Harness::new(NOW);

    let cases = [
        (json!({"provider_id": "P1", "date": "2030-04-01T10:00:00Z"}), "You can`t create an appointment on a past date"),
        (json!({"provider_id": "U1", "date": "2030-05-10T10:00:00Z"}), "You can`t create an appointment with yourself"),
        (json!({"provider_id": "P1", "date": "2030-05-10T19:00:00Z"}), "You can only create appointments between 8:00 and 17:00"),
    ];

    for (request, message) in cases {
        let (status, body) = send(app(&harness), post_appointment("U1", request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": message}));
    }

    harness.appointments.seed("P1", "U9", "2030-05-10T11:00:00Z").await;
    let (status, body) = send(
        app(&harness),
        post_appointment("U1", json!({"provider_id": "P1", "date": "2030-05-10T11:30:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "This appointment is already booked");
}

#[tokio::test]
async fn test_create_with_unparseable_date_is_bad_request() {
    let harness = Harness::new(NOW);

    let (status, body) = send(
        app(&harness),
        post_appointment("U1", json!({"provider_id": "P1", "date": "next tuesday"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid date"));
    assert_eq!(harness.appointments.creates(), 0);
}

#[tokio::test]
async fn test_create_notification_failure_is_internal_error() {
    let harness = Harness::new(NOW).with_failing_notifications();

    let (status, body) = send(
        app(&harness),
        post_appointment("U1", json!({"provider_id": "P1", "date": "2030-05-10T14:00:00Z"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert_eq!(harness.appointments.inner.all().await.len(), 1);
}

// ==============================================================================
// GET /appointments/me
// ==============================================================================

#[tokio::test]
async fn test_me_lists_callers_own_agenda() {
    let harness = Harness::new(NOW);
    harness.appointments.seed("P1", "U1", "2030-05-10T09:00:00Z").await;
    harness.appointments.seed("P2", "U1", "2030-05-10T10:00:00Z").await;

    let (status, body) = send(app(&harness), get("/appointments/me?day=10&month=5&year=2030", "P1")).await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["user_id"], "U1");
    assert!(harness.cache.inner.contains("P1:2030-5-10").await);
}

// ==============================================================================
// PROVIDER AVAILABILITY
// ==============================================================================

#[tokio::test]
async fn test_day_availability_shape() {
    let harness = Harness::new(NOW);
    harness.appointments.seed("P1", "U1", "2030-05-10T08:00:00Z").await;

    let (status, body) = send(
        app(&harness),
        get("/providers/P1/day-availability?day=10&month=5&year=2030", "U1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0], json!({"hour": 8, "available": false}));
    assert_eq!(items[9], json!({"hour": 17, "available": true}));
}

#[tokio::test]
async fn test_month_availability_shape() {
    let harness = Harness::new(NOW);

    let (status, body) = send(
        app(&harness),
        get("/providers/P1/month-availability?month=6&year=2030", "U1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 30);
    assert_eq!(items[0], json!({"day": 1, "available": true}));
}

#[tokio::test]
async fn test_malformed_queries_are_bad_request() {
    let harness = Harness::new(NOW);

    let uris = [
        "/providers/P1/month-availability?month=abc&year=2030",
        "/providers/P1/month-availability?year=2030",
        "/providers/P1/day-availability?day=-1&month=5&year=2030",
        "/providers/P1/day-availability?day=31&month=4&year=2030",
        "/providers/P1/month-availability?month=0&year=2030",
    ];

    for uri in uris {
        let (status, _) = send(app(&harness), get(uri, "U1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert_eq!(harness.appointments.finds(), 0);
}
