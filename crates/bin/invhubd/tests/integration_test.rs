//! End-to-end smoke tests for the full invhubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use invhub_adapter_http_axum::router;
use invhub_adapter_http_axum::state::AppState;
use invhub_adapter_storage_sqlite_sqlx::{
    Config, SqliteClockRoutineRepository, SqliteItemRepository, SqliteMixRoutineRepository,
    SqliteMultiRoutineRepository, SqliteStorage, SqliteTimerRoutineRepository,
};
use invhub_app::change_bus::InProcessChangeBus;
use invhub_app::services::inventory::InventoryService;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();

    let inventory = InventoryService::<SqliteStorage, _>::new(
        SqliteItemRepository::new(pool.clone()),
        SqliteTimerRoutineRepository::new(pool.clone()),
        SqliteClockRoutineRepository::new(pool.clone()),
        SqliteMultiRoutineRepository::new(pool.clone()),
        SqliteMixRoutineRepository::new(pool),
        Arc::new(InProcessChangeBus::new(256)),
    );

    router::build(AppState::new(inventory))
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_run_item_crud_lifecycle() {
    let app = app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Desk lamp", "price": 24.5, "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Desk lamp");
    assert_eq!(fetched["quantity"], 3);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/items/{id}"),
        Some(json!({ "name": "Floor lamp", "price": 40.0, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());

    let (status, list) = send(&app, "GET", "/api/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Floor lamp");

    let (status, _) = send(&app, "DELETE", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn should_reject_blank_name_when_creating_item() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "   ", "price": 1.0, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/api/items", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_assign_new_id_when_create_body_reuses_existing_id() {
    let app = app().await;
    let (_, first) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Lamp", "price": 12.0, "quantity": 1 })),
    )
    .await;

    let (status, second) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "id": first["id"], "name": "Fan", "price": 20.0, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(second["id"], first["id"]);

    let (_, list) = send(&app, "GET", "/api/items", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_return_400_with_json_error_when_body_incomplete() {
    let app = app().await;
    let (status, body) = send(&app, "POST", "/api/items", Some(json!({ "name": "Lamp" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn should_reject_blank_name_when_updating_item() {
    let app = app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Fan", "price": 15.0, "quantity": 2 })),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/items/{id}"),
        Some(json!({ "name": "", "price": 15.0, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = send(&app, "GET", &format!("/api/items/{id}"), None).await;
    assert_eq!(fetched["name"], "Fan");
}

#[tokio::test]
async fn should_return_404_when_updating_missing_item() {
    let app = app().await;
    let (status, _) = send(
        &app,
        "PUT",
        "/api/items/00000000-0000-4000-8000-000000000000",
        Some(json!({ "name": "Ghost", "price": 0.0, "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_400_when_item_id_malformed() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/api/items/42", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn should_sell_until_out_of_stock() {
    let app = app().await;
    let (_, created) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Plug", "price": 4.5, "quantity": 1 })),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, sold) = send(&app, "POST", &format!("/api/items/{id}/sell"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sold["quantity"], 0);

    let (status, _) = send(&app, "POST", &format!("/api/items/{id}/sell"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, overview) = send(&app, "GET", &format!("/api/items/{id}/overview"), None).await;
    assert_eq!(overview["out_of_stock"], true);
}

// ---------------------------------------------------------------------------
// Routines
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_store_computed_duration_for_timer_routine() {
    let app = app().await;
    let (status, created) = send(
        &app,
        "POST",
        "/api/routines/timer",
        Some(json!({
            "name": "Evening",
            "start_time": "18:00",
            "end_time": "20:45",
            "duration": "",
            "status": "on"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["duration"], "2 hours 45 minutes");

    let id = created["id"].as_str().unwrap();
    let (_, fetched) = send(&app, "GET", &format!("/api/routines/timer/{id}"), None).await;
    assert_eq!(fetched["duration"], "2 hours 45 minutes");
}

#[tokio::test]
async fn should_keep_user_duration_when_mix_times_invalid() {
    let app = app().await;
    let (status, created) = send(
        &app,
        "POST",
        "/api/routines/mix",
        Some(json!({
            "device_id": "Heater",
            "name": "Warm up",
            "time": "06:30",
            "status": "on",
            "target_name": "Fan",
            "target_status": "off",
            "start_time": "later",
            "end_time": "07:00",
            "duration": "1800"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["duration"], "1800");
}

#[tokio::test]
async fn should_reject_blank_name_for_every_routine_kind() {
    let app = app().await;
    for family in ["timer", "clock", "multi", "mix"] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/routines/{family}"),
            Some(json!({ "name": " " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{family}");
    }
}

#[tokio::test]
async fn should_list_only_matching_routines_in_overview() {
    let app = app().await;
    let (_, heater) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Heater", "price": 80.0, "quantity": 2 })),
    )
    .await;

    send(
        &app,
        "POST",
        "/api/routines/clock",
        Some(json!({ "device_id": "Heater", "name": "Morning", "duration": "06:00", "status": "on" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/routines/clock",
        Some(json!({ "device_id": "Kettle", "name": "Tea", "duration": "16:00", "status": "on" })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/routines/multi",
        Some(json!({
            "device_id": "Thermostat",
            "name": "Cold snap",
            "status": "low",
            "target_name": "Heater",
            "target_status": "on"
        })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/routines/timer",
        Some(json!({ "name": "Night", "start_time": "22:00", "end_time": "06:00", "status": "off" })),
    )
    .await;

    let id = heater["id"].as_str().unwrap();
    let (status, overview) = send(&app, "GET", &format!("/api/items/{id}/overview"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(overview["item"]["name"], "Heater");
    assert_eq!(overview["out_of_stock"], false);
    assert_eq!(overview["clock_routines"].as_array().unwrap().len(), 1);
    assert_eq!(overview["multi_routines"].as_array().unwrap().len(), 1);
    assert_eq!(overview["mix_routines"].as_array().unwrap().len(), 0);
    assert_eq!(overview["timer_routines"][0]["duration"], "8 hours 0 minutes");
}

#[tokio::test]
async fn should_keep_routines_when_item_deleted() {
    let app = app().await;
    let (_, item) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Lamp", "price": 10.0, "quantity": 1 })),
    )
    .await;
    send(
        &app,
        "POST",
        "/api/routines/clock",
        Some(json!({ "device_id": "Lamp", "name": "Dusk", "duration": "19:00", "status": "on" })),
    )
    .await;

    let id = item["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, routines) = send(&app, "GET", "/api/routines/clock", None).await;
    assert_eq!(routines.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Schedule helper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_roll_over_midnight_when_end_before_start() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/api/schedule/duration?start=23:30&end=00:15",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hours"], 0);
    assert_eq!(body["minutes"], 45);
    assert_eq!(body["description"], "0 hours 45 minutes");
}

#[tokio::test]
async fn should_describe_invalid_format_when_duration_times_malformed() {
    let app = app().await;
    let (status, body) = send(
        &app,
        "GET",
        "/api/schedule/duration?start=noon&end=14:00",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["description"], "Invalid time format");
}

// ---------------------------------------------------------------------------
// Live streams
// ---------------------------------------------------------------------------

async fn next_event(body: &mut Body) -> String {
    let frame = body.frame().await.unwrap().unwrap();
    String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap()
}

#[tokio::test]
async fn should_push_fresh_list_after_write_when_streaming_from_sqlite() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/routines/clock/stream")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let mut body = resp.into_body();
    assert!(next_event(&mut body).await.contains("data: []"));

    send(
        &app,
        "POST",
        "/api/routines/clock",
        Some(json!({ "device_id": "Lamp", "name": "Dusk", "duration": "19:00", "status": "on" })),
    )
    .await;

    let update = next_event(&mut body).await;
    assert!(update.starts_with("event: snapshot"));
    assert!(update.contains("\"name\":\"Dusk\""));
}

#[tokio::test]
async fn should_emit_null_when_streamed_item_deleted() {
    let app = app().await;
    let (_, item) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "name": "Kettle", "price": 30.0, "quantity": 1 })),
    )
    .await;
    let id = item["id"].as_str().unwrap();

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/items/{id}/stream"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let mut body = resp.into_body();
    assert!(next_event(&mut body).await.contains("Kettle"));

    let (status, _) = send(&app, "DELETE", &format!("/api/items/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(next_event(&mut body).await.contains("data: null"));
}
