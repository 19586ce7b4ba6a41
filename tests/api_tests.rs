mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{send, test_app, test_app_with};
use fee_tracker::config::AppConfig;
use serde_json::json;

#[tokio::test]
async fn health_reports_store_status() {
    let (_, app) = test_app();

    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "connected");
    assert_eq!(body["config"]["store_backend"], "memory");
}

#[tokio::test]
async fn resource_routes_walk_the_hierarchy() {
    let (_, app) = test_app();

    let (status, body) = send(&app, "POST", "/api/grounds", Some(json!({ "name": "North Field" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], true);
    let ground_id = body["item"]["id"].as_str().unwrap().to_string();

    let (_, body) = send(&app, "GET", &format!("/api/grounds/{}", ground_id), None).await;
    assert_eq!(body["name"], "North Field");

    let months_uri = format!("/api/grounds/{}/months", ground_id);
    let (_, body) = send(&app, "POST", &months_uri, Some(json!({ "label": "May 2024" }))).await;
    assert_eq!(body["item"]["id"], "May 2024");

    let (_, body) = send(&app, "GET", &months_uri, None).await;
    assert_eq!(body, json!(["May 2024"]));

    let players_uri = format!("/api/grounds/{}/months/May%202024/players", ground_id);
    let (status, player) = send(&app, "POST", &players_uri, None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(player["status"], "Not Paid");
    let player_id = player["id"].as_str().unwrap().to_string();

    let player_uri = format!("{}/{}", players_uri, player_id);
    let (status, body) = send(
        &app,
        "PATCH",
        &player_uri,
        Some(json!({ "field": "dueFees", "value": "150" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["update"]["dueFees"], 150.0);

    let (_, body) = send(&app, "GET", &players_uri, None).await;
    assert_eq!(body[0]["dueFees"], 150.0);
    assert_eq!(body[0]["name"], "");

    let (status, _) = send(&app, "DELETE", &player_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &players_uri, None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn blank_names_are_skipped_without_error() {
    let (store, app) = test_app();

    let (status, body) = send(&app, "POST", "/api/grounds", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], false);
    assert!(body["item"].is_null());
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn bad_input_is_rejected_with_400() {
    let (_, app) = test_app();
    let (_, body) = send(&app, "POST", "/api/grounds", Some(json!({ "name": "North" }))).await;
    let ground_id = body["item"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/grounds/{}/months", ground_id),
        Some(json!({ "label": "Jan/Feb" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/grounds/{}/months/May/players/p1", ground_id),
        Some(json!({ "field": "shoeSize", "value": 9 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patching_a_missing_player_is_404() {
    let (_, app) = test_app();

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/grounds/g1/months/May/players/nobody",
        Some(json!({ "field": "name", "value": "Ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Document not found");
}

#[tokio::test]
async fn store_failures_surface_as_bad_gateway() {
    let (store, app) = test_app();
    store.fail_writes(true);

    let (status, body) = send(&app, "POST", "/api/grounds", Some(json!({ "name": "North" }))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn session_flow_reports_notices_and_cascades() {
    let (_, app) = test_app();

    let (status, body) = send(&app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["notice"].is_null());
    assert_eq!(body["view"]["current_ground"], serde_json::Value::Null);
    let session_uri = format!("/api/sessions/{}", body["session_id"].as_str().unwrap());

    let (_, body) = send(
        &app,
        "POST",
        &format!("{}/grounds", session_uri),
        Some(json!({ "name": "North" })),
    )
    .await;
    assert_eq!(body["notice"], "Ground added");
    let north = body["view"]["current_ground"].as_str().unwrap().to_string();

    let (_, body) = send(
        &app,
        "POST",
        &format!("{}/months", session_uri),
        Some(json!({ "label": "May" })),
    )
    .await;
    assert_eq!(body["notice"], "Month added");
    assert_eq!(body["view"]["current_month"], "May");

    let (_, body) = send(&app, "POST", &format!("{}/players", session_uri), None).await;
    assert_eq!(body["notice"], "Player added");
    let player_id = body["view"]["players"][0]["id"].as_str().unwrap().to_string();

    let (_, body) = send(
        &app,
        "PATCH",
        &format!("{}/players/{}", session_uri, player_id),
        Some(json!({ "field": "status", "value": "Paid" })),
    )
    .await;
    assert!(body["notice"].is_null());
    assert_eq!(body["view"]["players"][0]["status"], "Paid");

    let (_, body) = send(
        &app,
        "POST",
        &format!("{}/grounds", session_uri),
        Some(json!({ "name": "South" })),
    )
    .await;
    assert_eq!(body["view"]["months"], json!([]));
    assert_eq!(body["view"]["players"], json!([]));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("{}/ground", session_uri),
        Some(json!({ "ground_id": north })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"]["months"], json!(["May"]));
    assert_eq!(body["view"]["players"][0]["status"], "Paid");

    let (_, body) = send(
        &app,
        "DELETE",
        &format!("{}/players/{}", session_uri, player_id),
        None,
    )
    .await;
    assert_eq!(body["notice"], "Player deleted");
    assert_eq!(body["view"]["players"], json!([]));

    let (status, _) = send(&app, "DELETE", &session_uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &session_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn session_actions_need_a_selection() {
    let (_, app) = test_app();
    let (_, body) = send(&app, "POST", "/api/sessions", None).await;
    let session_uri = format!("/api/sessions/{}", body["session_id"].as_str().unwrap());

    let (status, body) = send(&app, "POST", &format!("{}/players", session_uri), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "No ground selected");
}

#[tokio::test(start_paused = true)]
async fn idle_sessions_expire_with_404() {
    let mut config = AppConfig::in_memory();
    config.session_idle_timeout = Duration::from_secs(300);
    let (_, app) = test_app_with(config);

    let (_, body) = send(&app, "POST", "/api/sessions", None).await;
    let session_uri = format!("/api/sessions/{}", body["session_id"].as_str().unwrap());

    tokio::time::advance(Duration::from_secs(200)).await;
    let (status, _) = send(&app, "GET", &session_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::advance(Duration::from_secs(301)).await;
    let (status, body) = send(&app, "GET", &session_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Session not found");

    let (_, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(body["sessions"], 0);
}
