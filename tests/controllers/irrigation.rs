use reqwest::StatusCode;
use serde_json::{json, Value};

use farmhand::irrigation::StopPolicy;
use farmhand::repository::models::irrigation_event::IrrigationEvent;
use farmhand::util::ApiResponse;

use crate::common::test_app::{spawn_app, spawn_app_with};

fn wheat_loamy(moisture_level: i32) -> Value {
    json!({"crop_type": "Wheat", "soil_type": "Loamy", "moisture_level": moisture_level})
}

#[tokio::test]
async fn catalog_lists_every_pair() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let body: Value = app.get("/irrigation/catalog").await.json().await.unwrap();

    // Assert
    assert_eq!(body["entries"].as_array().unwrap().len(), 20);
    assert_eq!(body["crops"][0], "Wheat");
    assert_eq!(body["soils"][3], "Silt");
}

#[tokio::test]
async fn thresholds_for_known_and_unknown_pairs() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let known: Value = app
        .get("/irrigation/thresholds?crop_type=wheat&soil_type=loamy")
        .await
        .json()
        .await
        .unwrap();
    let unknown: Value = app
        .get("/irrigation/thresholds?crop_type=Tomato&soil_type=Peat")
        .await
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!((known["min"].clone(), known["max"].clone()), (json!(40), json!(60)));
    assert_eq!((unknown["min"].clone(), unknown["max"].clone()), (json!(0), json!(100)));
}

#[tokio::test]
async fn advice_for_pair() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let body: Value = app
        .get("/irrigation/advice?crop_type=Rice&soil_type=Clay")
        .await
        .json()
        .await
        .unwrap();

    // Assert
    assert!(!body["tips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn start_requires_login() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post("/irrigation/start", "not-a-token", &wheat_loamy(50))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn start_out_of_range_is_rejected() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .post("/irrigation/start", &token, &wheat_loamy(75))
        .await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.message.contains("Use range 40-60."));

    let cycle: Value = app
        .get_with_token(
            "/irrigation/status?crop_type=Wheat&soil_type=Loamy",
            &token,
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(cycle["state"], "idle");
    assert!(app.repo.irrigation_events(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn completed_cycle_records_history() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .post("/irrigation/start", &token, &wheat_loamy(50))
        .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let status = app
        .wait_for_state(&token, "Wheat", "Loamy", "complete")
        .await;

    // Assert
    assert_eq!(status["progress"], 100);
    let history: Vec<IrrigationEvent> = app
        .get_with_token("/irrigation/history", &token)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].username, "farmer1");
    assert_eq!(history[0].crop_type, "Wheat");
    assert_eq!(history[0].soil_type, "Loamy");
    assert_eq!(history[0].moisture_level, 50);
}

#[tokio::test]
async fn completed_pair_is_blocked_until_reset() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    app.post("/irrigation/start", &token, &wheat_loamy(50))
        .await;
    app.wait_for_state(&token, "Wheat", "Loamy", "complete")
        .await;

    // Act
    let blocked = app
        .post("/irrigation/start", &token, &wheat_loamy(45))
        .await;
    let reset = app
        .post(
            "/irrigation/reset",
            &token,
            &json!({"crop_type": "Wheat", "soil_type": "Loamy"}),
        )
        .await;
    let reset_status = reset.status();
    let reset_body: Value = reset.json().await.unwrap();
    let restarted = app
        .post("/irrigation/start", &token, &wheat_loamy(45))
        .await;

    // Assert
    assert_eq!(blocked.status(), StatusCode::CONFLICT);
    assert!(reset_status.is_success());
    assert_eq!(reset_body["state"], "idle");
    assert_eq!(reset_body["progress"], 0);
    assert_eq!(restarted.status(), StatusCode::ACCEPTED);

    app.wait_for_state(&token, "Wheat", "Loamy", "complete")
        .await;
    let history = app.repo.irrigation_events(None, 10).await.unwrap();
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn completed_pair_reports_already_irrigated_before_range() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    app.post("/irrigation/start", &token, &wheat_loamy(50))
        .await;
    app.wait_for_state(&token, "Wheat", "Loamy", "complete")
        .await;

    // Act
    let response = app
        .post("/irrigation/start", &token, &wheat_loamy(150))
        .await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.message.contains("already irrigated"));
}

#[tokio::test]
async fn start_beyond_full_scale_uses_range_message() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .post(
            "/irrigation/start",
            &token,
            &json!({"crop_type": "Barley", "soil_type": "Peat", "moisture_level": 101}),
        )
        .await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.message.contains("Use range 0-100."));
}

#[tokio::test]
async fn new_login_starts_a_fresh_session() {
    // Arrange
    let app = spawn_app().await;
    let first = app.login_as("farmer1").await;
    app.post("/irrigation/start", &first, &wheat_loamy(50))
        .await;
    app.wait_for_state(&first, "Wheat", "Loamy", "complete")
        .await;
    let second: Value = app
        .post_login(&json!({"username": "farmer1", "password": crate::common::test_app::TEST_PASSWORD}))
        .await
        .json()
        .await
        .unwrap();
    let second = second["token"].as_str().unwrap().to_string();

    // Act
    let response = app
        .post("/irrigation/start", &second, &wheat_loamy(50))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn stop_returns_to_idle_without_history() {
    // Arrange
    let app = spawn_app_with(|settings| settings.irrigation.tick_interval_ms = 60_000).await;
    let token = app.login_as("farmer1").await;
    app.post("/irrigation/start", &token, &wheat_loamy(50))
        .await;

    // Act
    let second = app
        .post(
            "/irrigation/start",
            &token,
            &json!({"crop_type": "Rice", "soil_type": "Clay", "moisture_level": 80}),
        )
        .await;
    let stopped: Value = app
        .post(
            "/irrigation/stop",
            &token,
            &json!({"crop_type": "Wheat", "soil_type": "Loamy"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let restarted = app
        .post("/irrigation/start", &token, &wheat_loamy(50))
        .await;

    // Assert
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(stopped["state"], "idle");
    assert_eq!(restarted.status(), StatusCode::ACCEPTED);
    assert!(app.repo.irrigation_events(None, 10).await.unwrap().is_empty());
}

#[tokio::test]
async fn stop_can_mark_complete() {
    // Arrange
    let app = spawn_app_with(|settings| {
        settings.irrigation.tick_interval_ms = 60_000;
        settings.irrigation.stop_policy = StopPolicy::MarkComplete;
    })
    .await;
    let token = app.login_as("farmer1").await;
    app.post("/irrigation/start", &token, &wheat_loamy(50))
        .await;

    // Act
    let stopped: Value = app
        .post(
            "/irrigation/stop",
            &token,
            &json!({"crop_type": "Wheat", "soil_type": "Loamy"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let restarted = app
        .post("/irrigation/start", &token, &wheat_loamy(50))
        .await;

    // Assert
    assert_eq!(stopped["state"], "complete");
    assert_eq!(restarted.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn history_summary_groups_by_crop() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    app.post("/irrigation/start", &token, &wheat_loamy(50))
        .await;
    app.wait_for_state(&token, "Wheat", "Loamy", "complete")
        .await;

    // Act
    let summary: Value = app
        .get_with_token("/irrigation/history/summary", &token)
        .await
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(summary["total_events"], 1);
    assert_eq!(
        summary["by_crop"],
        json!([{"crop_type": "Wheat", "events": 1, "average_moisture": 50.0}])
    );
}
