use reqwest::StatusCode;
use serde_json::{json, Value};

use farmhand::controllers::crops::CropResponse;
use farmhand::repository::models::crop::Crop;
use farmhand::util::ApiResponse;

use crate::common::test_app::{spawn_app, TestApp};

async fn add_crop(app: &TestApp, token: &str, name: &str, season: &str, yield_per_acre: f64) -> Crop {
    let response = app
        .post(
            "/crops",
            token,
            &json!({"name": name, "season": season, "yield_per_acre": yield_per_acre}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: CropResponse = response.json().await.unwrap();
    body.crop
}

async fn list_crops(app: &TestApp) -> Vec<Crop> {
    app.get("/crops").await.json().await.unwrap()
}

#[tokio::test]
async fn add_then_list() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let crop = add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;
    let crops = list_crops(&app).await;

    // Assert
    assert_eq!(crops, vec![crop.clone()]);
    assert_eq!(crop.name, "Wheat");
    assert_eq!(crop.season, "Rabi");
    assert_eq!(crop.yield_per_acre, 3000.0);
}

#[tokio::test]
async fn add_requires_login() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app
        .post(
            "/crops",
            "not-a-token",
            &json!({"name": "Wheat", "season": "Rabi", "yield_per_acre": 3000.0}),
        )
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(list_crops(&app).await.is_empty());
}

#[tokio::test]
async fn add_rejects_blank_name() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .post(
            "/crops",
            &token,
            &json!({"name": "", "season": "Rabi", "yield_per_acre": 3000.0}),
        )
        .await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.message, "Crop name is required.");
}

#[tokio::test]
async fn update_name_only() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    let crop = add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;

    // Act
    let response = app
        .patch(&format!("/crops/{}", crop.id), &token, &json!({"name": "Barley"}))
        .await;
    let status = response.status();
    let body: CropResponse = response.json().await.unwrap();

    // Assert
    assert!(status.is_success());
    assert_eq!(
        body.message,
        format!("Crop with ID {} has been successfully updated.", crop.id)
    );
    assert_eq!(body.crop.name, "Barley");
    assert_eq!(body.crop.season, "Rabi");
    assert_eq!(body.crop.yield_per_acre, 3000.0);
}

#[tokio::test]
async fn update_missing_crop() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .patch("/crops/999", &token, &json!({"name": "Barley"}))
        .await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.message, "Crop with ID 999 does not exist");
}

#[tokio::test]
async fn update_other_farmers_crop() {
    // Arrange
    let app = spawn_app().await;
    let owner = app.login_as("farmer1").await;
    let other = app.login_as("farmer2").await;
    let crop = add_crop(&app, &owner, "Wheat", "Rabi", 3000.0).await;

    // Act
    let response = app
        .patch(&format!("/crops/{}", crop.id), &other, &json!({"name": "Barley"}))
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(list_crops(&app).await, vec![crop]);
}

#[tokio::test]
async fn delete_removes_crop() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    let wheat = add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;
    let rice = add_crop(&app, &token, "Rice", "Kharif", 2000.0).await;

    // Act
    let response = app.delete(&format!("/crops/{}", wheat.id), &token).await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert!(status.is_success());
    assert_eq!(
        body.message,
        format!("Crop with ID {} deleted successfully", wheat.id)
    );
    assert_eq!(list_crops(&app).await, vec![rice]);
}

#[tokio::test]
async fn delete_missing_crop() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app.delete("/crops/42", &token).await;

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_matches_name_or_season() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    let wheat = add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;
    let _rice = add_crop(&app, &token, "Rice", "Kharif", 2000.0).await;
    let mustard = add_crop(&app, &token, "Mustard", "rabi", 800.0).await;
    let rabi_bean = add_crop(&app, &token, "Rabi bean", "Zaid", 900.0).await;

    // Act
    let crops: Vec<Crop> = app.get("/crops/search?keyword=Rabi").await.json().await.unwrap();

    // Assert
    assert_eq!(crops, vec![wheat, mustard, rabi_bean]);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;

    // Act
    let crops: Vec<Crop> = app.get("/crops/search?keyword=%25").await.json().await.unwrap();

    // Assert
    assert!(crops.is_empty());
}

#[tokio::test]
async fn bulk_add() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .post(
            "/crops/bulk",
            &token,
            &json!({"text": "Wheat, Rabi, 3000\nnot a crop\nRice, Kharif, 2000\n"}),
        )
        .await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert!(status.is_success());
    assert_eq!(body.message, "2 crops added successfully");
    assert_eq!(list_crops(&app).await.len(), 2);
}

#[tokio::test]
async fn bulk_add_bad_yield_adds_nothing() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    // Act
    let response = app
        .post(
            "/crops/bulk",
            &token,
            &json!({"text": "Wheat, Rabi, 3000\nRice, Kharif, plenty"}),
        )
        .await;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(list_crops(&app).await.is_empty());
}

#[tokio::test]
async fn bulk_add_non_finite_yield_adds_nothing() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;

    for text in ["Wheat, Rabi, NaN", "Wheat, Rabi, 3000\nRice, Kharif, inf"] {
        // Act
        let response = app.post("/crops/bulk", &token, &json!({ "text": text })).await;

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert!(list_crops(&app).await.is_empty());
}

#[tokio::test]
async fn analytics_totals() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;
    add_crop(&app, &token, "Wheat", "Rabi", 1000.0).await;
    add_crop(&app, &token, "Rice", "Kharif", 2000.0).await;

    // Act
    let body: Value = app
        .get("/crops/analytics?season=rabi")
        .await
        .json()
        .await
        .unwrap();

    // Assert
    assert_eq!(body["total_crops"], 2);
    assert_eq!(body["total_yield"], 4000.0);
    assert_eq!(body["average_yield"], 2000.0);
    assert_eq!(
        body["yield_by_crop"],
        json!([{"label": "Wheat", "total_yield": 4000.0}])
    );
}

#[tokio::test]
async fn export_csv() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    let crop = add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;

    // Act
    let response = app.get("/crops/export/csv").await;
    let status = response.status();
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    let body = response.text().await.unwrap();

    // Assert
    assert!(status.is_success());
    assert!(content_type.starts_with("text/csv"));
    assert_eq!(
        body,
        format!("ID,Name,Season,Yield (kg/acre)\n{},Wheat,Rabi,3000\n", crop.id)
    );
}

#[tokio::test]
async fn export_xlsx() {
    // Arrange
    let app = spawn_app().await;
    let token = app.login_as("farmer1").await;
    add_crop(&app, &token, "Wheat", "Rabi", 3000.0).await;

    // Act
    let response = app.get("/crops/export/xlsx").await;
    let status = response.status();
    let disposition = response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .to_string();
    let bytes = response.bytes().await.unwrap();

    // Assert
    assert!(status.is_success());
    assert!(disposition.contains("crops.xlsx"));
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn export_empty_registry() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_in_urdu("/crops/export/csv").await;
    let status = response.status();
    let body: ApiResponse = response.json().await.unwrap();

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body.message, "برآمد کے لیے کوئی ڈیٹا دستیاب نہیں");
}
