//! API integration tests
//!
//! Run against a live server seeded with an admin account:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated admin token
async fn get_admin_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@profico.com",
            "password": "admin-password"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Create a piece of equipment and return its id
async fn create_equipment(client: &Client, token: &str, serial: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "serial_number": serial,
            "name": "Test Laptop",
            "category": "laptop"
        }))
        .send()
        .await
        .expect("Failed to create equipment");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No equipment ID")
}

/// Create a plain user and return (id, token)
async fn create_plain_user(client: &Client, admin_token: &str, email: &str) -> (i64, String) {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({
            "name": "Plain User",
            "email": email,
            "password": "plain-password",
            "role": "user"
        }))
        .send()
        .await
        .expect("Failed to create user");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let user_id = body["id"].as_i64().expect("No user ID");

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "plain-password" }))
        .send()
        .await
        .expect("Failed to login as plain user");
    let body: Value = response.json().await.expect("Failed to parse login response");
    let token = body["token"].as_str().expect("No token").to_string();

    (user_id, token)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_unassign_fair_condition_returns_to_available() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &token, "ITG-UNASSIGN-1").await;
    let (user_id, _) = create_plain_user(&client, &token, "owner1@profico.com").await;

    // Assign to the user
    let response = client
        .post(format!("{}/equipment/{}/assign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to assign");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["new_status"], "assigned");
    assert_eq!(body["equipment"]["current_owner"]["id"].as_i64(), Some(user_id));

    // Return in fair condition
    let response = client
        .post(format!("{}/equipment/{}/unassign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "fair" }))
        .send()
        .await
        .expect("Failed to unassign");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["new_status"], "available");
    assert_eq!(body["equipment"]["status"], "available");
    assert_eq!(body["equipment"]["condition"], "fair");
    assert!(body["equipment"]["current_owner"].is_null());

    // Exactly one returned entry in the ledger, referencing the previous owner
    let response = client
        .get(format!("{}/equipment/{}/history", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch history");
    let history: Value = response.json().await.expect("Failed to parse history");
    let returned: Vec<&Value> = history
        .as_array()
        .expect("History is not an array")
        .iter()
        .filter(|e| e["action"] == "returned")
        .collect();
    assert_eq!(returned.len(), 1);
    assert_eq!(returned[0]["from_user_id"].as_i64(), Some(user_id));
    assert_eq!(returned[0]["condition"], "fair");
}

#[tokio::test]
#[ignore]
async fn test_unassign_poor_condition_goes_to_maintenance() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &token, "ITG-UNASSIGN-2").await;
    let (user_id, _) = create_plain_user(&client, &token, "owner2@profico.com").await;

    client
        .post(format!("{}/equipment/{}/assign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to assign");

    let response = client
        .post(format!("{}/equipment/{}/unassign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "poor" }))
        .send()
        .await
        .expect("Failed to unassign");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["new_status"], "maintenance");
}

#[tokio::test]
#[ignore]
async fn test_double_unassign_is_rejected() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &token, "ITG-DOUBLE-1").await;
    let (user_id, _) = create_plain_user(&client, &token, "owner3@profico.com").await;

    client
        .post(format!("{}/equipment/{}/assign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to assign");

    let first = client
        .post(format!("{}/equipment/{}/unassign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "good" }))
        .send()
        .await
        .expect("Failed to unassign");
    assert_eq!(first.status(), 200);

    // Second return must fail and leave state untouched
    let second = client
        .post(format!("{}/equipment/{}/unassign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "good" }))
        .send()
        .await
        .expect("Failed to send second unassign");
    assert_eq!(second.status(), 409);

    let response = client
        .get(format!("{}/equipment/{}/history", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch history");
    let history: Value = response.json().await.expect("Failed to parse history");
    let returned_count = history
        .as_array()
        .expect("History is not an array")
        .iter()
        .filter(|e| e["action"] == "returned")
        .count();
    assert_eq!(returned_count, 1);
}

#[tokio::test]
#[ignore]
async fn test_unassign_unowned_equipment_is_rejected() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &token, "ITG-UNOWNED-1").await;

    let response = client
        .post(format!("{}/equipment/{}/unassign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "condition": "good" }))
        .send()
        .await
        .expect("Failed to send unassign");
    assert_eq!(response.status(), 409);

    // No history entry appended
    let response = client
        .get(format!("{}/equipment/{}/history", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to fetch history");
    let history: Value = response.json().await.expect("Failed to parse history");
    assert_eq!(history.as_array().expect("History is not an array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_plain_user_cannot_unassign() {
    let client = Client::new();
    let admin_token = get_admin_token(&client).await;

    let equipment_id = create_equipment(&client, &admin_token, "ITG-FORBIDDEN-1").await;
    let (user_id, user_token) =
        create_plain_user(&client, &admin_token, "owner4@profico.com").await;

    client
        .post(format!("{}/equipment/{}/assign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .json(&json!({ "user_id": user_id }))
        .send()
        .await
        .expect("Failed to assign");

    let response = client
        .post(format!("{}/equipment/{}/unassign", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({ "condition": "good" }))
        .send()
        .await
        .expect("Failed to send unassign");
    assert_eq!(response.status(), 403);

    // State unchanged
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", admin_token))
        .send()
        .await
        .expect("Failed to fetch equipment");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "assigned");
    assert_eq!(body["current_owner"]["id"].as_i64(), Some(user_id));
}

#[tokio::test]
#[ignore]
async fn test_workflow_stats() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/equipment/workflow-stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_equipment"].is_number());
    assert!(body["available_equipment"].is_number());
    assert!(body["assigned_equipment"].is_number());
    assert!(body["broken_equipment"].is_number());
    assert!(body["pending_actions"].is_number());
    assert!(body["category_distribution"].is_array());
    assert!(body["monthly_trend"].is_array());
    assert!(body["age_distribution"].is_array());
    assert!(body["top_owners"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_export_restricted_to_ids() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let id_a = create_equipment(&client, &token, "ITG-EXPORT-A").await;
    let _id_b = create_equipment(&client, &token, "ITG-EXPORT-B").await;

    let response = client
        .get(format!("{}/equipment/export?ids={}", BASE_URL, id_a))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    );
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"equipment-export-"));
    assert!(disposition.ends_with(".xlsx\""));

    let bytes = response.bytes().await.expect("Failed to read body");
    // xlsx files are zip archives
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
#[ignore]
async fn test_export_rejects_malformed_ids() {
    let client = Client::new();
    let token = get_admin_token(&client).await;

    let response = client
        .get(format!("{}/equipment/export?ids=1,abc", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}
