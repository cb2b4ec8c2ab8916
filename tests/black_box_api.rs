//! Drives a real server on an ephemeral port over HTTP.

use std::net::SocketAddr;

use donation_rs::config::{ResourcePolicy, Settings, StorageBackend};
use donation_rs::server::Server;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn spawn_server(settings: Settings) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(Server::new(settings).serve(listener));
    address
}

fn memory_settings() -> Settings {
    let mut settings = Settings::default();
    settings.database.backend = StorageBackend::Memory;
    settings
}

#[tokio::test]
async fn test_permission_lifecycle_over_http() {
    let address = spawn_server(memory_settings()).await;
    let client = reqwest::Client::new();
    let base = format!("http://{address}/permissions");

    let response = client
        .post(&base)
        .json(&json!({"code": "items.read", "name": "Read items"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let item = format!("{base}/{}", created["id"]);

    let response = client
        .put(&item)
        .json(&json!({"name": "Read donated items"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["name"], "Read donated items");
    assert_eq!(updated["code"], "items.read");

    let listed: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed["data"][0]["id"], created["id"]);
    assert_eq!(listed["pagination"]["total_items"], 1);

    let response = client.delete(&item).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.delete(&item).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_errors_carry_request_id_over_http() {
    let address = spawn_server(memory_settings()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{address}/role-tasks/not-a-number"))
        .header("x-request-id", "bb-1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["x-request-id"], "bb-1");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["request_id"], "bb-1");
}

#[tokio::test]
async fn test_read_only_resource_over_http() {
    let mut settings = memory_settings();
    settings.api.base_path = "/api".to_string();
    settings.api.resources.insert(
        "activity_branch".to_string(),
        ResourcePolicy {
            read_only: true,
            max_page_size: Some(5),
        },
    );
    let address = spawn_server(settings).await;
    let client = reqwest::Client::new();
    let base = format!("http://{address}/api/activity-branches");

    let response = client
        .post(&base)
        .json(&json!({"activity_id": 1, "branch_id": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = client.get(format!("{base}?page_size=6")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.get(&base).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["pagination"]["page_size"], 5);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_health_over_http() {
    let address = spawn_server(memory_settings()).await;
    let body: Value = reqwest::get(format!("http://{address}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "healthy");
}
