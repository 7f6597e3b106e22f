//! Catalog entity lifecycle over HTTP: billboards, categories, sizes, and
//! colors, including public reads, the ownership gate, field validation
//! messages, and delete conflict hints.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use shopkeeper_integration_tests::{TestServer, body_id, create_store};

async fn create_billboard(server: &TestServer, user: &str, store_id: &str, label: &str) -> String {
    let resp = server
        .post_as(
            user,
            &format!("/api/{store_id}/billboards"),
            &json!({"label": label, "imageUrl": "https://example.com/b.jpg"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_id(resp).await
}

#[tokio::test]
async fn size_lifecycle_end_to_end() {
    let server = TestServer::spawn().await;
    let store_id = create_store(&server, "alice", "Acme").await;

    // Create
    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/sizes"),
            &json!({"name": "Small", "value": "S"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let size: Value = resp.json().await.unwrap();
    assert_eq!(size["name"], "Small");
    assert_eq!(size["value"], "S");
    assert_eq!(size["storeId"], store_id);
    let size_id = size["id"].as_str().unwrap().to_string();

    // Public list, no identity header
    let resp = server.get(&format!("/api/{store_id}/sizes")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let sizes: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(sizes.len(), 1);

    // Update
    let resp = server
        .patch_as(
            "alice",
            &format!("/api/{store_id}/sizes/{size_id}"),
            &json!({"name": "Small (EU)", "value": "36"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let size: Value = resp.json().await.unwrap();
    assert_eq!(size["name"], "Small (EU)");
    assert_eq!(size["value"], "36");

    // Delete
    let resp = server
        .delete_as("alice", &format!("/api/{store_id}/sizes/{size_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = server.get(&format!("/api/{store_id}/sizes/{size_id}")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn validation_messages_use_field_labels() {
    let server = TestServer::spawn().await;
    let store_id = create_store(&server, "alice", "Acme").await;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/billboards"),
            &json!({"label": "Hero"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Image URL is required");

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/categories"),
            &json!({"name": "Shirts"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Billboard id is required");

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/colors"),
            &json!({"value": "#FFFFFF"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Name is required");
}

#[tokio::test]
async fn mutations_on_an_unowned_store_are_forbidden() {
    let server = TestServer::spawn().await;
    let store_id = create_store(&server, "alice", "Acme").await;

    let resp = server
        .post_as(
            "mallory",
            &format!("/api/{store_id}/sizes"),
            &json!({"name": "Small", "value": "S"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Same for a store id that does not exist at all
    let resp = server
        .post_as(
            "mallory",
            "/api/no-such-store/sizes",
            &json!({"name": "Small", "value": "S"}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn category_detail_includes_its_billboard() {
    let server = TestServer::spawn().await;
    let store_id = create_store(&server, "alice", "Acme").await;
    let billboard_id = create_billboard(&server, "alice", &store_id, "Hero").await;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/categories"),
            &json!({"name": "Shirts", "billboardId": billboard_id}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let category_id = body_id(resp).await;

    let resp = server
        .get(&format!("/api/{store_id}/categories/{category_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = resp.json().await.unwrap();
    assert_eq!(detail["name"], "Shirts");
    assert_eq!(detail["billboard"]["id"], billboard_id);
    assert_eq!(detail["billboard"]["label"], "Hero");
}

#[tokio::test]
async fn billboard_delete_is_blocked_while_categories_reference_it() {
    let server = TestServer::spawn().await;
    let store_id = create_store(&server, "alice", "Acme").await;
    let billboard_id = create_billboard(&server, "alice", &store_id, "Hero").await;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/categories"),
            &json!({"name": "Shirts", "billboardId": billboard_id}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let category_id = body_id(resp).await;

    let resp = server
        .delete_as("alice", &format!("/api/{store_id}/billboards/{billboard_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let message = resp.text().await.unwrap();
    assert!(message.contains("categories using this billboard"), "got: {message}");

    // After removing the category the billboard can go
    let resp = server
        .delete_as("alice", &format!("/api/{store_id}/categories/{category_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = server
        .delete_as("alice", &format!("/api/{store_id}/billboards/{billboard_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn lists_are_newest_first() {
    let server = TestServer::spawn().await;
    let store_id = create_store(&server, "alice", "Acme").await;

    for label in ["First", "Second", "Third"] {
        create_billboard(&server, "alice", &store_id, label).await;
        // Timestamps carry sub-second precision; a short pause keeps the
        // ordering unambiguous.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let billboards: Vec<Value> = server
        .get(&format!("/api/{store_id}/billboards"))
        .await
        .json()
        .await
        .unwrap();
    let labels: Vec<&str> = billboards.iter().filter_map(|b| b["label"].as_str()).collect();
    assert_eq!(labels, ["Third", "Second", "First"]);
}

#[tokio::test]
async fn field_metadata_is_exported() {
    let server = TestServer::spawn().await;

    let resp = server.get("/api/meta/billboards/fields").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fields: Vec<Value> = resp.json().await.unwrap();
    assert!(fields.iter().any(|f| f["name"] == "imageUrl" && f["label"] == "Image URL"));

    let resp = server.get("/api/meta/unknown/fields").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
