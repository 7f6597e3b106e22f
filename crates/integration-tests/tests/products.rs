//! Product lifecycle over HTTP: creation with an image collection, atomic
//! image replacement on update, list filters, and the order-item delete
//! conflict.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use shopkeeper_integration_tests::{TestServer, body_id, create_store};

/// A store with one billboard, category, size, and color, created over HTTP.
struct Catalog {
    store_id: String,
    category_id: String,
    size_id: String,
    color_id: String,
}

async fn seed_catalog(server: &TestServer, user: &str) -> Catalog {
    let store_id = create_store(server, user, "Acme").await;

    let resp = server
        .post_as(
            user,
            &format!("/api/{store_id}/billboards"),
            &json!({"label": "Hero", "imageUrl": "https://example.com/hero.jpg"}),
        )
        .await;
    let billboard_id = body_id(resp).await;

    let resp = server
        .post_as(
            user,
            &format!("/api/{store_id}/categories"),
            &json!({"name": "Shirts", "billboardId": billboard_id}),
        )
        .await;
    let category_id = body_id(resp).await;

    let resp = server
        .post_as(
            user,
            &format!("/api/{store_id}/sizes"),
            &json!({"name": "Small", "value": "S"}),
        )
        .await;
    let size_id = body_id(resp).await;

    let resp = server
        .post_as(
            user,
            &format!("/api/{store_id}/colors"),
            &json!({"name": "White", "value": "#FFFFFF"}),
        )
        .await;
    let color_id = body_id(resp).await;

    Catalog {
        store_id,
        category_id,
        size_id,
        color_id,
    }
}

fn product_body(catalog: &Catalog, name: &str, urls: &[&str]) -> Value {
    json!({
        "name": name,
        "price": "49.99",
        "categoryId": catalog.category_id,
        "sizeId": catalog.size_id,
        "colorId": catalog.color_id,
        "images": urls.iter().map(|u| json!({"url": u})).collect::<Vec<_>>(),
    })
}

#[tokio::test]
async fn create_preserves_image_order_and_price_text() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/products"),
            &product_body(&catalog, "Linen shirt", &["https://img/1", "https://img/2", "https://img/3"]),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.unwrap();

    assert_eq!(product["name"], "Linen shirt");
    assert_eq!(product["price"], "49.99");
    assert_eq!(product["isFeatured"], false);
    let urls: Vec<&str> = product["images"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["url"].as_str())
        .collect();
    assert_eq!(urls, ["https://img/1", "https://img/2", "https://img/3"]);
}

#[tokio::test]
async fn price_accepts_json_numbers_and_rejects_zero() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let mut body = product_body(&catalog, "Numeric price", &["https://img/1"]);
    body["price"] = json!(19.99);
    let resp = server
        .post_as("alice", &format!("/api/{store_id}/products"), &body)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.unwrap();
    assert_eq!(product["price"], "19.99");

    body["price"] = json!(0);
    let resp = server
        .post_as("alice", &format!("/api/{store_id}/products"), &body)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Price is required");
}

#[tokio::test]
async fn products_require_a_non_empty_image_collection() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/products"),
            &product_body(&catalog, "No images", &[]),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "Images is required");
}

#[tokio::test]
async fn update_replaces_the_image_collection() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/products"),
            &product_body(&catalog, "Linen shirt", &["https://img/old-1", "https://img/old-2"]),
        )
        .await;
    let product_id = body_id(resp).await;

    let mut body = product_body(&catalog, "Linen shirt v2", &["https://img/new-1"]);
    body["isFeatured"] = json!(true);
    let resp = server
        .patch_as("alice", &format!("/api/{store_id}/products/{product_id}"), &body)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.unwrap();

    assert_eq!(product["name"], "Linen shirt v2");
    assert_eq!(product["isFeatured"], true);
    let urls: Vec<&str> = product["images"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|i| i["url"].as_str())
        .collect();
    assert_eq!(urls, ["https://img/new-1"]);
}

#[tokio::test]
async fn list_filters_and_archived_exclusion() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/products"),
            &product_body(&catalog, "Plain", &["https://img/1"]),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut featured = product_body(&catalog, "Featured", &["https://img/2"]);
    featured["isFeatured"] = json!(true);
    let resp = server
        .post_as("alice", &format!("/api/{store_id}/products"), &featured)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let mut archived = product_body(&catalog, "Archived", &["https://img/3"]);
    archived["isArchived"] = json!(true);
    let resp = server
        .post_as("alice", &format!("/api/{store_id}/products"), &archived)
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Archived products never appear in listings
    let products: Vec<Value> = server
        .get(&format!("/api/{store_id}/products"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.iter().all(|p| p["name"] != "Archived"));
    // Relations ride along in list results
    assert!(products.iter().all(|p| p["category"]["name"] == "Shirts"));

    let products: Vec<Value> = server
        .get(&format!("/api/{store_id}/products?isFeatured=true"))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Featured");
}

#[tokio::test]
async fn detail_includes_relations_and_misses_are_404() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/products"),
            &product_body(&catalog, "Linen shirt", &["https://img/1"]),
        )
        .await;
    let product_id = body_id(resp).await;

    let resp = server
        .get(&format!("/api/{store_id}/products/{product_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: Value = resp.json().await.unwrap();
    assert_eq!(detail["size"]["value"], "S");
    assert_eq!(detail["color"]["value"], "#FFFFFF");

    let resp = server
        .get(&format!("/api/{store_id}/products/no-such-product"))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_requires_ownership() {
    let server = TestServer::spawn().await;
    let catalog = seed_catalog(&server, "alice").await;
    let store_id = &catalog.store_id;

    let resp = server
        .post_as(
            "alice",
            &format!("/api/{store_id}/products"),
            &product_body(&catalog, "Linen shirt", &["https://img/1"]),
        )
        .await;
    let product_id = body_id(resp).await;

    let resp = server
        .delete_as("mallory", &format!("/api/{store_id}/products/{product_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = server
        .delete_as("alice", &format!("/api/{store_id}/products/{product_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = server
        .get(&format!("/api/{store_id}/products/{product_id}"))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
