//! Integration test harness for Shopkeeper.
//!
//! Each [`TestServer`] spins up the full admin application on an ephemeral
//! port, backed by a fresh in-memory database with migrations applied, and
//! exercises it over real HTTP with `reqwest`. No external services are
//! required.
//!
//! Run with: `cargo test -p shopkeeper-integration-tests`

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use reqwest::{Client, Response};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;

use shopkeeper_admin::config::Config;
use shopkeeper_admin::{AppState, app, db};

/// The header the fronting proxy uses to convey the verified caller.
pub const USER_ID_HEADER: &str = "x-user-id";

/// A running admin application with direct access to its database pool.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    pool: SqlitePool,
}

impl TestServer {
    /// Start the application on an ephemeral port with a fresh database.
    pub async fn spawn() -> Self {
        let pool = db::create_memory_pool()
            .await
            .expect("Failed to create test database");

        let config = Config {
            database_url: SecretString::from("sqlite::memory:"),
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
        };
        let state = AppState::new(config, pool.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener address");

        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("Test server error");
        });

        Self {
            addr,
            client: Client::new(),
            pool,
        }
    }

    /// Direct pool access for test fixtures the HTTP surface cannot create.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET without an identity header (a public read).
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }

    /// GET as `user`.
    pub async fn get_as(&self, user: &str, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .header(USER_ID_HEADER, user)
            .send()
            .await
            .expect("request failed")
    }

    /// POST a JSON body as `user`.
    pub async fn post_as(&self, user: &str, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .header(USER_ID_HEADER, user)
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    /// POST a JSON body with no identity header.
    pub async fn post_anonymous(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    /// PATCH a JSON body as `user`.
    pub async fn patch_as(&self, user: &str, path: &str, body: &Value) -> Response {
        self.client
            .patch(self.url(path))
            .header(USER_ID_HEADER, user)
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    /// DELETE as `user`.
    pub async fn delete_as(&self, user: &str, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .header(USER_ID_HEADER, user)
            .send()
            .await
            .expect("request failed")
    }
}

/// Create a store via the API and return its id.
pub async fn create_store(server: &TestServer, user: &str, name: &str) -> String {
    let resp = server
        .post_as(user, "/api/stores", &serde_json::json!({"name": name}))
        .await;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.expect("store body");
    body["id"].as_str().expect("store id").to_string()
}

/// Extract the `id` field from a JSON response body.
pub async fn body_id(resp: Response) -> String {
    let body: Value = resp.json().await.expect("json body");
    body["id"].as_str().expect("id field").to_string()
}
