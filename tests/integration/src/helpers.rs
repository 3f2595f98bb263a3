//! Test helpers for integration tests
//!
//! Provides the in-process test server, request helpers and response
//! assertions.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use forum_api::{create_app, AppState};
use forum_cache::{MemoryDeliveryQueue, MemoryViewCounter};
use forum_common::AppConfig;
use forum_core::{Snowflake, User};
use forum_db::MemoryStore;
use forum_service::ServiceContext;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Principal header understood by the API
pub const USER_HEADER: &str = "x-user-id";

/// Counter for seeded user ids
static USER_COUNTER: AtomicI64 = AtomicI64::new(1_000);

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: MemoryStore,
    pub queue: Arc<MemoryDeliveryQueue>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on an ephemeral port
    pub async fn start() -> Result<Self> {
        let store = MemoryStore::new();
        let queue = Arc::new(MemoryDeliveryQueue::new());

        let ctx = ServiceContext::builder()
            .memory_store(&store)
            .view_store(Arc::new(MemoryViewCounter::new()))
            .delivery_queue(queue.clone())
            .build()?;
        let app = create_app(AppState::new(ctx, test_config()?));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            queue,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a regular user
    pub async fn user(&self, username: &str) -> User {
        let user = new_user(username);
        self.store.insert_user(user.clone()).await;
        user
    }

    /// Seed a staff user
    pub async fn staff(&self, username: &str) -> User {
        let user = new_user(username).with_staff();
        self.store.insert_user(user.clone()).await;
        user
    }

    /// Make an anonymous GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request as `user_id`
    pub async fn get_as(&self, path: &str, user_id: Snowflake) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header(USER_HEADER, user_id.to_string())
            .send()
            .await?)
    }

    /// Make an anonymous POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request as `user_id`
    pub async fn post_as<T: Serialize>(
        &self,
        path: &str,
        user_id: Snowflake,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header(USER_HEADER, user_id.to_string())
            .json(body)
            .send()
            .await?)
    }

    /// Make a PATCH request as `user_id`
    pub async fn patch_as<T: Serialize>(
        &self,
        path: &str,
        user_id: Snowflake,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .patch(&url)
            .header(USER_HEADER, user_id.to_string())
            .json(body)
            .send()
            .await?)
    }
}

fn new_user(username: &str) -> User {
    let id = USER_COUNTER.fetch_add(1, Ordering::SeqCst);
    User::new(
        Snowflake::new(id),
        username.to_string(),
        format!("{username}@example.com"),
    )
}

/// Configuration with the rate limiter opened wide
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = [
        ("API_PORT", "0"),
        ("DATABASE_URL", "postgres://localhost/unused"),
        ("REDIS_URL", "redis://localhost/unused"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "10000"),
        ("RATE_LIMIT_BURST", "10000"),
    ]
    .into_iter()
    .collect();

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response and return its machine code
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("error body without code: {body}"))
}
