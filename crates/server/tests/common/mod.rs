//! Common test utilities for API testing.
//!
//! The fixture builds the real router over an in-memory key-value store,
//! so requests run in-process without a socket or a database file.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use chartshelf_core::{
    testing::RecordingNotifier, CatalogPersistence, CatalogStore, Config, KeyValueStorage,
    MemoryStorage,
};
use chartshelf_server::{create_router, AppState};

/// Test fixture with an in-process router.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Shared state behind the router
    pub state: Arc<AppState>,
    /// Backing storage, for checking what was saved
    pub storage: Arc<MemoryStorage>,
    /// Records quota warnings raised while saving
    pub notifier: Arc<RecordingNotifier>,
    /// Static directory served outside `/api`
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a fixture with default configuration.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("index.html"), "<h1>chartshelf</h1>")
            .expect("Failed to write index.html");

        let mut config = Config::default();
        config.server.static_dir = temp_dir.path().to_path_buf();
        config.storage.quota_bytes = test_config.quota_bytes;
        if let Some(items_per_page) = test_config.items_per_page {
            config.pagination.items_per_page = items_per_page;
        }

        let storage = Arc::new(match test_config.quota_bytes {
            Some(quota) => MemoryStorage::new().with_quota(quota),
            None => MemoryStorage::new(),
        });
        let notifier = Arc::new(RecordingNotifier::new());

        let persistence =
            CatalogPersistence::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>)
                .with_key(config.storage.key.clone())
                .with_notifier(notifier.clone());
        let store = CatalogStore::open(persistence);

        let state = Arc::new(AppState::new(config, store));
        let router = create_router(Arc::clone(&state));

        Self {
            router,
            state,
            storage,
            notifier,
            temp_dir,
        }
    }

    /// Add a file through the API and return its id.
    pub async fn add_file(&self, name: &str) -> String {
        let response = self
            .post("/api/files", serde_json::json!({ "fileName": name }))
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["file"]["id"]
            .as_str()
            .expect("Missing file id")
            .to_string()
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Storage quota in bytes
    pub quota_bytes: Option<usize>,
    /// Page size override
    pub items_per_page: Option<usize>,
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
