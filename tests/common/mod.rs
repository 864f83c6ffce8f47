//! Common test utilities for E2E tests

use postboard::{AppState, config};
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance backed by a fresh database
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig {
                path: db_path,
                max_connections: 4,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        };

        postboard::metrics::init_metrics();
        let state = AppState::new(config).await.unwrap();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        let app = postboard::build_router(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// POST /register and return the raw response
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/register"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap()
    }

    /// Register an account and return its id
    pub async fn create_test_account(&self, username: &str) -> i64 {
        let response = self.register(username, "password").await;
        assert_eq!(response.status(), 200);
        let json: Value = response.json().await.unwrap();
        json["accountId"].as_i64().unwrap()
    }

    /// POST /messages and return the raw response
    pub async fn post_message(&self, posted_by: i64, text: &str) -> reqwest::Response {
        self.client
            .post(self.url("/messages"))
            .json(&serde_json::json!({
                "postedBy": posted_by,
                "messageText": text,
                "timePostedEpoch": 1_669_947_792_i64,
            }))
            .send()
            .await
            .unwrap()
    }

    /// Post a message and return its id
    pub async fn create_test_message(&self, posted_by: i64, text: &str) -> i64 {
        let response = self.post_message(posted_by, text).await;
        assert_eq!(response.status(), 200);
        let json: Value = response.json().await.unwrap();
        json["messageId"].as_i64().unwrap()
    }
}
