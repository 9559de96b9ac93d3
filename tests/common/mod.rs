#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::post;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use formsync::config::{Config, SyncConfig, ValidationMode};
use formsync::state::SharedState;
use formsync::sync::{self, AppsScriptClient};

/// A running server over a throwaway data directory, with its sync worker.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: SharedState,
    pub dir: TempDir,
    shutdown: watch::Sender<bool>,
    worker: JoinHandle<()>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.state.config.data_dir
    }

    /// POST a JSON form to `/api/submit-form`.
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit-form"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit and return the new submission id, asserting success.
    pub async fn create(&self, data: &Value) -> String {
        let (body, status) = self.submit(data).await;
        assert_eq!(status, StatusCode::CREATED, "submit failed: {body}");
        body["submissionId"].as_str().unwrap().to_string()
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Stop the sync worker after it has drained every queued job.
    pub async fn finish_sync(self) -> TempDir {
        let _ = self.shutdown.send(true);
        self.worker.await.expect("sync worker panicked");
        self.dir
    }
}

pub fn test_config(dir: &Path, sync: SyncConfig, validation: ValidationMode) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        data_dir: dir.join("data"),
        teams_file: dir.join("team-list.json"),
        static_dir: dir.join("public"),
        validation,
        max_body_size: 64 * 1024,
        log_level: "warn".to_string(),
        sync,
        sync_timeout: Duration::from_secs(5),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(SyncConfig::Disabled, ValidationMode::Strict).await
}

pub async fn spawn_app_with(sync_config: SyncConfig, validation: ValidationMode) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    spawn_app_in(dir, sync_config, validation).await
}

/// Start the app over an existing directory, e.g. one seeded with records.
pub async fn spawn_app_in(
    dir: TempDir,
    sync_config: SyncConfig,
    validation: ValidationMode,
) -> TestApp {
    let config = test_config(dir.path(), sync_config, validation);

    let store = formsync::open_store(&config.data_dir)
        .await
        .expect("Failed to open store");

    let target = AppsScriptClient::new(&config.sync, config.sync_timeout).unwrap();
    let (queue, jobs) = sync::channel();
    let (shutdown, shutdown_rx) = watch::channel(false);
    let worker = formsync::worker::spawn(Arc::new(target), jobs, shutdown_rx);

    let (app, state) = formsync::build_app(config, Arc::new(store), queue);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        state,
        dir,
        shutdown,
        worker,
    }
}

/// Stand-in for the spreadsheet web app. Appends a row per create and
/// soft-deletes rows it knows; unknown deletes answer `success: false`.
pub struct MockAppsScript {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockAppsScript {
    pub async fn spawn() -> Self {
        let requests: Arc<Mutex<Vec<Value>>> = Arc::default();

        let app = Router::new()
            .route("/exec", post(mock_exec))
            .route("/broken", post(|| async { "<html>Script error</html>" }))
            .route("/slow", post(mock_slow))
            .with_state(requests.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock failed");
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}/exec", self.addr)
    }

    pub fn broken_url(&self) -> String {
        format!("http://{}/broken", self.addr)
    }

    /// Answers like `/exec` but only after a 3 second stall.
    pub fn slow_url(&self) -> String {
        format!("http://{}/slow", self.addr)
    }

    pub fn config(&self) -> SyncConfig {
        SyncConfig::Enabled { url: self.url() }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

async fn mock_exec(
    State(requests): State<Arc<Mutex<Vec<Value>>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut requests = requests.lock().unwrap();

    let reply = if body["action"] == "delete" {
        let known = requests
            .iter()
            .any(|r| r["action"].is_null() && r["submissionId"] == body["submissionId"]);
        if known {
            json!({ "success": true, "message": "Row marked as deleted" })
        } else {
            json!({ "success": false, "message": "Submission not found" })
        }
    } else {
        json!({ "success": true, "message": "Row appended" })
    };

    requests.push(body);
    Json(reply)
}

async fn mock_slow(
    State(requests): State<Arc<Mutex<Vec<Value>>>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(3)).await;
    requests.lock().unwrap().push(body);
    Json(json!({ "success": true, "message": "Row appended" }))
}

/// An address nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/exec")
}

/// Record files currently in the data directory.
pub fn record_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| n.starts_with("submission_"))
        .collect();
    names.sort();
    names
}
