//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use nid_mock_server::config::{AppConfig, Environment};
use nid_mock_server::data::ReloadMode;
use nid_mock_server::{HttpServer, Shutdown};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server on an ephemeral port, stopped on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
    _dir: Option<TempDir>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("server unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.expect("response is not JSON"))
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (u16, Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("server unreachable");
        let status = res.status().as_u16();
        (status, res.json().await.expect("response is not JSON"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Dataset used by most tests.
pub fn sample_records() -> Value {
    json!([
        {
            "id": 1,
            "nid": "123",
            "name": "John Doe",
            "father_name": "Richard Doe",
            "mother_name": "Jane Doe",
            "date_of_birth": "01/01/1990",
            "address": { "street": "12 Lake Road", "district": "Dhaka", "division": "Dhaka" }
        },
        {
            "id": 2,
            "nid": "456",
            "name": "Ayesha Rahman",
            "father_name": "Abdur Rahman",
            "mother_name": "Salma Begum",
            "date_of_birth": "15/08/1985",
            "address": { "district": "Gazipur", "division": "Dhaka" }
        },
        {
            "id": 3,
            "nid": "789",
            "name": "Johnny Dhar",
            "father_name": "Sunil Dhar",
            "mother_name": "Mita Dhar",
            "date_of_birth": "02/02/1992",
            "address": { "district": "Sylhet", "division": "Sylhet" }
        }
    ])
}

/// Start a server over `records` written to a temporary file.
pub async fn start_with_records(records: &Value) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("NIDs.json");
    std::fs::write(&path, serde_json::to_vec(records).unwrap()).unwrap();

    let mut config = test_config(&path);
    config.data.reload = ReloadMode::Fresh;
    start(config, Some(dir)).await
}

/// Start a server reading from an arbitrary path.
pub async fn start_with_path(path: &Path) -> TestServer {
    start(test_config(path), None).await
}

pub fn test_config(path: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.data.path = path.to_string_lossy().into_owned();
    config.environment = Environment::Production;
    config
}

pub async fn start(config: AppConfig, dir: Option<TempDir>) -> TestServer {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    TestServer {
        addr,
        client,
        shutdown,
        _dir: dir,
    }
}
