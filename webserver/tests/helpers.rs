//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use roster::{InMemoryTableStore, RosterStore, TableStore};
use serde_json::Value;
use shared::{STUDENTS_TABLE, Student};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower::ServiceExt;

use webserver::WebServer;

/// In-memory store holding `rows` and a roster that has already fetched them
pub async fn loaded_roster(rows: Vec<Student>) -> (InMemoryTableStore, Arc<RosterStore<InMemoryTableStore>>) {
    let store = InMemoryTableStore::with_rows(STUDENTS_TABLE, rows);
    let roster = Arc::new(RosterStore::new(store.clone()));
    roster.fetch_students().await;
    (store, roster)
}

/// Send one request through a fresh router and decode the JSON reply
pub async fn send<S>(roster: &Arc<RosterStore<S>>, request: Request<Body>) -> (StatusCode, Value)
where
    S: TableStore + 'static,
{
    let router = WebServer::new(roster.clone()).build_router();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn empty(method: Method, uri: &str) -> Request<Body> {
    Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Running server bound to an ephemeral port
pub struct TestServer {
    pub address: SocketAddr,
    shutdown: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start<S>(roster: Arc<RosterStore<S>>) -> Self
    where
        S: TableStore + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let mut webserver = WebServer::new(roster);
        let shutdown = webserver.get_shutdown_sender();
        let handle = tokio::spawn(async move {
            webserver.serve(listener).await.unwrap();
        });

        Self { address, shutdown, handle }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.address)
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(()).await;
        let _ = tokio::time::timeout(std::time::Duration::from_secs(2), self.handle).await;
    }
}

/// Helper to wait for async conditions with timeout
pub async fn wait_for_condition<F, Fut>(mut condition: F, timeout_ms: u64) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let start = std::time::Instant::now();
    let timeout = std::time::Duration::from_millis(timeout_ms);

    loop {
        if condition().await {
            return true;
        }

        if start.elapsed() > timeout {
            return false;
        }

        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
}
