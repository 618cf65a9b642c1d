//! Test utilities for hookrelay-server integration tests.

use axum::{
    Router,
    body::Bytes,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
};
use hookrelay_core::proxy::Proxy;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::routes;
use crate::state::AppState;

/// Shared secret used in all tests.
pub const TEST_SECRET: &str = "test-webhook-secret";

/// A request the mock upstream received.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct Recorder {
    status: StatusCode,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// Upstream service listening on a loopback port.
pub struct MockUpstream {
    /// Base URL, without trailing slash.
    pub base_url: String,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockUpstream {
    /// Number of requests that reached the upstream.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received
            .lock()
            .expect("recorder lock poisoned")
            .clone()
    }
}

async fn record(State(recorder): State<Recorder>, request: Request) -> StatusCode {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read upstream body");

    recorder
        .received
        .lock()
        .expect("recorder lock poisoned")
        .push(ReceivedRequest {
            method: parts.method,
            path: parts.uri.path().to_string(),
            headers: parts.headers,
            body,
        });
    recorder.hits.fetch_add(1, Ordering::SeqCst);

    recorder.status
}

/// Spawns an upstream that answers every request with `status`.
pub async fn spawn_upstream(status: StatusCode) -> MockUpstream {
    let recorder = Recorder {
        status,
        hits: Arc::new(AtomicUsize::new(0)),
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let hits = recorder.hits.clone();
    let received = recorder.received.clone();

    let app = Router::new().fallback(record).with_state(recorder);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().expect("Failed to read mock upstream address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock upstream failed");
    });

    MockUpstream {
        base_url: format!("http://{}", addr),
        hits,
        received,
    }
}

/// Creates a relay for `provider` pointing at `upstream_url`.
pub fn create_test_proxy(upstream_url: &str, allowed_paths: &[&str], provider: &str) -> Proxy {
    Proxy::new(
        upstream_url,
        Some(allowed_paths.iter().map(|p| p.to_string()).collect()),
        provider,
        TEST_SECRET,
    )
    .expect("Failed to create test proxy")
}

/// Creates the full application router for testing.
pub fn create_test_app(proxy: Proxy) -> Router {
    routes::router(AppState::new(proxy))
}
