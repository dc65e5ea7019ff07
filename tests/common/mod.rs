//! Shared helpers: stub backends on ephemeral ports and a router driver

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    routing::{any, MethodRouter},
    Json, Router,
};
use serde_json::Value;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tower::ServiceExt;

use composite_gateway::{api, AppConfig, AppState};

/// Outbound timeout used by the gateway under test
pub const TEST_TIMEOUT_MS: u64 = 300;

/// What a stub endpoint saw of the last request it received
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub uri: String,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Counts and records the requests reaching one stub endpoint
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<Recorded>>>,
}

impl Recorder {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Recorded {
        self.last
            .lock()
            .unwrap()
            .clone()
            .expect("stub endpoint was never called")
    }

    async fn record(&self, request: Request) {
        self.hits.fetch_add(1, Ordering::SeqCst);

        let method = request.method().to_string();
        let uri = request.uri().to_string();
        let authorization = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        *self.last.lock().unwrap() = Some(Recorded {
            method,
            uri,
            authorization,
            body,
        });
    }
}

/// Endpoint answering every method with a fixed JSON response
pub fn respond(recorder: &Recorder, status: StatusCode, body: Value) -> MethodRouter {
    let recorder = recorder.clone();
    any(move |request: Request| {
        let recorder = recorder.clone();
        let body = body.clone();
        async move {
            recorder.record(request).await;
            (status, Json(body))
        }
    })
}

/// Endpoint answering with a raw text body
pub fn respond_text(recorder: &Recorder, status: StatusCode, body: &'static str) -> MethodRouter {
    let recorder = recorder.clone();
    any(move |request: Request| {
        let recorder = recorder.clone();
        async move {
            recorder.record(request).await;
            (status, body)
        }
    })
}

/// Endpoint that answers only well after the gateway's timeout
pub fn stall(recorder: &Recorder) -> MethodRouter {
    let recorder = recorder.clone();
    any(move |request: Request| {
        let recorder = recorder.clone();
        async move {
            recorder.record(request).await;
            tokio::time::sleep(Duration::from_millis(TEST_TIMEOUT_MS * 10)).await;
            (StatusCode::OK, Json(serde_json::json!({})))
        }
    })
}

/// Serve a stub backend on an ephemeral port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nothing listens on
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn config(auth: Option<&str>, search: Option<&str>, upload: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.backends.auth_url = auth.map(String::from);
    config.backends.search_url = search.map(String::from);
    config.backends.upload_url = upload.map(String::from);
    config.backends.timeout_ms = TEST_TIMEOUT_MS;
    config
}

pub fn gateway(config: AppConfig) -> Router {
    api::create_router(AppState::new(&config).expect("failed to build state"))
}

/// Drive one request through the gateway and decode the JSON answer
pub async fn send(app: Router, request: axum::http::Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str, token: Option<&str>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
