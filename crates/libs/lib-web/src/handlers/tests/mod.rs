//! Handler tests.
//!
//! Every test drives the real router with `oneshot`. The backend is a small
//! axum app on `127.0.0.1:0` that records each request it receives and answers
//! with a canned status and body.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use lib_auth::encode_session;
use lib_core::{Config, Environment, ServiceCatalog};
use shared::{Role, SessionUser};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::server::{create_router, AppState};

mod subscriptions;

pub const SECRET: &str = "test-session-secret-at-least-32-characters";
pub const BACKEND_TOKEN: &str = "backend-access-token";

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    /// Path plus query
    pub uri: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedCall {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone)]
struct FakeState {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    status: StatusCode,
    body: &'static str,
}

pub struct FakeBackend {
    pub url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeBackend {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            calls: calls.clone(),
            status,
            body,
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            calls,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one backend call, got {:?}", calls);
        calls[0].clone()
    }
}

async fn record(State(state): State<FakeState>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let text = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);

    state.calls.lock().unwrap().push(RecordedCall {
        method,
        uri: uri.to_string(),
        authorization: text(header::AUTHORIZATION),
        content_type: text(header::CONTENT_TYPE),
        body,
    });

    (state.status, [(header::CONTENT_TYPE, "application/json")], state.body).into_response()
}

pub fn test_config(backend_url: &str) -> Config {
    Config {
        backend_url: backend_url.to_string(),
        session_secret: SECRET.to_string(),
        session_max_age_minutes: 15,
        session_refresh_window_minutes: 5,
        backend_timeout_secs: 5,
        environment: Environment::Development,
    }
}

pub fn app(backend_url: &str) -> Router {
    let state = AppState::new(test_config(backend_url), ServiceCatalog::standard().unwrap()).unwrap();
    create_router(state, &[])
}

pub fn session_user(role: Role, responsibilities: &[&str]) -> SessionUser {
    SessionUser {
        id: "u-1".to_string(),
        email: "trader@ivrex.io".to_string(),
        role,
        verification_responsibilities: responsibilities.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn session_token(role: Role, responsibilities: &[&str]) -> String {
    let user = session_user(role, responsibilities);
    encode_session(&user, BACKEND_TOKEN, SECRET, chrono::Duration::minutes(15))
        .unwrap()
        .0
}

pub fn user_token() -> String {
    session_token(Role::User, &[])
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, bearer(token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Send `request` through a fresh router and return status and JSON body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let backend = FakeBackend::start(StatusCode::OK, "{}").await;

    let (status, body) = send(app(&backend.url), empty_request(Method::GET, "/api/nope", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, serde_json::json!({ "message": "Route not found" }));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_health() {
    let backend = FakeBackend::start(StatusCode::OK, "{}").await;
    let response = app(&backend.url)
        .oneshot(empty_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
