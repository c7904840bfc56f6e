//! Common test utilities for mesto-api integration tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{json, Value};
use tower::ServiceExt;

use mesto_api::config::Config;
use mesto_api::state::AppState;
use mesto_auth_core::Argon2Hasher;
use mesto_db::memory::MemoryStore;
use mesto_db::Stores;

pub const TEST_SECRET: &str = "api-test-secret-api-test-secret-api-test";

/// Router over a fresh in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        Self::with_metrics(None)
    }

    /// Same as [`TestApp::new`], with `/metrics` served from `handle`
    pub fn with_metrics(handle: Option<PrometheusHandle>) -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://unused".to_string()),
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            _ => None,
        })
        .unwrap();

        let store = MemoryStore::new();
        let hasher = Arc::new(Argon2Hasher::with_params(1024, 1, 1).unwrap());
        let state =
            AppState::with_password_hasher(Stores::from(store.clone()), config, hasher).unwrap();

        Self {
            router: mesto_api::build_router(state, handle),
            store,
        }
    }

    /// Send a request and return status plus parsed JSON body (`Null` if empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_raw(request).await
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Register and sign in, returning `(user_id, token)`
    pub async fn signup_and_signin(&self, email: &str, password: &str) -> (String, String) {
        let (status, user) = self
            .send(
                Method::POST,
                "/signup",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{user}");

        let (status, session) = self
            .send(
                Method::POST,
                "/signin",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{session}");

        (
            user["_id"].as_str().unwrap().to_string(),
            session["token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn create_card(&self, token: &str, name: &str) -> Value {
        let (status, card) = self
            .send(
                Method::POST,
                "/cards",
                Some(token),
                Some(json!({ "name": name, "link": "https://example.com/photo.jpg" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{card}");
        card
    }
}
