#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use enrollment_api::{app, AppState, MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let router = app(AppState::new(store.clone()));
        Self { router, store }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        match body {
            Some(json) => self.send_raw(method, uri, Some("application/json"), json.to_string()).await,
            None => self.dispatch(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()).await,
        }
    }

    /// Send `body` verbatim with an optional content type and its Content-Length.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: String,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_LENGTH, body.len());
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.dispatch(builder.body(Body::from(body)).unwrap()).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        TestResponse { status, location, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Create a student and return its id, parsed from the Location header.
    pub async fn create_student(&self, body: Value) -> i64 {
        let resp = self.post("/students", body).await;
        assert_eq!(resp.status, StatusCode::CREATED, "{:?}", resp.body);
        id_from_location(resp.location.as_deref().unwrap())
    }

    pub async fn create_course(&self, name: &str, phase: i32) -> i64 {
        let resp = self
            .post("/courses", serde_json::json!({"name": name, "phase": phase}))
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{:?}", resp.body);
        id_from_location(resp.location.as_deref().unwrap())
    }
}

pub fn id_from_location(location: &str) -> i64 {
    location.rsplit('/').next().unwrap().parse().unwrap()
}

pub fn jill() -> Value {
    serde_json::json!({
        "firstName": "Jill",
        "lastName": "Jackson",
        "birthDate": "1995-04-17",
        "gender": "V",
        "gsmNumber": "77445521"
    })
}
