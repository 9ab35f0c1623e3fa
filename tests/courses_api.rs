mod support;

use axum::http::StatusCode;
use enrollment_api::seed_demo_data;
use serde_json::json;
use support::{jill, TestApp};

#[tokio::test]
async fn create_and_read_course() {
    let app = TestApp::new();
    let resp = app.post("/courses", json!({"name": "iOS", "phase": 3})).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let location = resp.location.unwrap();
    assert!(location.starts_with("/courses/"));

    let resp = app.get(&location).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "iOS");
    assert_eq!(resp.body["phase"], 3);
}

#[tokio::test]
async fn create_course_requires_name_and_phase() {
    let app = TestApp::new();
    let resp = app.post("/courses", json!({"name": "  "})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = resp.body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["name", "phase"]);
}

#[tokio::test]
async fn find_course_by_name() {
    let app = TestApp::new();
    let ios = app.create_course("iOS", 3).await;
    app.create_course("Android", 2).await;
    app.create_course("iOS", 1).await;

    let resp = app.get("/courses?name=iOS").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([{"id": ios, "name": "iOS", "phase": 3}]));

    let resp = app.get("/courses?name=Cobol").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));

    let resp = app.get("/courses").await;
    assert_eq!(resp.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_course_is_404() {
    let app = TestApp::new();
    assert_eq!(app.get("/courses/77").await.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get("/courses/77/students").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roster_lists_enrolled_students() {
    let app = TestApp::new();
    let jill_id = app.create_student(jill()).await;
    let mut jack = jill();
    jack["firstName"] = json!("Jack");
    jack["gender"] = json!("M");
    let jack_id = app.create_student(jack).await;
    let course_id = app.create_course("Backend Programming", 3).await;

    for id in [jill_id, jack_id] {
        app.post(&format!("/students/{id}/courses"), json!({"id": course_id}))
            .await;
    }

    let resp = app.get(&format!("/courses/{course_id}/students")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Backend Programming");
    let names: Vec<&str> = resp.body["students"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Jackson Jill", "Jackson Jack"]);
}

#[tokio::test]
async fn seeded_store_serves_demo_enrollments() {
    let app = TestApp::new();
    assert!(seed_demo_data(&app.store).await.unwrap());
    assert!(!seed_demo_data(&app.store).await.unwrap());

    let resp = app.get("/students").await;
    assert_eq!(resp.body["totalElements"], 3);

    let resp = app.get("/courses?name=Ethical%20Hacking").await;
    let course_id = resp.body[0]["id"].as_i64().unwrap();
    let roster = app.get(&format!("/courses/{course_id}/students")).await;
    let names: Vec<&str> = roster.body["students"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Johnson John", "Cheng Mei"]);
}

#[tokio::test]
async fn health_ready_and_version() {
    let app = TestApp::new();

    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["status"], "ok");

    let resp = app.get("/ready").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["store"], "ok");

    let resp = app.get("/version").await;
    assert_eq!(resp.body["name"], "enrollment-api");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();
    let resp = app.get("/api-docs/openapi.json").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body["paths"]["/students/{id}/courses"].is_object());
    assert!(resp.body["paths"]["/courses/{id}/students"].is_object());
}
