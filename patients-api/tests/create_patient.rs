//! HTTP-level tests for `POST /patients`.

use std::{
    io::{self, Write},
    sync::{Arc, Mutex},
};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use data_protection::{
    ErasingRedactor, JsonFormat, LogSink, RedactionPolicy, UnresolvedClassification,
};
use http_body_util::BodyExt;
use patients_api::{build_router, config::default_policy, taxonomy::PersonalData, AppState};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct TestApp {
    router: Router,
    log: SharedBuffer,
    diagnostics: SharedBuffer,
}

fn build_test_app(policy: RedactionPolicy) -> TestApp {
    let log = SharedBuffer::default();
    let diagnostics = SharedBuffer::default();
    let sink = LogSink::builder(Arc::new(policy))
        .category("patients_api")
        .format(JsonFormat::Compact)
        .output(log.clone())
        .diagnostics(diagnostics.clone())
        .build();
    TestApp {
        router: build_router(AppState::new(sink)),
        log,
        diagnostics,
    }
}

fn patient_body() -> JsonValue {
    json!({
        "Name": "Ada Lovelace",
        "Email": "ada@example.com",
        "SocialSecurityNumber": "123-45-6789"
    })
}

fn post_patients(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/patients")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> JsonValue {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_patient_returns_created_and_unredacted_body() {
    let app = build_test_app(default_policy());

    let response = app
        .router
        .oneshot(post_patients(patient_body().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_string();
    let id = location.strip_prefix("/patients/").unwrap();
    assert_eq!(id.len(), 36);
    assert!(id.parse::<uuid::Uuid>().is_ok());

    assert_eq!(body_json(response).await, patient_body());
}

#[tokio::test]
async fn test_create_patient_logs_redacted_entry() {
    let app = build_test_app(default_policy());

    let response = app
        .router
        .oneshot(post_patients(patient_body().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let log = app.log.contents();
    assert!(!log.contains("Ada Lovelace"));
    assert!(!log.contains("ada@example.com"));
    assert!(!log.contains("123-45-6789"));

    let entry: JsonValue = serde_json::from_str(log.trim_end()).unwrap();
    assert_eq!(entry["level"], "Information");
    assert_eq!(entry["category"], "patients_api");
    assert_eq!(entry["message"], "Patient created");
    assert_eq!(
        entry["fields"],
        json!({
            "Name": "R*E*D*A*C*T*E*D",
            "Email": "R*E*D*A*C*T*E*D",
            "SocialSecurityNumber": "R*E*D*A*C*T*E*D"
        })
    );
}

#[tokio::test]
async fn test_fail_closed_policy_still_creates_patient() {
    let policy = RedactionPolicy::builder()
        .register_for::<PersonalData, _>(ErasingRedactor::new())
        .on_unresolved(UnresolvedClassification::FailClosed)
        .build();
    let app = build_test_app(policy);

    let response = app
        .router
        .oneshot(post_patients(patient_body().to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, patient_body());
    assert!(app.log.contents().is_empty());
    assert!(app
        .diagnostics
        .contents()
        .contains("DataProtection:SensitiveData"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = build_test_app(default_policy());

    let response = app
        .router
        .oneshot(post_patients(r#"{"Name": "Ada"}"#.to_string()))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(app.log.contents().is_empty());
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = build_test_app(default_policy());

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/patients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_creations_log_whole_entries() {
    const REQUESTS: usize = 16;

    let app = build_test_app(default_policy());

    let handles: Vec<_> = (0..REQUESTS)
        .map(|_| {
            let router = app.router.clone();
            tokio::spawn(async move {
                router
                    .oneshot(post_patients(patient_body().to_string()))
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let log = app.log.contents();
    let entries: Vec<JsonValue> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(entries.len(), REQUESTS);
    assert!(entries
        .iter()
        .all(|entry| entry["fields"]["SocialSecurityNumber"] == "R*E*D*A*C*T*E*D"));
}
