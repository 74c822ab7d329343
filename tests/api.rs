//! Handler-level tests: exercise the real router with an in-memory store,
//! asserting routes, status codes and exact JSON bodies.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use swift_codes::api::router;
use swift_codes::swift::models::SwiftRecord;
use swift_codes::swift::repo::{RepoError, SwiftStore};
use swift_codes::swift::service::SwiftService;
use tower::ServiceExt;

struct MemoryStore {
    records: Mutex<Vec<SwiftRecord>>,
}

impl MemoryStore {
    fn new(records: Vec<SwiftRecord>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
        })
    }
}

#[async_trait]
impl SwiftStore for MemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<SwiftRecord>, RepoError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.swift_code == code)
            .cloned())
    }

    async fn find_branches(&self, hq_prefix: &str) -> Result<Vec<SwiftRecord>, RepoError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.swift_code.starts_with(hq_prefix) && !record.is_headquarter)
            .cloned()
            .collect())
    }

    async fn find_by_country(&self, iso2: &str) -> Result<Vec<SwiftRecord>, RepoError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.country_iso2 == iso2)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: &SwiftRecord) -> Result<(), RepoError> {
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|existing| existing.swift_code == record.swift_code)
        {
            return Err(RepoError::DuplicateKey);
        }
        records.push(record.clone());
        Ok(())
    }

    async fn delete_by_code(&self, code: &str) -> Result<(), RepoError> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.swift_code != code);
        if records.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

fn record(code: &str, iso2: &str, country: &str, hq: bool) -> SwiftRecord {
    SwiftRecord {
        swift_code: code.to_string(),
        bank_name: "Test Bank".to_string(),
        address: "123 Main St".to_string(),
        country_iso2: iso2.to_string(),
        country_name: country.to_string(),
        is_headquarter: hq,
    }
}

fn app(records: Vec<SwiftRecord>) -> axum::Router {
    router(SwiftService::new(MemoryStore::new(records)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(vec![]).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(body_json(response).await, json!({"status": "UP"}));
}

#[tokio::test]
async fn test_get_swift_code_not_found() {
    let response = app(vec![])
        .oneshot(get("/swift-codes/TESTUS33XXX"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"message": "SWIFT code not found"})
    );
}

#[tokio::test]
async fn test_get_swift_code_headquarter_without_branches() {
    let response = app(vec![record("TESTUS33XXX", "US", "UNITED STATES", true)])
        .oneshot(get("/swift-codes/TESTUS33XXX"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "address": "123 Main St",
            "bankName": "Test Bank",
            "countryISO2": "US",
            "countryName": "UNITED STATES",
            "isHeadquarter": true,
            "swiftCode": "TESTUS33XXX",
            "branches": [],
        })
    );
}

#[tokio::test]
async fn test_get_swift_code_headquarter_with_branches() {
    let response = app(vec![
        record("TESTUS33XXX", "US", "UNITED STATES", true),
        record("TESTUS33ABC", "US", "UNITED STATES", false),
    ])
    .oneshot(get("/swift-codes/TESTUS33XXX"))
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["branches"],
        json!([{
            "address": "123 Main St",
            "bankName": "Test Bank",
            "countryISO2": "US",
            "isHeadquarter": false,
            "swiftCode": "TESTUS33ABC",
        }])
    );
}

#[tokio::test]
async fn test_country_route_takes_precedence_over_code_route() {
    let response = app(vec![record("TESTUS33XXX", "US", "UNITED STATES", true)])
        .oneshot(get("/swift-codes/country/US"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["countryISO2"], "US");
    assert_eq!(body["countryName"], "UNITED STATES");
    assert_eq!(body["swiftCodes"][0]["swiftCode"], "TESTUS33XXX");
}

#[tokio::test]
async fn test_country_lookup_is_case_sensitive() {
    // Stored values are upper-cased at creation time; a lower-case query
    // parameter matches nothing.
    let response = app(vec![record("TESTUS33XXX", "US", "UNITED STATES", true)])
        .oneshot(get("/swift-codes/country/us"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_country_without_records() {
    let response = app(vec![])
        .oneshot(get("/swift-codes/country/PL"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_swift_code() {
    let store = MemoryStore::new(vec![]);
    let app = router(SwiftService::new(store.clone()));

    let response = app
        .oneshot(post_json(
            "/swift-codes",
            &json!({
                "swiftCode": "TESTUS33XXX",
                "bankName": "Test Bank",
                "address": "123 Main St",
                "countryISO2": "us",
                "countryName": "united states",
                "isHeadquarter": true,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({"message": "SWIFT code created successfully"})
    );

    let records = store.records.lock().unwrap();
    assert_eq!(records[0].country_iso2, "US");
    assert_eq!(records[0].country_name, "UNITED STATES");
}

#[tokio::test]
async fn test_create_malformed_body() {
    let response = app(vec![])
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/swift-codes")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_missing_key() {
    let response = app(vec![])
        .oneshot(post_json(
            "/swift-codes",
            &json!({
                "swiftCode": "TESTUS33XXX",
                "bankName": "Test Bank",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_short_code_is_bad_request() {
    let response = app(vec![])
        .oneshot(post_json(
            "/swift-codes",
            &json!({
                "swiftCode": "TEST",
                "bankName": "Test Bank",
                "address": "123 Main St",
                "countryISO2": "US",
                "countryName": "UNITED STATES",
                "isHeadquarter": false,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_inconsistent_flag_is_bad_request() {
    let response = app(vec![])
        .oneshot(post_json(
            "/swift-codes",
            &json!({
                "swiftCode": "TESTUS33XXX",
                "bankName": "Test Bank",
                "address": "123 Main St",
                "countryISO2": "US",
                "countryName": "UNITED STATES",
                "isHeadquarter": false,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_is_conflict() {
    let response = app(vec![record("TESTUS33XXX", "US", "UNITED STATES", true)])
        .oneshot(post_json(
            "/swift-codes",
            &json!({
                "swiftCode": "TESTUS33XXX",
                "bankName": "Test Bank",
                "address": "123 Main St",
                "countryISO2": "US",
                "countryName": "UNITED STATES",
                "isHeadquarter": true,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_swift_code() {
    let store = MemoryStore::new(vec![record("TESTUS33XXX", "US", "UNITED STATES", true)]);
    let service = SwiftService::new(store.clone());

    let response = router(service.clone())
        .oneshot(delete("/swift-codes/TESTUS33XXX"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "SWIFT code deleted successfully"})
    );

    // a subsequent lookup returns 404
    let response = router(service)
        .oneshot(get("/swift-codes/TESTUS33XXX"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_code_is_not_found() {
    let response = app(vec![])
        .oneshot(delete("/swift-codes/TESTUS33XXX"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_short_code_is_bad_request() {
    let response = app(vec![])
        .oneshot(delete("/swift-codes/TEST"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = app(vec![]).oneshot(get("/openapi.json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/swift-codes/{code}"].is_object());
}
