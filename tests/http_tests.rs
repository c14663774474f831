use async_trait::async_trait;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum_test::TestServer;
use bulk_export_proxy::{
    AppBuilder, AppConfig, ExportStatusSource, UpstreamError, UpstreamResponse,
    domain::errors::UpstreamResult,
};
use object_store::{ObjectStore, PutPayload, memory::InMemory, path::Path};
use serde_json::{Value, json};
use std::sync::Arc;

const OWNER_HEADER: &str = "x-owner-id";

/// Status source answering every poll with the same canned response
struct CannedStatus {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl CannedStatus {
    fn completed(manifest: Value) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: manifest.to_string(),
        }
    }

    fn in_progress() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(header::RETRY_AFTER, HeaderValue::from_static("30"));
        headers.insert("x-progress", HeaderValue::from_static("in progress"));
        Self {
            status: StatusCode::ACCEPTED,
            headers,
            body: String::new(),
        }
    }
}

#[async_trait]
impl ExportStatusSource for CannedStatus {
    async fn fetch_status(&self, job_id: &str) -> UpstreamResult<UpstreamResponse> {
        if job_id.contains('.') {
            return Err(UpstreamError::InvalidJobId(job_id.to_string()));
        }

        Ok(UpstreamResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: self.body.clone(),
        })
    }
}

fn owned_manifest(owner: &str) -> Value {
    json!({
        "transactionTime": "2024-01-01T00:00:00Z",
        "request": "https://fhir.example.com/$export",
        "requiresAccessToken": false,
        "output": [{
            "type": "AllergyIntolerance",
            "url": format!("https://store.blob.core.windows.net/{}/2024-01-01/AllergyIntolerance-1-1.ndjson", owner),
            "count": 2
        }],
        "error": []
    })
}

async fn setup_test_server(status: CannedStatus) -> TestServer {
    let store = Arc::new(InMemory::new());
    store
        .put(
            &Path::from("export/Practitioner.ndjson"),
            PutPayload::from_static(b"{\"resourceType\":\"Practitioner\"}\n"),
        )
        .await
        .unwrap();
    store
        .put(
            &Path::from("cid123/2024-01-01/AllergyIntolerance-1-1.ndjson"),
            PutPayload::from_static(b"{\"resourceType\":\"AllergyIntolerance\"}\n"),
        )
        .await
        .unwrap();

    let config = AppConfig {
        proxy_host: "api.example.com".to_string(),
        ..AppConfig::default()
    };

    let services = AppBuilder::new()
        .with_config(config)
        .with_object_store(store)
        .with_status_source(Arc::new(status))
        .build()
        .await
        .unwrap();

    TestServer::new(services.router()).unwrap()
}

fn owner(id: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(OWNER_HEADER),
        HeaderValue::from_static(id),
    )
}

#[tokio::test]
async fn test_health() {
    let server = setup_test_server(CannedStatus::in_progress()).await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_requests_without_owner_are_rejected() {
    let server = setup_test_server(CannedStatus::completed(owned_manifest("cid123"))).await;

    let status = server.get("/_operations/export/job-1").await;
    assert_eq!(status.status_code(), 401);

    let file = server
        .get("/_export/cid123/2024-01-01/AllergyIntolerance-1-1.ndjson")
        .await;
    assert_eq!(file.status_code(), 401);
}

#[tokio::test]
async fn test_completed_status_is_transformed() {
    let server = setup_test_server(CannedStatus::completed(owned_manifest("cid123"))).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_operations/export/job-1")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        HeaderValue::from_static("application/json")
    );

    let manifest = response.json::<Value>();
    assert_eq!(manifest["requiresAccessToken"], json!(true));
    assert_eq!(manifest["transactionTime"], "2024-01-01T00:00:00Z");

    let output = manifest["output"].as_array().unwrap();
    let types: Vec<&str> = output.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["AllergyIntolerance", "Practitioner", "Device", "Organization"]
    );
    for entry in output {
        assert!(
            entry["url"]
                .as_str()
                .unwrap()
                .starts_with("https://api.example.com/_export/cid123/2024-01-01/")
        );
    }
}

#[tokio::test]
async fn test_foreign_manifest_is_rejected_without_leaking() {
    let server = setup_test_server(CannedStatus::completed(owned_manifest("tenant-b"))).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_operations/export/job-1")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 401);
    let text = response.text();
    assert!(!text.contains("AllergyIntolerance-1-1"));
    assert!(!text.contains("store.blob.core.windows.net"));

    let error = response.json::<Value>();
    assert_eq!(error["error"], "ExportCompletionTransformer");
    assert_eq!(error["details"]["fatal"], json!(true));
    assert_eq!(error["details"]["statusCode"], json!(401));
}

#[tokio::test]
async fn test_in_progress_status_passes_through() {
    let server = setup_test_server(CannedStatus::in_progress()).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_operations/export/job-1")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 202);
    assert_eq!(response.header(header::RETRY_AFTER), "30");
    assert_eq!(response.header("x-progress"), "in progress");
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn test_invalid_job_id_is_bad_request() {
    let server = setup_test_server(CannedStatus::in_progress()).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_operations/export/job..1")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_export_file_for_owner() {
    let server = setup_test_server(CannedStatus::in_progress()).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_export/cid123/2024-01-01/AllergyIntolerance-1-1.ndjson")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "{\"resourceType\":\"AllergyIntolerance\"}\n");
    assert_eq!(
        response.header(header::CONTENT_TYPE),
        "application/fhir+ndjson"
    );
    assert!(response.maybe_header(header::ETAG).is_some());
}

#[tokio::test]
async fn test_synthesized_file_is_served_from_template() {
    let server = setup_test_server(CannedStatus::in_progress()).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_export/cid123/2024-01-01/Practitioner-1-1.ndjson")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "{\"resourceType\":\"Practitioner\"}\n");
}

#[tokio::test]
async fn test_export_file_of_other_owner_is_rejected() {
    let server = setup_test_server(CannedStatus::in_progress()).await;
    let (name, value) = owner("tenant-b");

    let response = server
        .get("/_export/cid123/2024-01-01/AllergyIntolerance-1-1.ndjson")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 401);
    assert!(!response.text().contains("AllergyIntolerance\"}"));
}

#[tokio::test]
async fn test_missing_export_file() {
    let server = setup_test_server(CannedStatus::in_progress()).await;
    let (name, value) = owner("cid123");

    let response = server
        .get("/_export/cid123/2024-01-01/Patient-1-1.ndjson")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), 404);
    let error = response.json::<Value>();
    assert_eq!(error["details"]["container"], "cid123");
    assert_eq!(error["details"]["blob"], "2024-01-01/Patient-1-1.ndjson");
}

#[tokio::test]
async fn test_owner_that_is_not_a_container_name_is_rejected_everywhere() {
    let server = setup_test_server(CannedStatus::completed(owned_manifest("CID123"))).await;
    let (name, value) = owner("CID123");

    // Never a manifest the caller could not then download from
    let status = server
        .get("/_operations/export/job-1")
        .add_header(name.clone(), value.clone())
        .await;
    assert_eq!(status.status_code(), 401);
    assert!(!status.text().contains("api.example.com"));

    let file = server
        .get("/_export/CID123/2024-01-01/AllergyIntolerance-1-1.ndjson")
        .add_header(name, value)
        .await;
    assert_eq!(file.status_code(), 401);
}
