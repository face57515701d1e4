//! API router tests against mocked catalog and store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use mockall::predicate::eq;
use tower::ServiceExt;

use vox_api::{create_router, ApiConfig, AppState};
use vox_catalog::{CatalogError, MockClipCatalog};
use vox_models::{ClipId, ClipRecord};
use vox_storage::{MockObjectStore, ObjectMeta, StorageError};
use vox_supply::{RepairMode, SupplierConfig};

fn clip(id: i64) -> ClipRecord {
    ClipRecord {
        id: ClipId(id),
        owner_client_id: format!("owner-{id}"),
        storage_key: format!("owner-{id}/s{id}.mp3"),
        sentence_text: format!("Sentence {id}."),
        original_sentence_id: format!("s{id}"),
        taxonomy: None,
    }
}

fn router(catalog: MockClipCatalog, store: MockObjectStore) -> Router {
    let state = AppState::from_parts(
        ApiConfig::default(),
        Arc::new(catalog),
        Arc::new(store),
        SupplierConfig::default().with_repair_mode(RepairMode::Inline),
    );
    create_router(state, None)
}

async fn get(app: Router, uri: &str, client_id: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(id) = client_id {
        builder = builder.header("client_id", id);
    }

    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let app = router(MockClipCatalog::new(), MockObjectStore::new());

    let (status, body) = get(app, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_ready_reports_degraded_store() {
    let mut catalog = MockClipCatalog::new();
    catalog.expect_check_connectivity().returning(|| Ok(()));
    let mut store = MockObjectStore::new();
    store
        .expect_check_connectivity()
        .returning(|| Err(StorageError::AwsSdk("no route to host".to_string())));

    let (status, body) = get(router(catalog, store), "/ready", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["catalog"]["status"], "ok");
    assert_eq!(body["checks"]["storage"]["status"], "error");
}

#[tokio::test]
async fn test_random_clips_returns_descriptors() {
    let mut catalog = MockClipCatalog::new();
    catalog
        .expect_fetch_candidates()
        .withf(|client, locale, limit| client == "reader" && locale == "fr" && *limit == 3)
        .times(1)
        .returning(|_, _, _| Ok(vec![clip(1), clip(2), clip(3)]));

    let mut store = MockObjectStore::new();
    store
        .expect_head_object()
        .times(2)
        .returning(|_| Ok(ObjectMeta { size_bytes: 4096 }));
    store
        .expect_presign_get()
        .returning(|key, _| Ok(format!("https://bucket.example/{key}?sig")));

    let (status, body) = get(
        router(catalog, store),
        "/api/v1/locales/fr/clips?count=2",
        Some("reader"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let clips = body.as_array().unwrap();
    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0]["id"], "1");
    assert_eq!(clips[0]["glob"], "owner-1/s1");
    assert_eq!(clips[0]["audioSrc"], "https://bucket.example/owner-1/s1.mp3?sig");
    assert_eq!(clips[1]["sentence"]["text"], "Sentence 2.");
}

#[tokio::test]
async fn test_random_clips_requires_client_id() {
    let mut catalog = MockClipCatalog::new();
    catalog.expect_fetch_candidates().never();

    let (status, body) = get(
        router(catalog, MockObjectStore::new()),
        "/api/v1/locales/en/clips",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("client_id"));
}

#[tokio::test]
async fn test_random_clips_rejects_non_numeric_count_as_json() {
    let mut catalog = MockClipCatalog::new();
    catalog.expect_fetch_candidates().never();

    let (status, body) = get(
        router(catalog, MockObjectStore::new()),
        "/api/v1/locales/en/clips?count=many",
        Some("reader"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["detail"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = router(MockClipCatalog::new(), MockObjectStore::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("X-Request-ID", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_random_clips_catalog_outage_is_503() {
    let mut catalog = MockClipCatalog::new();
    catalog
        .expect_fetch_candidates()
        .returning(|_, _, _| Err(CatalogError::unavailable("pool exhausted")));

    let (status, _) = get(
        router(catalog, MockObjectStore::new()),
        "/api/v1/locales/en/clips?count=5",
        Some("reader"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_clip_url() {
    let mut catalog = MockClipCatalog::new();
    catalog
        .expect_fetch_by_id()
        .with(eq(ClipId(8)))
        .returning(|id| Ok(clip(id.get())));
    let mut store = MockObjectStore::new();
    store
        .expect_presign_get()
        .returning(|key, _| Ok(format!("signed://{key}")));

    let (status, body) = get(router(catalog, store), "/api/v1/clips/8/url", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "signed://owner-8/s8.mp3");
}

#[tokio::test]
async fn test_clip_url_not_found() {
    let mut catalog = MockClipCatalog::new();
    catalog
        .expect_fetch_by_id()
        .returning(|id| Err(CatalogError::NotFound(id)));
    let mut store = MockObjectStore::new();
    store.expect_presign_get().never();

    let (status, _) = get(router(catalog, store), "/api/v1/clips/99/url", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_avatar_clip_url() {
    let mut store = MockObjectStore::new();
    store.expect_head_object().never();
    store
        .expect_presign_get()
        .with(eq("avatars/me.mp3"), mockall::predicate::always())
        .times(1)
        .returning(|key, _| Ok(format!("signed://{key}")));

    let (status, body) = get(
        router(MockClipCatalog::new(), store),
        "/api/v1/avatar-clips/url?path=avatars/me.mp3",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "signed://avatars/me.mp3");
}

#[tokio::test]
async fn test_avatar_clip_url_rejects_empty_path() {
    let (status, _) = get(
        router(MockClipCatalog::new(), MockObjectStore::new()),
        "/api/v1/avatar-clips/url?path=",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
