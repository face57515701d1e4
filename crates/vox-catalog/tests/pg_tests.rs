//! PostgreSQL catalog integration tests.
//!
//! These tests require a disposable database reachable through `DATABASE_URL`.
//! Run with: `cargo test -p vox-catalog -- --ignored`

use tokio_postgres::NoTls;

use vox_catalog::{CatalogConfig, CatalogError, ClipCatalog, PgCatalog};
use vox_models::ClipId;

async fn seeded_catalog() -> (PgCatalog, tokio_postgres::Client) {
    dotenvy::dotenv().ok();

    let config = CatalogConfig::from_env().expect("DATABASE_URL not set");
    let catalog = PgCatalog::connect(&config)
        .await
        .expect("Failed to connect to catalog");
    catalog.ensure_schema().await.expect("Failed to create schema");

    let (client, connection) = tokio_postgres::connect(&config.database_url, NoTls)
        .await
        .expect("Failed to open fixture connection");
    tokio::spawn(connection);

    client
        .batch_execute(
            "TRUNCATE votes, clips, sentences RESTART IDENTITY CASCADE;
             INSERT INTO sentences (id, text, taxonomy) VALUES
                 ('s1', 'First sentence.', '{\"source\": \"wiki\"}'),
                 ('s2', 'Second sentence.', NULL),
                 ('s3', 'Third sentence.', NULL);
             INSERT INTO clips (client_id, locale, path, original_sentence_id, is_valid) VALUES
                 ('alice', 'en', 'alice/s1.mp3', 's1', NULL),
                 ('bob',   'en', 'bob/s2.mp3',   's2', NULL),
                 ('carol', 'en', 'carol/s3.mp3', 's3', NULL),
                 ('dave',  'de', 'dave/s1.mp3',  's1', NULL),
                 ('erin',  'en', 'erin/s2.mp3',  's2', TRUE);
             INSERT INTO votes (clip_id, client_id, is_valid) VALUES (3, 'reader', TRUE);",
        )
        .await
        .expect("Failed to seed catalog");

    (catalog, client)
}

/// Candidates exclude other locales, validated clips, and clips already voted on.
#[tokio::test]
#[ignore = "requires Postgres"]
async fn test_fetch_candidates_eligibility() {
    let (catalog, _fixture) = seeded_catalog().await;

    let mut ids: Vec<i64> = catalog
        .fetch_candidates("reader", "en", 10)
        .await
        .expect("Failed to fetch candidates")
        .into_iter()
        .map(|c| c.id.get())
        .collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);

    // Authors never receive their own clips.
    let for_alice = catalog.fetch_candidates("alice", "en", 10).await.unwrap();
    assert!(for_alice.iter().all(|c| c.owner_client_id != "alice"));

    let limited = catalog.fetch_candidates("reader", "en", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
#[ignore = "requires Postgres"]
async fn test_fetch_by_id_and_delete() {
    let (catalog, _fixture) = seeded_catalog().await;

    let clip = catalog.fetch_by_id(ClipId(1)).await.expect("clip 1 exists");
    assert_eq!(clip.storage_key, "alice/s1.mp3");
    assert_eq!(clip.sentence_text, "First sentence.");
    assert_eq!(clip.taxonomy, Some(serde_json::json!({ "source": "wiki" })));

    catalog.delete_record(ClipId(1)).await.expect("delete failed");
    // Idempotent.
    catalog.delete_record(ClipId(1)).await.expect("second delete failed");

    let err = catalog.fetch_by_id(ClipId(1)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(ClipId(1))));
}
