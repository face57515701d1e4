//! PostgreSQL catalog implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, error, info};

use vox_models::{ClipId, ClipRecord};

use crate::catalog::ClipCatalog;
use crate::error::{CatalogError, CatalogResult};
use crate::metrics::timed;

/// Tables the catalog queries expect.
///
/// Ingestion owns these tables; the DDL is exposed for fixtures.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sentences (
    id TEXT PRIMARY KEY,
    text TEXT NOT NULL,
    taxonomy JSONB
);

CREATE TABLE IF NOT EXISTS clips (
    id BIGSERIAL PRIMARY KEY,
    client_id TEXT NOT NULL,
    locale TEXT NOT NULL,
    path TEXT NOT NULL CHECK (path <> ''),
    original_sentence_id TEXT NOT NULL REFERENCES sentences (id),
    is_valid BOOLEAN,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS votes (
    id BIGSERIAL PRIMARY KEY,
    clip_id BIGINT NOT NULL REFERENCES clips (id) ON DELETE CASCADE,
    client_id TEXT NOT NULL,
    is_valid BOOLEAN NOT NULL
);

CREATE INDEX IF NOT EXISTS clips_pending_locale_idx ON clips (locale) WHERE is_valid IS NULL;
CREATE INDEX IF NOT EXISTS votes_client_clip_idx ON votes (client_id, clip_id);
"#;

const CLIP_COLUMNS: &str =
    "c.id, c.client_id, c.path, s.text AS sentence, c.original_sentence_id, s.taxonomy";

/// Catalog connection configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Postgres connection string (postgres://...)
    pub database_url: String,
}

impl CatalogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> CatalogResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| CatalogError::config_error("DATABASE_URL not set"))?;
        Ok(Self { database_url })
    }
}

/// Clip catalog backed by PostgreSQL.
///
/// One client is shared by all requests; tokio-postgres pipelines
/// concurrent queries over its connection.
#[derive(Clone)]
pub struct PgCatalog {
    client: Arc<Client>,
}

impl PgCatalog {
    /// Connect and spawn the connection driver task.
    pub async fn connect(config: &CatalogConfig) -> CatalogResult<Self> {
        let (client, connection) = tokio_postgres::connect(&config.database_url, NoTls)
            .await
            .map_err(|e| CatalogError::unavailable(format!("connect failed: {}", e)))?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("catalog connection error: {}", e);
            }
        });

        info!("Connected to clip catalog");
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Create from environment variables.
    pub async fn from_env() -> CatalogResult<Self> {
        Self::connect(&CatalogConfig::from_env()?).await
    }

    /// Create the catalog tables if they are missing.
    pub async fn ensure_schema(&self) -> CatalogResult<()> {
        self.client.batch_execute(SCHEMA).await?;
        Ok(())
    }
}

#[async_trait]
impl ClipCatalog for PgCatalog {
    async fn fetch_candidates(
        &self,
        client_id: &str,
        locale: &str,
        limit: usize,
    ) -> CatalogResult<Vec<ClipRecord>> {
        timed("fetch_candidates", async {
            let query = format!(
                "SELECT {CLIP_COLUMNS}
                 FROM clips c
                 JOIN sentences s ON s.id = c.original_sentence_id
                 WHERE c.locale = $2
                   AND c.is_valid IS NULL
                   AND c.client_id <> $1
                   AND NOT EXISTS (
                       SELECT 1 FROM votes v
                       WHERE v.clip_id = c.id AND v.client_id = $1
                   )
                 ORDER BY random()
                 LIMIT $3"
            );
            let limit = i64::try_from(limit).unwrap_or(i64::MAX);

            let rows = self
                .client
                .query(query.as_str(), &[&client_id, &locale, &limit])
                .await?;

            debug!(
                client_id = %client_id,
                locale = %locale,
                limit,
                found = rows.len(),
                "Fetched clip candidates"
            );

            rows.iter().map(row_to_clip).collect()
        })
        .await
    }

    async fn delete_record(&self, id: ClipId) -> CatalogResult<()> {
        timed("delete_record", async {
            let deleted = self
                .client
                .execute("DELETE FROM clips WHERE id = $1", &[&id.get()])
                .await?;
            debug!(clip_id = %id, deleted, "Deleted clip record");
            Ok(())
        })
        .await
    }

    async fn fetch_by_id(&self, id: ClipId) -> CatalogResult<ClipRecord> {
        timed("fetch_by_id", async {
            let query = format!(
                "SELECT {CLIP_COLUMNS}
                 FROM clips c
                 JOIN sentences s ON s.id = c.original_sentence_id
                 WHERE c.id = $1"
            );

            match self.client.query_opt(query.as_str(), &[&id.get()]).await? {
                Some(row) => row_to_clip(&row),
                None => Err(CatalogError::NotFound(id)),
            }
        })
        .await
    }

    async fn check_connectivity(&self) -> CatalogResult<()> {
        timed("check_connectivity", async {
            self.client.simple_query("SELECT 1").await?;
            Ok(())
        })
        .await
    }
}

fn row_to_clip(row: &Row) -> CatalogResult<ClipRecord> {
    let field = |e: tokio_postgres::Error| CatalogError::invalid_row(e.to_string());

    let storage_key: String = row.try_get("path").map_err(field)?;
    if storage_key.is_empty() {
        return Err(CatalogError::invalid_row("empty path"));
    }

    Ok(ClipRecord {
        id: ClipId(row.try_get("id").map_err(field)?),
        owner_client_id: row.try_get("client_id").map_err(field)?,
        storage_key,
        sentence_text: row.try_get("sentence").map_err(field)?,
        original_sentence_id: row.try_get("original_sentence_id").map_err(field)?,
        taxonomy: row
            .try_get::<_, Option<serde_json::Value>>("taxonomy")
            .map_err(field)?,
    })
}
