//! PostgreSQL implementation of URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};
use std::sync::Arc;

use crate::domain::audit::AuditStamp;
use crate::domain::entities::{NewUrl, UrlFilter, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::domain::url_pair::SiblingRename;
use crate::error::AppError;
use crate::infrastructure::persistence::escape_like;
use serde_json::json;

#[derive(FromRow)]
struct UrlRow {
    id: i64,
    url: String,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_by: Option<i64>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(
            r.id,
            r.url,
            AuditStamp {
                created_by: r.created_by,
                created_at: r.created_at,
                updated_by: r.updated_by,
                updated_at: r.updated_at,
            },
        )
    }
}

/// PostgreSQL repository for URL records.
///
/// Pair writes run in a single transaction so a URL is never stored without
/// its sibling.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

async fn insert_url<'e, E: PgExecutor<'e>>(executor: E, new_url: NewUrl) -> Result<UrlRow, sqlx::Error> {
    sqlx::query_as::<_, UrlRow>(
        r#"
        INSERT INTO urls (url, created_by, created_at, updated_by, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, url, created_by, created_at, updated_by, updated_at
        "#,
    )
    .bind(new_url.url)
    .bind(new_url.audit.created_by)
    .bind(new_url.audit.created_at)
    .bind(new_url.audit.updated_by)
    .bind(new_url.audit.updated_at)
    .fetch_one(executor)
    .await
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create_pair(
        &self,
        primary: NewUrl,
        sibling: NewUrl,
    ) -> Result<(UrlRecord, UrlRecord), AppError> {
        let mut tx = self.pool.begin().await?;

        let primary = insert_url(&mut *tx, primary).await?;
        let sibling = insert_url(&mut *tx, sibling).await?;

        tx.commit().await?;

        Ok((primary.into(), sibling.into()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, url, created_by, created_at, updated_by, updated_at
            FROM urls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, url, created_by, created_at, updated_by, updated_at
            FROM urls
            WHERE url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(
        &self,
        filter: UrlFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<UrlRecord>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, url, created_by, created_at, updated_by, updated_at
            FROM urls
            WHERE ($1::BIGINT IS NULL OR created_by = $1)
              AND ($2::TEXT IS NULL OR url ILIKE '%' || $2 || '%')
            ORDER BY url
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.created_by)
        .bind(filter.search.as_deref().map(escape_like))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: UrlFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM urls
            WHERE ($1::BIGINT IS NULL OR created_by = $1)
              AND ($2::TEXT IS NULL OR url ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(filter.created_by)
        .bind(filter.search.as_deref().map(escape_like))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update_with_siblings(
        &self,
        record: UrlRecord,
        renames: Vec<SiblingRename>,
    ) -> Result<UrlRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        for rename in &renames {
            let result = sqlx::query(
                r#"
                UPDATE urls
                SET url = $2, updated_by = $3, updated_at = $4
                WHERE url = $1
                "#,
            )
            .bind(&rename.from)
            .bind(&rename.to)
            .bind(record.audit.updated_by)
            .bind(record.audit.updated_at)
            .execute(&mut *tx)
            .await?;

            tracing::debug!(
                from = %rename.from,
                to = %rename.to,
                rows = result.rows_affected(),
                "Sibling rename"
            );
        }

        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET url = $2, updated_by = $3, updated_at = $4
            WHERE id = $1
            RETURNING id, url, created_by, created_at, updated_by, updated_at
            "#,
        )
        .bind(record.id)
        .bind(&record.url)
        .bind(record.audit.updated_by)
        .bind(record.audit.updated_at)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("URL not found", json!({"id": record.id})))?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("URL not found", json!({"id": id})));
        }

        Ok(())
    }
}
