//! PostgreSQL implementation of domain repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use std::sync::Arc;

use crate::domain::audit::AuditStamp;
use crate::domain::entities::{Domain, DomainFilter, NewDomain};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::escape_like;
use serde_json::json;

/// Columns selected for every domain read; category and language ids are
/// aggregated from the join tables.
const DOMAIN_SELECT: &str = r#"
    SELECT
        d.id,
        d.about,
        d.url_id,
        u.url,
        d.subdomain_id,
        COALESCE(
            (SELECT array_agg(dc.category_id ORDER BY dc.category_id)
             FROM domain_categories dc WHERE dc.domain_id = d.id),
            '{}'::BIGINT[]
        ) AS category_ids,
        COALESCE(
            (SELECT array_agg(dl.language_id ORDER BY dl.language_id)
             FROM domain_languages dl WHERE dl.domain_id = d.id),
            '{}'::BIGINT[]
        ) AS language_ids,
        d.created_by,
        d.created_at,
        d.updated_by,
        d.updated_at
    FROM domains d
    LEFT JOIN urls u ON u.id = d.url_id
"#;

#[derive(FromRow)]
struct DomainRow {
    id: i64,
    about: String,
    url_id: Option<i64>,
    url: Option<String>,
    subdomain_id: Option<i64>,
    category_ids: Vec<i64>,
    language_ids: Vec<i64>,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_by: Option<i64>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<DomainRow> for Domain {
    fn from(r: DomainRow) -> Self {
        Domain {
            id: r.id,
            about: r.about,
            url_id: r.url_id,
            url: r.url,
            subdomain_id: r.subdomain_id,
            category_ids: r.category_ids,
            language_ids: r.language_ids,
            audit: AuditStamp {
                created_by: r.created_by,
                created_at: r.created_at,
                updated_by: r.updated_by,
                updated_at: r.updated_at,
            },
        }
    }
}

/// PostgreSQL repository for domain records.
///
/// A domain and its category/language sets are always written in one
/// transaction.
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

async fn fetch_domain(conn: &mut PgConnection, id: i64) -> Result<Option<Domain>, sqlx::Error> {
    let sql = format!("{DOMAIN_SELECT} WHERE d.id = $1");
    let row = sqlx::query_as::<_, DomainRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(row.map(Into::into))
}

/// Replaces the category and language sets of a domain.
async fn replace_sets(
    conn: &mut PgConnection,
    domain_id: i64,
    category_ids: &[i64],
    language_ids: &[i64],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM domain_categories WHERE domain_id = $1")
        .bind(domain_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO domain_categories (domain_id, category_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(domain_id)
    .bind(category_ids)
    .execute(&mut *conn)
    .await?;

    sqlx::query("DELETE FROM domain_languages WHERE domain_id = $1")
        .bind(domain_id)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO domain_languages (domain_id, language_id)
        SELECT $1, UNNEST($2::BIGINT[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(domain_id)
    .bind(language_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO domains (about, url_id, subdomain_id, created_by, created_at, updated_by, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&new_domain.about)
        .bind(new_domain.url_id)
        .bind(new_domain.subdomain_id)
        .bind(new_domain.audit.created_by)
        .bind(new_domain.audit.created_at)
        .bind(new_domain.audit.updated_by)
        .bind(new_domain.audit.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        replace_sets(
            &mut tx,
            id,
            &new_domain.category_ids,
            &new_domain.language_ids,
        )
        .await?;

        let domain = fetch_domain(&mut tx, id).await?.ok_or_else(|| {
            AppError::internal("Created domain not readable", json!({"id": id}))
        })?;

        tx.commit().await?;
        Ok(domain)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Domain>, AppError> {
        let mut conn = self.pool.acquire().await?;
        Ok(fetch_domain(&mut conn, id).await?)
    }

    async fn list(
        &self,
        filter: DomainFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Domain>, AppError> {
        let sql = format!(
            r#"{DOMAIN_SELECT}
            WHERE ($1::BIGINT IS NULL OR d.created_by = $1)
              AND ($2::TEXT IS NULL OR u.url ILIKE '%' || $2 || '%')
            ORDER BY u.url NULLS LAST, d.id
            LIMIT $3 OFFSET $4
            "#
        );

        let rows = sqlx::query_as::<_, DomainRow>(&sql)
            .bind(filter.created_by)
            .bind(filter.search.as_deref().map(escape_like))
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: DomainFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM domains d
            LEFT JOIN urls u ON u.id = d.url_id
            WHERE ($1::BIGINT IS NULL OR d.created_by = $1)
              AND ($2::TEXT IS NULL OR u.url ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(filter.created_by)
        .bind(filter.search.as_deref().map(escape_like))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update(&self, domain: Domain) -> Result<Domain, AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE domains SET
                about        = $2,
                url_id       = $3,
                subdomain_id = $4,
                updated_by   = $5,
                updated_at   = $6
            WHERE id = $1
            "#,
        )
        .bind(domain.id)
        .bind(&domain.about)
        .bind(domain.url_id)
        .bind(domain.subdomain_id)
        .bind(domain.audit.updated_by)
        .bind(domain.audit.updated_at)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Domain not found",
                json!({"id": domain.id}),
            ));
        }

        replace_sets(&mut tx, domain.id, &domain.category_ids, &domain.language_ids).await?;

        let saved = fetch_domain(&mut tx, domain.id).await?.ok_or_else(|| {
            AppError::internal("Updated domain not readable", json!({"id": domain.id}))
        })?;

        tx.commit().await?;
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM domains WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Domain not found", json!({"id": id})));
        }

        Ok(())
    }
}
