//! PostgreSQL implementation of lookup repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::audit::AuditStamp;
use crate::domain::entities::{Lookup, LookupKind, NewLookup};
use crate::domain::repositories::LookupRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(FromRow)]
struct LookupRow {
    id: i64,
    name: String,
    created_by: Option<i64>,
    created_at: DateTime<Utc>,
    updated_by: Option<i64>,
    updated_at: Option<DateTime<Utc>>,
}

impl LookupRow {
    fn into_lookup(self, kind: LookupKind) -> Lookup {
        Lookup {
            id: self.id,
            kind,
            name: self.name,
            audit: AuditStamp {
                created_by: self.created_by,
                created_at: self.created_at,
                updated_by: self.updated_by,
                updated_at: self.updated_at,
            },
        }
    }
}

/// PostgreSQL repository for subdomains, categories and languages.
///
/// Each kind has its own table; table and column names come from
/// [`LookupKind`] and are never user input.
pub struct PgLookupRepository {
    pool: Arc<PgPool>,
}

impl PgLookupRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn returning(kind: LookupKind) -> String {
    format!(
        "id, {} AS name, created_by, created_at, updated_by, updated_at",
        kind.column()
    )
}

fn not_found(kind: LookupKind, id: i64) -> AppError {
    AppError::not_found(
        "Record not found",
        json!({"kind": kind.table(), "id": id}),
    )
}

#[async_trait]
impl LookupRepository for PgLookupRepository {
    async fn create(&self, new_lookup: NewLookup) -> Result<Lookup, AppError> {
        let kind = new_lookup.kind;
        let sql = format!(
            "INSERT INTO {table} ({column}, created_by, created_at, updated_by, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {returning}",
            table = kind.table(),
            column = kind.column(),
            returning = returning(kind),
        );

        let row = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(&new_lookup.name)
            .bind(new_lookup.audit.created_by)
            .bind(new_lookup.audit.created_at)
            .bind(new_lookup.audit.updated_by)
            .bind(new_lookup.audit.updated_at)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into_lookup(kind))
    }

    async fn find_by_id(&self, kind: LookupKind, id: i64) -> Result<Option<Lookup>, AppError> {
        let sql = format!(
            "SELECT {returning} FROM {table} WHERE id = $1",
            returning = returning(kind),
            table = kind.table(),
        );

        let row = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(|r| r.into_lookup(kind)))
    }

    async fn list(
        &self,
        kind: LookupKind,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Lookup>, AppError> {
        let sql = format!(
            "SELECT {returning} FROM {table} ORDER BY {column}, id LIMIT $1 OFFSET $2",
            returning = returning(kind),
            table = kind.table(),
            column = kind.column(),
        );

        let rows = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(|r| r.into_lookup(kind)).collect())
    }

    async fn count(&self, kind: LookupKind) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());

        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update(&self, lookup: Lookup) -> Result<Lookup, AppError> {
        let kind = lookup.kind;
        let sql = format!(
            "UPDATE {table} SET {column} = $2, updated_by = $3, updated_at = $4
             WHERE id = $1
             RETURNING {returning}",
            table = kind.table(),
            column = kind.column(),
            returning = returning(kind),
        );

        let row = sqlx::query_as::<_, LookupRow>(&sql)
            .bind(lookup.id)
            .bind(&lookup.name)
            .bind(lookup.audit.updated_by)
            .bind(lookup.audit.updated_at)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| not_found(kind, lookup.id))?;

        Ok(row.into_lookup(kind))
    }

    async fn delete(&self, kind: LookupKind, id: i64) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }

        Ok(())
    }
}
