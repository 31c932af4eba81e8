//! Company repository implementation
//!
//! Provides company lookup and the company -> tenant resolution used by the
//! suspension engine.

use careconnect_core::{
    models::{Company, CompanyStatus},
    traits::CompanyRepository,
    AppError, AppResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of CompanyRepository
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    /// Create a new company repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            status: CompanyStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        debug!("Finding company by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, CompanyRow>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM companies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding company {}: {}", id, e);
            AppError::Database(format!("Failed to find company: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn tenant_id_of(&self, company_id: Uuid) -> AppResult<Option<Uuid>> {
        debug!("Resolving tenant for company: {}", company_id);

        let result: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM tenants WHERE company_id = $1")
                .bind(company_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    error!("Database error resolving tenant for {}: {}", company_id, e);
                    AppError::Database(format!("Failed to resolve tenant: {}", e))
                })?;

        Ok(result.map(|(id,)| id))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Company>> {
        debug!("Listing companies with limit {} offset {}", limit, offset);

        let rows = sqlx::query_as::<sqlx::Postgres, CompanyRow>(
            r#"
            SELECT id, name, status, created_at, updated_at
            FROM companies
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing companies: {}", e);
            AppError::Database(format!("Failed to list companies: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting companies: {}", e);
                AppError::Database(format!("Failed to count companies: {}", e))
            })?;

        Ok(result.0)
    }
}
