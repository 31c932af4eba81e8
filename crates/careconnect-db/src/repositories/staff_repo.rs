//! Staff repository implementation
//!
//! Provides the raw staff aggregation query behind the billing calculator
//! and the bulk suspend/restore updates used by the suspension engine.

use careconnect_core::{
    models::{CompanyStatus, RoleCount},
    traits::StaffRepository,
    AppError, AppResult,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of StaffRepository
pub struct PgStaffRepository {
    pool: PgPool,
}

impl PgStaffRepository {
    /// Create a new staff repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn parse_status(s: &str) -> CompanyStatus {
        CompanyStatus::from_str(s).unwrap_or_default()
    }
}

#[async_trait]
impl StaffRepository for PgStaffRepository {
    /// Group active staff by (company, raw role string).
    ///
    /// The role column is free text, so this grouping can return several
    /// rows for what is logically one role; the calculator re-buckets by
    /// canonical role afterwards.
    #[instrument(skip(self))]
    async fn count_active_by_role(&self, tenant_id: Option<Uuid>) -> AppResult<Vec<RoleCount>> {
        debug!("Aggregating active staff by company and role");

        let rows = sqlx::query(
            r#"
            SELECT
                c.id AS company_id,
                c.name AS company_name,
                t.id AS tenant_id,
                c.status AS company_status,
                u.role AS role,
                COUNT(*) AS active_count
            FROM users u
            INNER JOIN tenants t ON u.tenant_id = t.id
            INNER JOIN companies c ON t.company_id = c.id
            WHERE u.is_active = true
              AND ($1::uuid IS NULL OR t.id = $1)
            GROUP BY c.id, c.name, t.id, c.status, u.role
            ORDER BY c.name, u.role
            "#,
        )
        .bind(tenant_id)
        .map(|row: sqlx::postgres::PgRow| RoleCount {
            company_id: row.get("company_id"),
            company_name: row.get("company_name"),
            tenant_id: row.get("tenant_id"),
            company_status: Self::parse_status(row.get("company_status")),
            role: row.get("role"),
            active_count: row.get("active_count"),
        })
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error aggregating staff: {}", e);
            AppError::Database(format!("Failed to aggregate staff counts: {}", e))
        })?;

        Ok(rows)
    }

    /// Deactivate every active account in the tenant.
    ///
    /// One statement, so the deactivation is all-or-nothing. Rows get the
    /// `suspended_by_billing` marker so restore can tell them apart from
    /// accounts deactivated by an administrator.
    #[instrument(skip(self))]
    async fn suspend_tenant_staff(&self, tenant_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_active = false,
                suspended_by_billing = true,
                last_billing_sync = NOW(),
                updated_at = NOW()
            WHERE tenant_id = $1
              AND is_active = true
            "#,
        )
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error suspending tenant {} staff: {}", tenant_id, e);
            AppError::Database(format!("Failed to suspend tenant staff: {}", e))
        })?;

        info!(
            "Suspended {} staff accounts for tenant {}",
            result.rows_affected(),
            tenant_id
        );

        Ok(result.rows_affected())
    }

    /// Reactivate only the accounts this engine suspended.
    #[instrument(skip(self))]
    async fn restore_tenant_staff(&self, tenant_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_active = true,
                suspended_by_billing = false,
                last_billing_sync = NOW(),
                updated_at = NOW()
            WHERE tenant_id = $1
              AND suspended_by_billing = true
            "#,
        )
        .bind(tenant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error restoring tenant {} staff: {}", tenant_id, e);
            AppError::Database(format!("Failed to restore tenant staff: {}", e))
        })?;

        info!(
            "Restored {} staff accounts for tenant {}",
            result.rows_affected(),
            tenant_id
        );

        Ok(result.rows_affected())
    }
}
