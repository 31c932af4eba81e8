//! Invoice repository implementation
//!
//! The billing engine never writes invoices; it only scans for companies in
//! arrears. The scan is restricted to companies that still have active staff
//! so already-suspended companies are not flagged again.

use careconnect_core::{
    models::{InvoiceStatus, OverdueCompany},
    traits::InvoiceRepository,
    AppError, AppResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of InvoiceRepository
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new invoice repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OverdueRow {
    company_id: Uuid,
    company_name: String,
    total_overdue: Decimal,
    invoice_count: i64,
    oldest_due_date: DateTime<Utc>,
}

impl From<OverdueRow> for OverdueCompany {
    fn from(row: OverdueRow) -> Self {
        OverdueCompany {
            company_id: row.company_id,
            company_name: row.company_name,
            total_overdue: row.total_overdue,
            invoice_count: row.invoice_count,
            oldest_due_date: row.oldest_due_date,
        }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    #[instrument(skip(self))]
    async fn overdue_pending_by_company(
        &self,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<OverdueCompany>> {
        debug!("Scanning pending invoices due before {}", cutoff);

        let rows = sqlx::query_as::<sqlx::Postgres, OverdueRow>(
            r#"
            SELECT
                i.company_id,
                c.name AS company_name,
                SUM(i.total_amount) AS total_overdue,
                COUNT(*) AS invoice_count,
                MIN(i.due_date) AS oldest_due_date
            FROM invoices i
            INNER JOIN companies c ON i.company_id = c.id
            WHERE i.status = $2
              AND i.due_date < $1
              AND EXISTS (
                  SELECT 1
                  FROM users u
                  INNER JOIN tenants t ON u.tenant_id = t.id
                  WHERE t.company_id = c.id
                    AND u.is_active = true
              )
            GROUP BY i.company_id, c.name
            ORDER BY MIN(i.due_date)
            "#,
        )
        .bind(cutoff)
        .bind(InvoiceStatus::Pending.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error scanning overdue invoices: {}", e);
            AppError::Database(format!("Failed to scan overdue invoices: {}", e))
        })?;

        debug!("Found {} companies with overdue invoices", rows.len());

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
