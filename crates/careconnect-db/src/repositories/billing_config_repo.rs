//! Billing configuration repository implementation
//!
//! Loads the per-role rate table from the `billing_configuration` table.
//! Each row carries one role's monthly rate plus the shared cycle columns;
//! the cycle columns are taken from the first row.

use careconnect_core::{
    models::{RateTable, StaffRole},
    traits::BillingConfigRepository,
    AppError, AppResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::collections::BTreeMap;
use tracing::{debug, error, instrument, warn};

/// PostgreSQL implementation of BillingConfigRepository
pub struct PgBillingConfigRepository {
    pool: PgPool,
}

impl PgBillingConfigRepository {
    /// Create a new billing configuration repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RateRow {
    role_name: String,
    monthly_rate: Decimal,
    cycle_days: i32,
    next_billing_date: Option<DateTime<Utc>>,
    is_active: bool,
}

#[async_trait]
impl BillingConfigRepository for PgBillingConfigRepository {
    #[instrument(skip(self))]
    async fn load_rate_table(&self) -> AppResult<Option<RateTable>> {
        debug!("Loading billing configuration");

        let rows = sqlx::query_as::<sqlx::Postgres, RateRow>(
            r#"
            SELECT role_name, monthly_rate, cycle_days, next_billing_date, is_active
            FROM billing_configuration
            WHERE is_active = true
            ORDER BY role_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error loading billing configuration: {}", e);
            AppError::Database(format!("Failed to load billing configuration: {}", e))
        })?;

        let Some(first) = rows.first() else {
            warn!("No active billing configuration rows found");
            return Ok(None);
        };

        let cycle_days = first.cycle_days;
        let next_billing_date = first.next_billing_date;
        let is_active = first.is_active;

        let mut rates: BTreeMap<StaffRole, Decimal> = BTreeMap::new();
        for row in &rows {
            let role = StaffRole::normalize(&row.role_name);
            // two config rows collapsing to one role keep the higher rate
            let entry = rates.entry(role).or_insert(Decimal::ZERO);
            if row.monthly_rate > *entry {
                *entry = row.monthly_rate;
            }
        }

        debug!("Loaded {} rate entries from configuration", rates.len());

        Ok(Some(RateTable {
            rates,
            cycle_days,
            next_billing_date,
            is_active,
        }))
    }
}
