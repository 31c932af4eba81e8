//! Billing calculator
//!
//! Turns the raw (company, raw role, count) aggregation into per-company and
//! platform-wide revenue reports. Role counts always pass through
//! `StaffRole::normalize` before rate lookup, so case variants of one role
//! collapse into a single bucket; SQL grouping alone cannot guarantee that
//! because the role column is free text.

use careconnect_core::{
    models::{CompanyBilling, CompanyStatus, RateTable, RoleBilling, StaffRole, UsageAnalytics},
    traits::{BillingConfigRepository, StaffRepository},
    AppResult,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::cycle;

/// Billing calculator over the configuration and staff repositories
pub struct BillingEngine<C: BillingConfigRepository, S: StaffRepository> {
    config_repo: Arc<C>,
    staff_repo: Arc<S>,
}

/// Per-company accumulator for the re-bucketing pass
struct CompanyAcc {
    company_id: Uuid,
    company_name: String,
    tenant_id: Uuid,
    status: CompanyStatus,
    buckets: BTreeMap<StaffRole, i64>,
}

impl<C: BillingConfigRepository, S: StaffRepository> BillingEngine<C, S> {
    /// Create a new billing engine
    pub fn new(config_repo: Arc<C>, staff_repo: Arc<S>) -> Self {
        Self {
            config_repo,
            staff_repo,
        }
    }

    /// Current rate table
    ///
    /// Degrades to the default table when configuration cannot be read or is
    /// empty. The fallback applies to this call only; nothing is cached.
    pub async fn rate_table(&self) -> RateTable {
        match self.config_repo.load_rate_table().await {
            Ok(Some(table)) => table,
            Ok(None) => {
                warn!("Billing configuration is empty, using default rate table");
                RateTable::default_table()
            }
            Err(e) => {
                warn!("Failed to load billing configuration, using default rate table: {}", e);
                RateTable::default_table()
            }
        }
    }

    /// Billing analytics for a single tenant
    #[instrument(skip(self))]
    pub async fn calculate_tenant_billing(&self, tenant_id: Uuid) -> AppResult<UsageAnalytics> {
        self.calculate(Some(tenant_id)).await
    }

    /// Billing analytics across all companies
    #[instrument(skip(self))]
    pub async fn calculate_all_company_billing(&self) -> AppResult<UsageAnalytics> {
        self.calculate(None).await
    }

    async fn calculate(&self, tenant_id: Option<Uuid>) -> AppResult<UsageAnalytics> {
        let rate_table = self.rate_table().await;
        let raw_counts = self.staff_repo.count_active_by_role(tenant_id).await?;

        debug!("Aggregated {} raw role-count rows", raw_counts.len());

        // Second aggregation pass: the SQL grouping keys on the raw role
        // string, so "admin" and "Admin" arrive as separate rows. Re-bucket
        // per company by canonical role before any rate lookup.
        let mut order: Vec<Uuid> = Vec::new();
        let mut companies: HashMap<Uuid, CompanyAcc> = HashMap::new();

        for row in raw_counts {
            let acc = companies.entry(row.company_id).or_insert_with(|| {
                order.push(row.company_id);
                CompanyAcc {
                    company_id: row.company_id,
                    company_name: row.company_name.clone(),
                    tenant_id: row.tenant_id,
                    status: row.company_status,
                    buckets: BTreeMap::new(),
                }
            });

            let role = StaffRole::normalize(&row.role);
            *acc.buckets.entry(role).or_insert(0) += row.active_count;
        }

        let now = Utc::now();
        let cycle_start = cycle::current_cycle_start(now);
        let due_date = cycle::next_billing_date(now);

        let mut total_active_staff: i64 = 0;
        let mut total_monthly_revenue = Decimal::ZERO;
        let mut role_distribution: BTreeMap<StaffRole, i64> = BTreeMap::new();
        let mut company_breakdown = Vec::with_capacity(order.len());

        for company_id in order {
            let Some(acc) = companies.remove(&company_id) else {
                continue;
            };

            let mut breakdown = Vec::with_capacity(acc.buckets.len());
            let mut company_revenue = Decimal::ZERO;

            for (role, count) in acc.buckets {
                let monthly_rate = rate_table.monthly_rate(role);
                let total_monthly = monthly_rate * Decimal::from(count);
                company_revenue += total_monthly;

                total_active_staff += count;
                *role_distribution.entry(role).or_insert(0) += count;

                breakdown.push(RoleBilling {
                    role,
                    count,
                    monthly_rate,
                    total_monthly,
                });
            }

            total_monthly_revenue += company_revenue;

            company_breakdown.push(CompanyBilling {
                company_id: acc.company_id,
                company_name: acc.company_name,
                tenant_id: acc.tenant_id,
                status: acc.status,
                breakdown,
                total_monthly_revenue: company_revenue,
                current_cycle_start: cycle_start,
                next_billing_date: due_date,
            });
        }

        debug!(
            "Computed billing for {} companies, total revenue {}",
            company_breakdown.len(),
            total_monthly_revenue
        );

        Ok(UsageAnalytics {
            total_companies: company_breakdown.len() as i64,
            total_active_staff,
            total_monthly_revenue,
            role_distribution,
            company_breakdown,
        })
    }
}
