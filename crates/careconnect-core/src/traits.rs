//! Common traits for repositories
//!
//! Defines abstractions for database access so services can be unit-tested
//! against mock implementations.

use crate::error::AppError;
use crate::models::{Company, OverdueCompany, RateTable, RoleCount};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Billing configuration repository
#[async_trait]
pub trait BillingConfigRepository: Send + Sync {
    /// Load the persisted rate table
    ///
    /// Returns `Ok(None)` when no active configuration rows exist; the
    /// caller decides whether to fall back to defaults.
    async fn load_rate_table(&self) -> Result<Option<RateTable>, AppError>;
}

/// Staff repository
#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Count active staff grouped by (company, raw role string)
    ///
    /// Joins active users through their tenant to the owning company. The
    /// grouping key is the raw role column, so case variants of one logical
    /// role produce separate rows; callers must re-bucket by canonical role.
    async fn count_active_by_role(&self, tenant_id: Option<Uuid>)
        -> Result<Vec<RoleCount>, AppError>;

    /// Deactivate every active staff account in a tenant
    ///
    /// Marks rows `suspended_by_billing` and stamps `last_billing_sync` as
    /// one atomic update. Returns the number of accounts touched.
    async fn suspend_tenant_staff(&self, tenant_id: Uuid) -> Result<u64, AppError>;

    /// Reactivate staff accounts the billing engine suspended
    ///
    /// Only rows carrying the `suspended_by_billing` marker are touched, so
    /// accounts deactivated for other reasons stay inactive. Returns the
    /// number of accounts touched.
    async fn restore_tenant_staff(&self, tenant_id: Uuid) -> Result<u64, AppError>;
}

/// Company repository
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find a company by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError>;

    /// Resolve the tenant owned by a company
    async fn tenant_id_of(&self, company_id: Uuid) -> Result<Option<Uuid>, AppError>;

    /// List companies with pagination
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Company>, AppError>;

    /// Count all companies
    async fn count(&self) -> Result<i64, AppError>;
}

/// Invoice repository (read-only to the billing engine)
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Aggregate pending invoices due before `cutoff`, grouped per company
    ///
    /// Restricted to companies with at least one active staff account, so
    /// already-suspended companies are not re-flagged.
    async fn overdue_pending_by_company(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<OverdueCompany>, AppError>;
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(95, 1, 10);
        assert_eq!(meta.total_pages, 10);

        let meta = PaginationMeta::new(101, 1, 10);
        assert_eq!(meta.total_pages, 11);
    }
}
