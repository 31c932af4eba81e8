//! Billing report types
//!
//! Everything in this module is derived fresh per request from current
//! database state. Nothing here is persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::company::CompanyStatus;
use super::role::StaffRole;

/// One billed role bucket within a company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleBilling {
    /// Canonical role
    pub role: StaffRole,

    /// Active staff in this bucket
    pub count: i64,

    /// Monthly rate per staff member
    pub monthly_rate: Decimal,

    /// `monthly_rate * count`
    pub total_monthly: Decimal,
}

/// Computed billing position for one company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyBilling {
    /// Company identifier
    pub company_id: Uuid,

    /// Company display name
    pub company_name: String,

    /// Company's tenant
    pub tenant_id: Uuid,

    /// Company billing status
    pub status: CompanyStatus,

    /// Per-role billing buckets, one per canonical role present
    pub breakdown: Vec<RoleBilling>,

    /// Sum of all bucket totals
    pub total_monthly_revenue: Decimal,

    /// Start of the current billing cycle (1st or 15th, midnight)
    pub current_cycle_start: DateTime<Utc>,

    /// Due date for the current cycle
    pub next_billing_date: DateTime<Utc>,
}

/// Platform-wide (or single-tenant) billing analytics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageAnalytics {
    /// Companies with at least one active staff member
    pub total_companies: i64,

    /// Active staff across all reported companies
    pub total_active_staff: i64,

    /// Sum of company monthly revenues
    pub total_monthly_revenue: Decimal,

    /// Active headcount per canonical role across all reported companies
    pub role_distribution: BTreeMap<StaffRole, i64>,

    /// Per-company detail
    pub company_breakdown: Vec<CompanyBilling>,
}

/// A company eligible for automatic suspension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionCandidate {
    /// Company in arrears
    pub company_id: Uuid,

    /// Company display name
    pub company_name: String,

    /// Sum of overdue pending invoices
    pub total_overdue: Decimal,

    /// Number of overdue pending invoices
    pub invoice_count: i64,

    /// Due date of the oldest unpaid invoice
    pub oldest_due_date: DateTime<Utc>,

    /// Whole days since the oldest due date
    pub days_overdue: i64,
}

/// A company that was suspended during a suspension run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspendedCompany {
    /// Suspended company
    pub company_id: Uuid,

    /// Company display name
    pub company_name: String,

    /// Staff accounts deactivated
    pub users_suspended: u64,

    /// Days overdue at suspension time
    pub days_overdue: i64,
}

/// Outcome of one `process_auto_suspensions` run
///
/// A company failing to suspend never aborts the batch; its error lands in
/// `errors` and processing continues.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuspensionReport {
    /// Companies suspended this run
    pub suspended: Vec<SuspendedCompany>,

    /// Companies overdue beyond the safety cap, requiring manual review
    pub manual_review: Vec<SuspensionCandidate>,

    /// Per-company failure messages
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_role_distribution_keys_serialize_canonically() {
        let mut distribution = BTreeMap::new();
        distribution.insert(StaffRole::SupportWorker, 3i64);
        distribution.insert(StaffRole::Admin, 1i64);

        let analytics = UsageAnalytics {
            total_companies: 1,
            total_active_staff: 4,
            total_monthly_revenue: dec!(230.00),
            role_distribution: distribution,
            company_breakdown: vec![],
        };

        let json = serde_json::to_string(&analytics).unwrap();
        assert!(json.contains("\"SupportWorker\":3"));
        assert!(json.contains("\"Admin\":1"));
    }

    #[test]
    fn test_suspension_report_default_is_empty() {
        let report = SuspensionReport::default();
        assert!(report.suspended.is_empty());
        assert!(report.manual_review.is_empty());
        assert!(report.errors.is_empty());
    }
}
