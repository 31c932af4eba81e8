//! Staff aggregation model
//!
//! Staff accounts live in the `users` table and belong to a tenant. The
//! billing engine never materializes individual accounts; it aggregates
//! them per (company, raw role string) and mutates them in bulk during
//! suspend/restore.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::company::CompanyStatus;

/// One row of the raw staff aggregation query: active-staff count per
/// (company, raw role string). Role strings are NOT normalized here; the
/// billing calculator re-buckets by canonical role in a second pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCount {
    /// Owning company
    pub company_id: Uuid,

    /// Company display name
    pub company_name: String,

    /// Company's tenant
    pub tenant_id: Uuid,

    /// Company billing status
    pub company_status: CompanyStatus,

    /// Raw role string as grouped by SQL
    pub role: String,

    /// Number of active staff with this exact role string
    pub active_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_count_carries_raw_role() {
        let count = RoleCount {
            company_id: Uuid::new_v4(),
            company_name: "Sunrise Care".to_string(),
            tenant_id: Uuid::new_v4(),
            company_status: CompanyStatus::Active,
            role: "support worker".to_string(),
            active_count: 3,
        };
        // the raw spelling survives until the calculator re-buckets
        assert_eq!(count.role, "support worker");
    }
}
