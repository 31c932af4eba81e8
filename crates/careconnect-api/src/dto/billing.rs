//! Billing endpoint DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for the billing summary endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryQuery {
    /// Narrow the report to a single tenant; omitted = all companies
    pub tenant_id: Option<Uuid>,
}

/// Result of a manual suspend/restore call
#[derive(Debug, Clone, Serialize)]
pub struct AccessChangeResponse {
    /// Company whose access changed
    pub company_id: Uuid,

    /// Number of staff accounts touched
    pub users_affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_query_defaults_to_all_tenants() {
        let q: SummaryQuery = serde_json::from_str("{}").unwrap();
        assert!(q.tenant_id.is_none());
    }

    #[test]
    fn test_access_change_serialization() {
        let resp = AccessChangeResponse {
            company_id: Uuid::nil(),
            users_affected: 4,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"users_affected\":4"));
    }
}
