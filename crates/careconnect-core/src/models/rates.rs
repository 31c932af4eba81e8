//! Rate table model
//!
//! Maps canonical staff roles to monthly per-staff rates. Loaded from the
//! `billing_configuration` table; a read failure degrades to the default
//! table for that call only.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::role::StaffRole;

/// Default billing cycle length in days
pub const DEFAULT_CYCLE_DAYS: i32 = 28;

/// Per-role monthly rate table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    /// Monthly rate per staff member, keyed by canonical role
    pub rates: BTreeMap<StaffRole, Decimal>,

    /// Configured billing cycle length in days
    pub cycle_days: i32,

    /// Next configured billing date, if one has been persisted
    pub next_billing_date: Option<DateTime<Utc>>,

    /// Whether billing is active for the platform
    pub is_active: bool,
}

impl RateTable {
    /// The hardcoded default table used when persisted configuration cannot
    /// be read. This is the single authoritative copy of the fallback rates.
    pub fn default_table() -> RateTable {
        let mut rates = BTreeMap::new();
        rates.insert(StaffRole::SupportWorker, dec!(45.00));
        rates.insert(StaffRole::SupportCoordinator, dec!(65.00));
        rates.insert(StaffRole::CaseManager, dec!(75.00));
        rates.insert(StaffRole::Nurse, dec!(85.00));
        rates.insert(StaffRole::Admin, dec!(95.00));
        rates.insert(StaffRole::Unknown, dec!(0.00));

        RateTable {
            rates,
            cycle_days: DEFAULT_CYCLE_DAYS,
            next_billing_date: None,
            is_active: true,
        }
    }

    /// Monthly rate for a role
    ///
    /// A role missing from the table bills at zero rather than erroring, so
    /// an unrecognized role contributes headcount but no revenue.
    pub fn monthly_rate(&self, role: StaffRole) -> Decimal {
        self.rates.get(&role).copied().unwrap_or(Decimal::ZERO)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::default_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_rates() {
        let table = RateTable::default_table();
        assert_eq!(table.monthly_rate(StaffRole::SupportWorker), dec!(45.00));
        assert_eq!(table.monthly_rate(StaffRole::Admin), dec!(95.00));
        assert_eq!(table.monthly_rate(StaffRole::Unknown), dec!(0.00));
        assert_eq!(table.cycle_days, DEFAULT_CYCLE_DAYS);
        assert!(table.is_active);
    }

    #[test]
    fn test_default_table_covers_all_roles() {
        let table = RateTable::default_table();
        for role in StaffRole::ALL {
            assert!(table.rates.contains_key(&role), "missing rate for {}", role);
        }
    }

    #[test]
    fn test_missing_rate_bills_zero() {
        let table = RateTable {
            rates: BTreeMap::new(),
            cycle_days: DEFAULT_CYCLE_DAYS,
            next_billing_date: None,
            is_active: true,
        };
        assert_eq!(table.monthly_rate(StaffRole::Nurse), Decimal::ZERO);
    }
}
