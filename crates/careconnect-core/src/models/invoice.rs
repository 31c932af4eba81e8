//! Invoice types
//!
//! Invoices are issued by the payments pipeline and are read-only to the
//! billing engine; the suspension policy only scans them in aggregate, so
//! no full invoice entity is materialized here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Issued, awaiting payment
    #[default]
    Pending,
    /// Paid in full
    Paid,
    /// Cancelled, no payment expected
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl InvoiceStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(InvoiceStatus::Pending),
            "paid" => Some(InvoiceStatus::Paid),
            "cancelled" => Some(InvoiceStatus::Cancelled),
            _ => None,
        }
    }
}

/// Aggregated overdue position for one company, as returned by the
/// overdue-invoice scan: pending invoices past the cutoff, grouped per
/// company, restricted to companies that still have active staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverdueCompany {
    /// Company in arrears
    pub company_id: Uuid,

    /// Company display name
    pub company_name: String,

    /// Sum of pending invoice totals past the cutoff
    pub total_overdue: Decimal,

    /// Number of pending invoices past the cutoff
    pub invoice_count: i64,

    /// Due date of the oldest unpaid invoice
    pub oldest_due_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(InvoiceStatus::from_str("Pending"), Some(InvoiceStatus::Pending));
        assert_eq!(InvoiceStatus::from_str("paid"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::from_str("refunded"), None);
    }

    #[test]
    fn test_status_display_round_trip() {
        for status in [InvoiceStatus::Pending, InvoiceStatus::Paid, InvoiceStatus::Cancelled] {
            assert_eq!(InvoiceStatus::from_str(&status.to_string()), Some(status));
        }
    }
}
