//! Company model
//!
//! A company is a healthcare organization on the platform. Each company owns
//! a tenant, the logical partition its staff and client data live in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Company billing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    /// Active company - staff accounts enabled
    #[default]
    Active,
    /// Suspended for non-payment - staff accounts disabled
    Suspended,
    /// Cancelled - permanently off the platform
    Cancelled,
}

impl fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyStatus::Active => write!(f, "active"),
            CompanyStatus::Suspended => write!(f, "suspended"),
            CompanyStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl CompanyStatus {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(CompanyStatus::Active),
            "suspended" => Some(CompanyStatus::Suspended),
            "cancelled" => Some(CompanyStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether staff under this company may hold active accounts
    pub fn is_operational(&self) -> bool {
        matches!(self, CompanyStatus::Active)
    }
}

/// Company entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier
    pub id: Uuid,

    /// Company display name
    pub name: String,

    /// Billing status
    pub status: CompanyStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
