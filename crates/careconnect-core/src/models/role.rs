//! Staff role model
//!
//! Role names are stored as free text in the users table and appear with
//! inconsistent casing and spacing ("support worker", "SupportWorker",
//! "SUPPORT_WORKER"). All rate lookups and headcount aggregation go through
//! this closed enum so case variants collapse into a single bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical staff role
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum StaffRole {
    /// Direct support worker delivering shifts
    SupportWorker,
    /// Support coordinator managing participant plans
    SupportCoordinator,
    /// Case manager overseeing client records
    CaseManager,
    /// Registered or enrolled nurse
    Nurse,
    /// Administrative staff
    Admin,
    /// Catch-all for role strings that match no canonical role
    #[default]
    Unknown,
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl StaffRole {
    /// All roles, in rate-table order
    pub const ALL: [StaffRole; 6] = [
        StaffRole::SupportWorker,
        StaffRole::SupportCoordinator,
        StaffRole::CaseManager,
        StaffRole::Nurse,
        StaffRole::Admin,
        StaffRole::Unknown,
    ];

    /// Canonical spelling used in reports and rate tables
    pub fn canonical_name(&self) -> &'static str {
        match self {
            StaffRole::SupportWorker => "SupportWorker",
            StaffRole::SupportCoordinator => "SupportCoordinator",
            StaffRole::CaseManager => "CaseManager",
            StaffRole::Nurse => "Nurse",
            StaffRole::Admin => "Admin",
            StaffRole::Unknown => "Unknown",
        }
    }

    /// Normalize a raw role string to its canonical role
    ///
    /// Matching ignores case, whitespace, and separator punctuation, so
    /// "support worker", "Support_Worker", and "SUPPORTWORKER" all map to
    /// `SupportWorker`. Unrecognized strings map to `Unknown`.
    pub fn normalize(raw: &str) -> StaffRole {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "supportworker" => StaffRole::SupportWorker,
            "supportcoordinator" | "coordinator" => StaffRole::SupportCoordinator,
            "casemanager" => StaffRole::CaseManager,
            "nurse" | "registerednurse" | "enrollednurse" => StaffRole::Nurse,
            "admin" | "administrator" => StaffRole::Admin,
            _ => StaffRole::Unknown,
        }
    }

    /// Whether this is a recognized role (not the catch-all)
    pub fn is_recognized(&self) -> bool {
        !matches!(self, StaffRole::Unknown)
    }
}
