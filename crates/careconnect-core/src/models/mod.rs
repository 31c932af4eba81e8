//! Domain models for CareConnect billing
//!
//! This module contains all the core domain models used throughout the engine.

pub mod billing;
pub mod company;
pub mod invoice;
pub mod rates;
pub mod role;
pub mod staff;

pub use billing::{
    CompanyBilling, RoleBilling, SuspendedCompany, SuspensionCandidate, SuspensionReport,
    UsageAnalytics,
};
pub use company::{Company, CompanyStatus};
pub use invoice::{InvoiceStatus, OverdueCompany};
pub use rates::{RateTable, DEFAULT_CYCLE_DAYS};
pub use role::StaffRole;
pub use staff::RoleCount;
