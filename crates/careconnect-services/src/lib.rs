//! Business logic services for CareConnect billing
//!
//! This crate contains the services that orchestrate billing operations:
//! revenue calculation, cycle-date math, and the auto-suspension policy.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service owns its dependencies (repositories) behind core traits
//! - Services are wrapped in Arc for safe sharing across async tasks
//! - All operations are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `BillingEngine` - staff aggregation, role re-bucketing, revenue reports
//! - `SuspensionEngine` - overdue-invoice scan and tenant suspend/restore
//! - `cycle` - pure billing-cycle date math

pub mod billing;
pub mod cycle;
pub mod suspension;

pub use billing::BillingEngine;
pub use suspension::SuspensionEngine;

use careconnect_db::{
    PgBillingConfigRepository, PgCompanyRepository, PgInvoiceRepository, PgStaffRepository,
};

/// Billing engine over the PostgreSQL repositories
pub type PgBillingEngine = BillingEngine<PgBillingConfigRepository, PgStaffRepository>;

/// Suspension engine over the PostgreSQL repositories
pub type PgSuspensionEngine =
    SuspensionEngine<PgInvoiceRepository, PgStaffRepository, PgCompanyRepository>;

/// Business logic constants
pub mod constants {
    /// Fixed payment-terms offset: the billing due date is always the cycle
    /// start plus this many days. The configured `cycle_days` value does not
    /// feed this calculation (see DESIGN.md).
    pub const PAYMENT_TERMS_DAYS: i64 = 14;

    /// Day of month on which the second billing cycle of the month begins
    pub const MID_MONTH_DAY: u32 = 15;

    /// Seconds per day, for pro-rata day ceilings
    pub const SECONDS_PER_DAY: i64 = 86_400;
}
