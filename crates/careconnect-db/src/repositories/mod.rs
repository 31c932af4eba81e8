//! Repository implementations
//!
//! This module contains concrete implementations of all repository traits
//! defined in careconnect-core, using sqlx for PostgreSQL access.

pub mod billing_config_repo;
pub mod company_repo;
pub mod invoice_repo;
pub mod staff_repo;

pub use billing_config_repo::PgBillingConfigRepository;
pub use company_repo::PgCompanyRepository;
pub use invoice_repo::PgInvoiceRepository;
pub use staff_repo::PgStaffRepository;
