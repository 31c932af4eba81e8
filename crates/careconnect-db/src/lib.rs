//! CareConnect Billing Database Layer
//!
//! This crate provides PostgreSQL database access and repository
//! implementations for the billing engine. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for configuration, staff, companies, invoices
//! - The staff aggregation query behind the billing calculator
//! - Atomic suspend/restore updates for tenant staff

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use careconnect_core::{AppError, AppResult};
pub use sqlx::PgPool;
