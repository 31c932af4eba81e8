//! API layer for CareConnect billing
//!
//! HTTP handlers for billing summaries, rate tables, and suspension
//! administration.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

// Re-export handler configuration functions
pub use handlers::{configure_billing, configure_companies, configure_suspensions};
