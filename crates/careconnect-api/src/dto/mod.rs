//! Data transfer objects for the HTTP API

pub mod billing;
pub mod common;

pub use billing::{AccessChangeResponse, SummaryQuery};
pub use common::{ApiResponse, PaginationParams};
