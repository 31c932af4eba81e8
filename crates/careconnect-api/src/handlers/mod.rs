//! HTTP request handlers

pub mod billing;
pub mod company;
pub mod suspension;

pub use billing::configure as configure_billing;
pub use company::configure as configure_companies;
pub use suspension::configure as configure_suspensions;
