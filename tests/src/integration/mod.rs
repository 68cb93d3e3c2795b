//! Cross-crate flows through the court service.

pub mod bus_flows;
pub mod concurrency;
pub mod e2e_court;
