//! Property suites over the domain crates.

pub mod attestation;
pub mod resolution;
