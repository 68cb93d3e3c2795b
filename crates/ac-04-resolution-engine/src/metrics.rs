//! # Resolution Metrics
//!
//! Prometheus metrics for resolution outcomes and fund movements.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ac-04-resolution-engine = { path = "...", features = ["metrics"] }
//! ```
//!
//! - `court_resolutions_total{outcome}` - periods finalized, by `valid`/`invalid`/`disputed`
//! - `court_resolve_rejected_total{reason}` - resolve calls that changed nothing
//! - `court_stake_slashed_total` - units slashed from minority attestors
//! - `court_rewards_distributed_total` - units credited to majority attestors
//! - `court_dust_retained_total` - flooring remainder kept by the protocol

use crate::domain::Resolution;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_gauge, CounterVec, Gauge};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref RESOLUTIONS: CounterVec = register_counter_vec!(
        "court_resolutions_total",
        "Total number of attestation periods finalized",
        &["outcome"]
    )
    .expect("Failed to create RESOLUTIONS metric");

    pub static ref RESOLVE_REJECTED: CounterVec = register_counter_vec!(
        "court_resolve_rejected_total",
        "Total number of resolve calls that changed nothing",
        &["reason"]
    )
    .expect("Failed to create RESOLVE_REJECTED metric");

    pub static ref STAKE_SLASHED: Gauge = register_gauge!(
        "court_stake_slashed_total",
        "Total units slashed from minority attestors"
    )
    .expect("Failed to create STAKE_SLASHED metric");

    pub static ref REWARDS_DISTRIBUTED: Gauge = register_gauge!(
        "court_rewards_distributed_total",
        "Total units credited to majority attestors"
    )
    .expect("Failed to create REWARDS_DISTRIBUTED metric");

    pub static ref DUST_RETAINED: Gauge = register_gauge!(
        "court_dust_retained_total",
        "Total flooring remainder retained by the protocol"
    )
    .expect("Failed to create DUST_RETAINED metric");
}

fn outcome_label(resolution: &Resolution) -> &'static str {
    if resolution.is_disputed() {
        "disputed"
    } else if resolution.resolved_is_valid {
        "valid"
    } else {
        "invalid"
    }
}

/// Record a finalized period and the funds it moved.
#[cfg(feature = "metrics")]
pub fn record_resolution(resolution: &Resolution) {
    RESOLUTIONS
        .with_label_values(&[outcome_label(resolution)])
        .inc();
    STAKE_SLASHED.add(resolution.total_slashed() as f64);
    REWARDS_DISTRIBUTED.add(resolution.total_rewarded() as f64);
    DUST_RETAINED.add(resolution.dust as f64);
}

/// Record a resolve call rejected with `reason`.
#[cfg(feature = "metrics")]
pub fn record_resolve_rejected(reason: &str) {
    RESOLVE_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(not(feature = "metrics"))]
pub fn record_resolution(resolution: &Resolution) {
    let _ = outcome_label(resolution);
}

#[cfg(not(feature = "metrics"))]
pub fn record_resolve_rejected(_reason: &str) {}
