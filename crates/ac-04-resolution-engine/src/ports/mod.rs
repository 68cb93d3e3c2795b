//! Ports for the Resolution Engine.

pub mod outbound;

pub use outbound::SettlementLedger;
