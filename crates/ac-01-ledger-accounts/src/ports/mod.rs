//! Ports for Ledger Accounts.

pub mod inbound;

pub use inbound::{EscrowLedger, LedgerAccounts};
