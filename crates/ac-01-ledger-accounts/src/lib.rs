//! # AC-01 Ledger Accounts
//!
//! Per-participant bookkeeping: staked, locked and pending-reward balances.
//! Knows nothing about attestations.
//!
//! ## Invariants
//!
//! | Rule | Enforced by |
//! |------|-------------|
//! | `locked <= staked` | `lock`, `unlock`, `slash`, `unstake` bounds checks |
//! | slash never touches pending rewards | `Account::slash` |
//! | yield never reads locked | `Account::accrue_yield` |
//! | batches are all-or-nothing | `AccountBook::apply_batch` overlay |
//!
//! ## Module Structure
//!
//! ```text
//! ac-01-ledger-accounts/
//! ├── domain/          # Account, AccountBook, LedgerOp, invariants
//! ├── algorithms/      # Fixed-point yield arithmetic
//! └── ports/           # LedgerAccounts, EscrowLedger
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;

pub use algorithms::{compute_yield, YieldRate};
pub use domain::{
    invariant_book_consistent, invariant_locked_within_staked, Account, AccountBook,
    BatchReceipt, LedgerOp,
};
pub use ports::{EscrowLedger, LedgerAccounts};
