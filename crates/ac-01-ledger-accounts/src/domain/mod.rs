//! Domain layer for Ledger Accounts.

pub mod account;
pub mod batch;
pub mod book;
pub mod invariants;

pub use account::Account;
pub use batch::{BatchReceipt, LedgerOp};
pub use book::AccountBook;
pub use invariants::{invariant_book_consistent, invariant_locked_within_staked};
