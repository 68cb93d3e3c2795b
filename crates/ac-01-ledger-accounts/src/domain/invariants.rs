//! # Domain Invariants
//!
//! Balance rules every account must satisfy after every committed operation.

use super::account::Account;
use super::book::AccountBook;
use shared_types::AccountId;

/// Invariant: `0 <= locked_balance <= staked_balance`.
pub fn invariant_locked_within_staked(account: &Account) -> bool {
    account.is_consistent()
}

/// Invariant: every account in the book is consistent.
///
/// Returns the first offending account, if any.
pub fn invariant_book_consistent(book: &AccountBook) -> Result<(), AccountId> {
    match book.accounts().into_iter().find(|a| !a.is_consistent()) {
        Some(account) => Err(account.id.clone()),
        None => Ok(()),
    }
}
