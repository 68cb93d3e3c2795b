//! # Driven Ports
//!
//! The ledger a resolution settles against.

use ac_01_ledger_accounts::EscrowLedger;
use ac_02_staking_reservoir::StakingReservoir;
use shared_types::Amount;

/// Escrow plus somewhere to put flooring remainders.
pub trait SettlementLedger: EscrowLedger {
    /// Credits undistributable pool remainder to the protocol.
    fn retain_dust(&mut self, amount: Amount);
}

impl SettlementLedger for StakingReservoir {
    fn retain_dust(&mut self, amount: Amount) {
        StakingReservoir::retain_dust(self, amount);
    }
}
