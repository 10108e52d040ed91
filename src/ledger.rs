//! Collaborators a pair relies on but does not own.

use crate::error::LedgerError;
use crate::events::PairEvent;
use alloy_primitives::{Address, U256};

/// What an asset transfer call handed back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferReceipt {
    /// The asset returned a boolean.
    Returned(bool),
    /// The asset returned nothing; counts as success.
    NoData,
    Reverted,
}

impl TransferReceipt {
    pub fn succeeded(self) -> bool {
        matches!(self, Self::Returned(true) | Self::NoData)
    }
}

pub trait AssetLedger {
    fn balance_of(&self, asset: Address, holder: Address) -> U256;
    fn transfer(&mut self, asset: Address, from: Address, to: Address, amount: U256)
    -> TransferReceipt;
}

/// Pool shares, keyed by the pair that issues them.
pub trait ShareLedger {
    fn total_shares(&self, pair: Address) -> U256;
    fn share_balance(&self, pair: Address, holder: Address) -> U256;
    fn mint_shares(&mut self, pair: Address, to: Address, amount: U256) -> Result<(), LedgerError>;
    fn burn_shares(&mut self, pair: Address, from: Address, amount: U256)
    -> Result<(), LedgerError>;
}

pub trait FeeSource {
    fn fee_recipient(&self) -> Option<Address>;
}

/// Fee accrual switched off.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFee;

impl FeeSource for NoFee {
    fn fee_recipient(&self) -> Option<Address> {
        None
    }
}

impl FeeSource for Option<Address> {
    fn fee_recipient(&self) -> Option<Address> {
        *self
    }
}

pub trait Clock {
    /// Seconds; only the low 32 bits are kept by a pair.
    fn now(&self) -> u64;
}

pub trait EventSink {
    fn emit(&mut self, event: PairEvent);
}

/// Everything a pair operation touches outside its own state.
pub trait Host: AssetLedger + ShareLedger + Clock + EventSink {}

impl<T: AssetLedger + ShareLedger + Clock + EventSink> Host for T {}
