//! In-memory host: asset and share balances, a clock and an event log.

use crate::error::LedgerError;
use crate::events::PairEvent;
use crate::ledger::{AssetLedger, Clock, EventSink, ShareLedger, TransferReceipt};
use alloy_primitives::{Address, U256};
use std::collections::HashMap;

/// How an asset answers a transfer call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferStyle {
    #[default]
    ReturnsBool,
    ReturnsNothing,
    /// Refuses every transfer by returning `false`.
    ReturnsFalse,
}

/// Share balances live next to asset balances, keyed by the issuing pair.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub holdings: HashMap<(Address, Address), U256>,
    pub supplies: HashMap<Address, U256>,
    pub styles: HashMap<Address, TransferStyle>,
    pub events: Vec<PairEvent>,
    pub now: u64,
}

impl World {
    pub fn at(now: u64) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn advance(&mut self, secs: u64) {
        self.now += secs;
    }

    /// Creates `amount` of `asset` out of thin air for `holder`.
    pub fn credit(&mut self, asset: Address, holder: Address, amount: U256) {
        *self.holdings.entry((asset, holder)).or_default() += amount;
        *self.supplies.entry(asset).or_default() += amount;
    }

    pub fn set_transfer_style(&mut self, asset: Address, style: TransferStyle) {
        self.styles.insert(asset, style);
    }

    /// Runs `f`, restoring every balance and event if it fails.
    pub fn transact<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
        let snapshot = self.clone();
        let out = f(self);
        if out.is_err() {
            *self = snapshot;
        }
        out
    }

    fn debit(&mut self, asset: Address, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let bal = self.holdings.entry((asset, holder)).or_default();
        if *bal < amount {
            return Err(LedgerError::InsufficientBalance {
                asset,
                holder,
                needed: amount,
                available: *bal,
            });
        }
        *bal -= amount;
        Ok(())
    }
}

impl AssetLedger for World {
    fn balance_of(&self, asset: Address, holder: Address) -> U256 {
        self.holdings.get(&(asset, holder)).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TransferReceipt {
        let style = self.styles.get(&asset).copied().unwrap_or_default();
        if style == TransferStyle::ReturnsFalse {
            return TransferReceipt::Returned(false);
        }
        if self.debit(asset, from, amount).is_err() {
            return TransferReceipt::Reverted;
        }
        *self.holdings.entry((asset, to)).or_default() += amount;
        match style {
            TransferStyle::ReturnsNothing => TransferReceipt::NoData,
            _ => TransferReceipt::Returned(true),
        }
    }
}

impl ShareLedger for World {
    fn total_shares(&self, pair: Address) -> U256 {
        self.supplies.get(&pair).copied().unwrap_or_default()
    }

    fn share_balance(&self, pair: Address, holder: Address) -> U256 {
        self.balance_of(pair, holder)
    }

    fn mint_shares(&mut self, pair: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        let supply = self.supplies.entry(pair).or_default();
        *supply = supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { asset: pair })?;
        *self.holdings.entry((pair, to)).or_default() += amount;
        Ok(())
    }

    fn burn_shares(
        &mut self,
        pair: Address,
        from: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.debit(pair, from, amount)?;
        *self.supplies.entry(pair).or_default() -= amount;
        Ok(())
    }
}

impl Clock for World {
    fn now(&self) -> u64 {
        self.now
    }
}

impl EventSink for World {
    fn emit(&mut self, event: PairEvent) {
        self.events.push(event);
    }
}
