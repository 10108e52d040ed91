//! Pair state and the steps every operation shares: committing observed
//! balances into reserves (with price accumulation) and protocol fee accrual.

use crate::error::PairError;
use crate::events::PairEvent;
use crate::guard::LockGuard;
use crate::ledger::{AssetLedger, EventSink, FeeSource, ShareLedger};
use crate::math::{self, PROTOCOL_FEE_WEIGHT, RESERVE_MAX};
use crate::uq112x112::UQ112x112;
use alloy_primitives::{Address, U256};
use parking_lot::Mutex;
use std::sync::atomic::AtomicBool;
use tracing::debug;

/// Committed reserves and the time they were committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves {
    pub reserve_a: U256,
    pub reserve_b: U256,
    pub block_timestamp_last: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PairState {
    pub reserves: Reserves,
    pub price_a_cumulative_last: U256,
    pub price_b_cumulative_last: U256,
    /// reserve_a * reserve_b after the last liquidity event; zero while fees are off.
    pub k_last: U256,
}

/// Shares owed to the protocol, computed before any liquidity event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct FeeAccrual {
    pub fee_on: bool,
    pub mint: Option<(Address, U256)>,
}

impl FeeAccrual {
    pub fn minted(&self) -> U256 {
        self.mint.map_or(U256::ZERO, |(_, shares)| shares)
    }
}

/// Receives borrowed assets mid-swap and is expected to pay for them.
pub trait SwapCallee<H> {
    fn on_swap(
        &mut self,
        host: &mut H,
        pair: &Pair,
        sender: Address,
        amount_a_out: U256,
        amount_b_out: U256,
        data: &[u8],
    ) -> Result<(), PairError>;
}

/// Callback and payload for a flash swap. An empty payload skips the callback.
pub struct FlashCall<'a, H> {
    pub callee: &'a mut dyn SwapCallee<H>,
    pub data: &'a [u8],
}

#[derive(Debug)]
pub struct Pair {
    address: Address,
    asset_a: Address,
    asset_b: Address,
    state: Mutex<PairState>,
    locked: AtomicBool,
}

impl Pair {
    pub fn new(address: Address, asset_a: Address, asset_b: Address) -> Self {
        Self {
            address,
            asset_a,
            asset_b,
            state: Mutex::new(PairState::default()),
            locked: AtomicBool::new(false),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn assets(&self) -> (Address, Address) {
        (self.asset_a, self.asset_b)
    }

    pub fn reserves(&self) -> Reserves {
        self.state.lock().reserves
    }

    pub fn price_a_cumulative_last(&self) -> U256 {
        self.state.lock().price_a_cumulative_last
    }

    pub fn price_b_cumulative_last(&self) -> U256 {
        self.state.lock().price_b_cumulative_last
    }

    pub fn k_last(&self) -> U256 {
        self.state.lock().k_last
    }

    pub(crate) fn lock(&self) -> Result<LockGuard<'_>, PairError> {
        LockGuard::acquire(&self.locked)
    }

    pub(crate) fn snapshot(&self) -> PairState {
        *self.state.lock()
    }

    pub(crate) fn balances<H: AssetLedger>(&self, host: &H) -> (U256, U256) {
        (
            host.balance_of(self.asset_a, self.address),
            host.balance_of(self.asset_b, self.address),
        )
    }

    pub(crate) fn safe_transfer<H: AssetLedger>(
        &self,
        host: &mut H,
        asset: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), PairError> {
        if host.transfer(asset, self.address, to, amount).succeeded() {
            Ok(())
        } else {
            Err(PairError::TransferFailed { asset })
        }
    }

    /// Fails unless both balances fit in 112 bits.
    pub(crate) fn check_bounds(balance_a: U256, balance_b: U256) -> Result<(), PairError> {
        if balance_a > RESERVE_MAX || balance_b > RESERVE_MAX {
            return Err(PairError::Overflow);
        }
        Ok(())
    }

    /// Accumulators advanced to `timestamp` from the committed reserves. Unchanged
    /// within the same second or while either reserve is empty.
    pub(crate) fn accumulate(prior: &PairState, timestamp: u32) -> (U256, U256) {
        let Reserves {
            reserve_a,
            reserve_b,
            block_timestamp_last,
        } = prior.reserves;
        let elapsed = timestamp.wrapping_sub(block_timestamp_last);
        if elapsed == 0 || reserve_a.is_zero() || reserve_b.is_zero() {
            return (prior.price_a_cumulative_last, prior.price_b_cumulative_last);
        }
        let elapsed = U256::from(elapsed);
        let price_a = UQ112x112::encode(reserve_b).uqdiv(reserve_a).raw();
        let price_b = UQ112x112::encode(reserve_a).uqdiv(reserve_b).raw();
        (
            prior
                .price_a_cumulative_last
                .wrapping_add(price_a.wrapping_mul(elapsed)),
            prior
                .price_b_cumulative_last
                .wrapping_add(price_b.wrapping_mul(elapsed)),
        )
    }

    /// Computes the state after committing `balance_a`/`balance_b` at `now`.
    /// Prices accumulate from the previous reserves, not the new balances.
    pub(crate) fn advance(
        prior: &PairState,
        balance_a: U256,
        balance_b: U256,
        now: u64,
    ) -> Result<PairState, PairError> {
        Self::check_bounds(balance_a, balance_b)?;
        let timestamp = now as u32;
        let (price_a_cumulative_last, price_b_cumulative_last) =
            Self::accumulate(prior, timestamp);
        Ok(PairState {
            reserves: Reserves {
                reserve_a: balance_a,
                reserve_b: balance_b,
                block_timestamp_last: timestamp,
            },
            price_a_cumulative_last,
            price_b_cumulative_last,
            k_last: prior.k_last,
        })
    }

    /// Writes `next` and announces the new reserves. The only place pair state changes.
    pub(crate) fn commit<H: EventSink>(&self, host: &mut H, next: PairState) {
        *self.state.lock() = next;
        debug!(
            pair = %self.address,
            reserve_a = %next.reserves.reserve_a,
            reserve_b = %next.reserves.reserve_b,
            timestamp = next.reserves.block_timestamp_last,
            "reserves committed"
        );
        host.emit(PairEvent::Sync {
            pair: self.address,
            reserve_a: next.reserves.reserve_a,
            reserve_b: next.reserves.reserve_b,
        });
    }

    /// Protocol share of sqrt(k) growth since the last liquidity event:
    /// `total * (rootK - rootKLast) / (5 * rootK + rootKLast)`.
    pub(crate) fn accrue_protocol_fee<F: FeeSource + ?Sized>(
        prior: &PairState,
        fees: &F,
        total_shares: U256,
    ) -> Result<FeeAccrual, PairError> {
        let Some(fee_to) = fees.fee_recipient() else {
            return Ok(FeeAccrual {
                fee_on: false,
                mint: None,
            });
        };
        let mut accrual = FeeAccrual {
            fee_on: true,
            mint: None,
        };
        if prior.k_last.is_zero() {
            return Ok(accrual);
        }

        let k = math::mul(prior.reserves.reserve_a, prior.reserves.reserve_b)?;
        let root_k = math::sqrt(k);
        let root_k_last = math::sqrt(prior.k_last);
        if root_k > root_k_last {
            let numerator = math::mul(total_shares, root_k - root_k_last)?;
            let denominator = math::add(
                math::mul(root_k, U256::from(PROTOCOL_FEE_WEIGHT))?,
                root_k_last,
            )?;
            let shares = math::div(numerator, denominator)?;
            if !shares.is_zero() {
                accrual.mint = Some((fee_to, shares));
            }
        }
        Ok(accrual)
    }

    pub(crate) fn mint_protocol_fee<H: ShareLedger>(
        &self,
        host: &mut H,
        accrual: &FeeAccrual,
    ) -> Result<(), PairError> {
        if let Some((fee_to, shares)) = accrual.mint {
            host.mint_shares(self.address, fee_to, shares)?;
            debug!(pair = %self.address, %fee_to, %shares, "protocol fee minted");
        }
        Ok(())
    }

    /// Baseline for the next accrual: the new k when fees are on, otherwise cleared.
    pub(crate) fn refresh_k_last(
        next: &mut PairState,
        accrual: &FeeAccrual,
    ) -> Result<(), PairError> {
        next.k_last = if accrual.fee_on {
            math::mul(next.reserves.reserve_a, next.reserves.reserve_b)?
        } else {
            U256::ZERO
        };
        Ok(())
    }
}
