//! Swap (with optional flash callback) and the two reconciliation operations.

use crate::error::PairError;
use crate::events::PairEvent;
use crate::ledger::Host;
use crate::math::{self, FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::pair::{FlashCall, Pair};
use alloy_primitives::{Address, U256};
use tracing::debug;

impl Pair {
    /// Sends the requested outputs to `to`, runs the flash callback if a payload
    /// was given, then requires that what came back keeps the fee-adjusted
    /// product at or above the pre-trade product.
    pub fn swap<H: Host>(
        &self,
        host: &mut H,
        sender: Address,
        amount_a_out: U256,
        amount_b_out: U256,
        to: Address,
        flash: Option<FlashCall<'_, H>>,
    ) -> Result<(), PairError> {
        let _guard = self.lock()?;
        if amount_a_out.is_zero() && amount_b_out.is_zero() {
            return Err(PairError::InsufficientOutputAmount);
        }
        let prior = self.snapshot();
        let (reserve_a, reserve_b) = (prior.reserves.reserve_a, prior.reserves.reserve_b);
        if amount_a_out >= reserve_a || amount_b_out >= reserve_b {
            return Err(PairError::InsufficientLiquidity);
        }
        let (asset_a, asset_b) = self.assets();
        if to == asset_a || to == asset_b {
            return Err(PairError::InvalidRecipient);
        }

        if !amount_a_out.is_zero() {
            self.safe_transfer(host, asset_a, to, amount_a_out)?;
        }
        if !amount_b_out.is_zero() {
            self.safe_transfer(host, asset_b, to, amount_b_out)?;
        }
        if let Some(FlashCall { callee, data }) = flash {
            if !data.is_empty() {
                callee.on_swap(host, self, sender, amount_a_out, amount_b_out, data)?;
            }
        }

        let (balance_a, balance_b) = self.balances(host);
        Self::check_bounds(balance_a, balance_b)?;
        let floor_a = reserve_a - amount_a_out;
        let floor_b = reserve_b - amount_b_out;
        let amount_a_in = balance_a.saturating_sub(floor_a);
        let amount_b_in = balance_b.saturating_sub(floor_b);
        if amount_a_in.is_zero() && amount_b_in.is_zero() {
            return Err(PairError::InsufficientInputAmount);
        }

        let scale = U256::from(FEE_DENOMINATOR);
        let fee = U256::from(FEE_NUMERATOR);
        let adjusted_a = math::sub(math::mul(balance_a, scale)?, math::mul(amount_a_in, fee)?)?;
        let adjusted_b = math::sub(math::mul(balance_b, scale)?, math::mul(amount_b_in, fee)?)?;
        let after = math::mul(adjusted_a, adjusted_b)?;
        let before = math::mul(math::mul(reserve_a, reserve_b)?, scale * scale)?;
        if after < before {
            return Err(PairError::InvariantViolation);
        }

        let next = Self::advance(&prior, balance_a, balance_b, host.now())?;
        self.commit(host, next);
        debug!(
            pair = %self.address(),
            %sender,
            %to,
            %amount_a_in,
            %amount_b_in,
            %amount_a_out,
            %amount_b_out,
            "swap"
        );
        host.emit(PairEvent::Swap {
            pair: self.address(),
            sender,
            amount_a_in,
            amount_b_in,
            amount_a_out,
            amount_b_out,
            to,
        });
        Ok(())
    }

    /// Pays `to` whatever the pair holds beyond its committed reserves.
    pub fn skim<H: Host>(&self, host: &mut H, to: Address) -> Result<(), PairError> {
        let _guard = self.lock()?;
        let reserves = self.reserves();
        let (asset_a, asset_b) = self.assets();
        let (balance_a, balance_b) = self.balances(host);
        let excess_a = math::sub(balance_a, reserves.reserve_a)?;
        let excess_b = math::sub(balance_b, reserves.reserve_b)?;
        if !excess_a.is_zero() {
            self.safe_transfer(host, asset_a, to, excess_a)?;
        }
        if !excess_b.is_zero() {
            self.safe_transfer(host, asset_b, to, excess_b)?;
        }
        debug!(pair = %self.address(), %to, %excess_a, %excess_b, "skim");
        Ok(())
    }

    /// Commits current balances as reserves without moving anything.
    pub fn sync<H: Host>(&self, host: &mut H) -> Result<(), PairError> {
        let _guard = self.lock()?;
        let prior = self.snapshot();
        let (balance_a, balance_b) = self.balances(host);
        let next = Self::advance(&prior, balance_a, balance_b, host.now())?;
        self.commit(host, next);
        Ok(())
    }
}
