//! Share minting against deposits and pro-rata redemption.

use crate::error::PairError;
use crate::events::PairEvent;
use crate::ledger::{FeeSource, Host};
use crate::math::{self, MINIMUM_SHARES};
use crate::pair::Pair;
use alloy_primitives::{Address, U256};
use tracing::debug;

impl Pair {
    /// Mints shares to `to` for whatever landed in the pair since the last commit.
    ///
    /// The first deposit mints `sqrt(a * b) - MINIMUM_SHARES` and locks
    /// `MINIMUM_SHARES` at the zero address. Later deposits are credited at the
    /// worse of the two ratios, so an unbalanced excess is left to existing holders.
    pub fn mint<H: Host, F: FeeSource + ?Sized>(
        &self,
        host: &mut H,
        fees: &F,
        sender: Address,
        to: Address,
    ) -> Result<U256, PairError> {
        let _guard = self.lock()?;
        let prior = self.snapshot();
        let (reserve_a, reserve_b) = (prior.reserves.reserve_a, prior.reserves.reserve_b);
        let (balance_a, balance_b) = self.balances(host);
        Self::check_bounds(balance_a, balance_b)?;
        let amount_a = math::sub(balance_a, reserve_a)?;
        let amount_b = math::sub(balance_b, reserve_b)?;

        let issued = host.total_shares(self.address());
        let accrual = Self::accrue_protocol_fee(&prior, fees, issued)?;
        let total_shares = math::add(issued, accrual.minted())?;
        let genesis = total_shares.is_zero();
        let shares = if genesis {
            math::sqrt(math::mul(amount_a, amount_b)?)
                .checked_sub(U256::from(MINIMUM_SHARES))
                .unwrap_or_default()
        } else {
            let by_a = math::div(math::mul(amount_a, total_shares)?, reserve_a)?;
            let by_b = math::div(math::mul(amount_b, total_shares)?, reserve_b)?;
            by_a.min(by_b)
        };
        if shares.is_zero() {
            return Err(PairError::InsufficientLiquidityMinted);
        }

        let mut next = Self::advance(&prior, balance_a, balance_b, host.now())?;
        Self::refresh_k_last(&mut next, &accrual)?;

        self.mint_protocol_fee(host, &accrual)?;
        if genesis {
            host.mint_shares(self.address(), Address::ZERO, U256::from(MINIMUM_SHARES))?;
        }
        host.mint_shares(self.address(), to, shares)?;

        self.commit(host, next);
        debug!(
            pair = %self.address(),
            %sender,
            %to,
            %shares,
            %amount_a,
            %amount_b,
            "mint"
        );
        host.emit(PairEvent::Mint {
            pair: self.address(),
            sender,
            amount_a,
            amount_b,
        });
        Ok(shares)
    }

    /// Burns the shares the pair holds and pays `to` their slice of live balances.
    pub fn burn<H: Host, F: FeeSource + ?Sized>(
        &self,
        host: &mut H,
        fees: &F,
        sender: Address,
        to: Address,
    ) -> Result<(U256, U256), PairError> {
        let _guard = self.lock()?;
        let prior = self.snapshot();
        let (asset_a, asset_b) = self.assets();
        let (balance_a, balance_b) = self.balances(host);
        Self::check_bounds(balance_a, balance_b)?;
        let shares = host.share_balance(self.address(), self.address());

        let issued = host.total_shares(self.address());
        let accrual = Self::accrue_protocol_fee(&prior, fees, issued)?;
        let total_shares = math::add(issued, accrual.minted())?;
        let amount_a = math::div(math::mul(shares, balance_a)?, total_shares)?;
        let amount_b = math::div(math::mul(shares, balance_b)?, total_shares)?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(PairError::InsufficientLiquidityBurned);
        }

        self.mint_protocol_fee(host, &accrual)?;
        host.burn_shares(self.address(), self.address(), shares)?;
        self.safe_transfer(host, asset_a, to, amount_a)?;
        self.safe_transfer(host, asset_b, to, amount_b)?;

        let (balance_a, balance_b) = self.balances(host);
        let mut next = Self::advance(&prior, balance_a, balance_b, host.now())?;
        Self::refresh_k_last(&mut next, &accrual)?;

        self.commit(host, next);
        debug!(
            pair = %self.address(),
            %sender,
            %to,
            %shares,
            %amount_a,
            %amount_b,
            "burn"
        );
        host.emit(PairEvent::Burn {
            pair: self.address(),
            sender,
            amount_a,
            amount_b,
            to,
        });
        Ok((amount_a, amount_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{AssetLedger, NoFee, ShareLedger};
    use crate::quote::get_amount_out;
    use crate::world::World;

    fn setup() -> (World, Pair, Address, Address) {
        let a = Address::with_last_byte(0xa);
        let b = Address::with_last_byte(0xb);
        let pair = Pair::new(Address::with_last_byte(0xcc), a, b);
        (World::default(), pair, a, b)
    }

    fn deposit(world: &mut World, pair: &Pair, amount_a: u64, amount_b: u64) {
        let (a, b) = pair.assets();
        world.credit(a, pair.address(), U256::from(amount_a));
        world.credit(b, pair.address(), U256::from(amount_b));
    }

    #[test]
    fn genesis_locks_minimum_shares() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        deposit(&mut world, &pair, 4_000, 9_000);
        let shares = pair.mint(&mut world, &NoFee, lp, lp).unwrap();

        assert_eq!(shares, U256::from(5_000u64));
        assert_eq!(world.share_balance(pair.address(), lp), U256::from(5_000u64));
        assert_eq!(
            world.share_balance(pair.address(), Address::ZERO),
            U256::from(MINIMUM_SHARES)
        );
        assert_eq!(world.total_shares(pair.address()), U256::from(6_000u64));
        assert_eq!(pair.reserves().reserve_b, U256::from(9_000u64));
        assert!(pair.k_last().is_zero());
    }

    #[test]
    fn genesis_at_or_below_floor_is_rejected() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        deposit(&mut world, &pair, 1_000, 1_000);
        assert_eq!(
            pair.mint(&mut world, &NoFee, lp, lp),
            Err(PairError::InsufficientLiquidityMinted)
        );
        let (mut world, pair, _, _) = setup();
        deposit(&mut world, &pair, 10, 10);
        assert_eq!(
            pair.mint(&mut world, &NoFee, lp, lp),
            Err(PairError::InsufficientLiquidityMinted)
        );
        assert_eq!(pair.reserves().reserve_a, U256::ZERO);
    }

    #[test]
    fn unbalanced_deposit_credits_smaller_ratio() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        let late = Address::with_last_byte(2);
        deposit(&mut world, &pair, 10_000, 10_000);
        pair.mint(&mut world, &NoFee, lp, lp).unwrap();

        deposit(&mut world, &pair, 1_000, 5_000);
        let shares = pair.mint(&mut world, &NoFee, late, late).unwrap();
        assert_eq!(shares, U256::from(1_000u64));
        assert_eq!(pair.reserves().reserve_b, U256::from(15_000u64));
    }

    #[test]
    fn dust_deposit_is_rejected() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        deposit(&mut world, &pair, 10_000, 10_000);
        pair.mint(&mut world, &NoFee, lp, lp).unwrap();
        deposit(&mut world, &pair, 0, 1);
        assert_eq!(
            pair.mint(&mut world, &NoFee, lp, lp),
            Err(PairError::InsufficientLiquidityMinted)
        );
    }

    #[test]
    fn burn_pays_pro_rata_of_live_balances() {
        let (mut world, pair, a, b) = setup();
        let lp = Address::with_last_byte(1);
        deposit(&mut world, &pair, 4_000, 9_000);
        pair.mint(&mut world, &NoFee, lp, lp).unwrap();

        assert!(
            world
                .transfer(pair.address(), lp, pair.address(), U256::from(5_000u64))
                .succeeded()
        );
        let (out_a, out_b) = pair.burn(&mut world, &NoFee, lp, lp).unwrap();
        assert_eq!(out_a, U256::from(3_333u64));
        assert_eq!(out_b, U256::from(7_500u64));
        assert_eq!(world.balance_of(a, lp), U256::from(3_333u64));
        assert_eq!(world.balance_of(b, lp), U256::from(7_500u64));
        assert_eq!(world.total_shares(pair.address()), U256::from(MINIMUM_SHARES));
        assert_eq!(pair.reserves().reserve_a, U256::from(667u64));
        assert_eq!(pair.reserves().reserve_b, U256::from(1_500u64));
    }

    #[test]
    fn burning_nothing_is_rejected() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        deposit(&mut world, &pair, 4_000, 9_000);
        pair.mint(&mut world, &NoFee, lp, lp).unwrap();
        assert_eq!(
            pair.burn(&mut world, &NoFee, lp, lp),
            Err(PairError::InsufficientLiquidityBurned)
        );
    }

    #[test]
    fn fee_accrues_on_next_liquidity_event() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        let fee_to = Some(Address::with_last_byte(0xfe));
        deposit(&mut world, &pair, 10_000, 10_000);
        pair.mint(&mut world, &fee_to, lp, lp).unwrap();
        assert_eq!(pair.k_last(), U256::from(100_000_000u64));

        deposit(&mut world, &pair, 1_000, 1_000);
        pair.sync(&mut world).unwrap();

        deposit(&mut world, &pair, 1_100, 1_100);
        let shares = pair.mint(&mut world, &fee_to, lp, lp).unwrap();
        assert_eq!(
            world.share_balance(pair.address(), Address::with_last_byte(0xfe)),
            U256::from(153u64)
        );
        assert_eq!(shares, U256::from(1_015u64));
        assert_eq!(pair.k_last(), U256::from(146_410_000u64));
    }

    #[test]
    fn burn_mints_protocol_fee_and_refreshes_baseline() {
        let (mut world, pair, a, b) = setup();
        let lp = Address::with_last_byte(1);
        let trader = Address::with_last_byte(2);
        let fee_to = Address::with_last_byte(0xfe);
        deposit(&mut world, &pair, 1_000_000, 1_000_000);
        pair.mint(&mut world, &Some(fee_to), lp, lp).unwrap();
        assert_eq!(pair.k_last(), U256::from(1_000_000_000_000u64));

        let out = get_amount_out(
            U256::from(1_000_000u64),
            U256::from(1_000_000u64),
            U256::from(1_000_000u64),
        )
        .unwrap();
        assert_eq!(out, U256::from(499_248u64));
        world.credit(a, pair.address(), U256::from(1_000_000u64));
        pair.swap(&mut world, trader, U256::ZERO, out, trader, None).unwrap();

        assert!(
            world
                .transfer(pair.address(), lp, pair.address(), U256::from(500_000u64))
                .succeeded()
        );
        let (out_a, out_b) = pair.burn(&mut world, &Some(fee_to), lp, lp).unwrap();

        // T * (rootK - rootKLast) / (5 * rootK + rootKLast) with
        // T = 1_000_000, rootK = 1_000_751, rootKLast = 1_000_000.
        assert_eq!(world.share_balance(pair.address(), fee_to), U256::from(125u64));
        assert_eq!(world.total_shares(pair.address()), U256::from(500_125u64));
        assert_eq!(out_a, U256::from(999_875u64));
        assert_eq!(out_b, U256::from(250_344u64));
        assert_eq!(world.balance_of(b, lp), U256::from(250_344u64));

        let r = pair.reserves();
        assert_eq!(r.reserve_a, U256::from(1_000_125u64));
        assert_eq!(r.reserve_b, U256::from(250_408u64));
        assert_eq!(pair.k_last(), r.reserve_a * r.reserve_b);
        assert_eq!(pair.k_last(), U256::from(250_439_301_000u64));
    }

    #[test]
    fn oversized_balances_report_reserve_overflow() {
        let (mut world, pair, a, b) = setup();
        let lp = Address::with_last_byte(1);
        world.credit(a, pair.address(), U256::from(1u8) << 200);
        world.credit(b, pair.address(), U256::from(1u8) << 100);
        assert_eq!(pair.mint(&mut world, &NoFee, lp, lp), Err(PairError::Overflow));
        assert!(world.total_shares(pair.address()).is_zero());

        let (mut world, pair, _, _) = setup();
        deposit(&mut world, &pair, 4_000, 9_000);
        pair.mint(&mut world, &NoFee, lp, lp).unwrap();
        assert!(
            world
                .transfer(pair.address(), lp, pair.address(), U256::from(1_000u64))
                .succeeded()
        );
        world.credit(a, pair.address(), U256::from(1u8) << 250);
        assert_eq!(pair.burn(&mut world, &NoFee, lp, lp), Err(PairError::Overflow));
        assert_eq!(pair.reserves().reserve_a, U256::from(4_000u64));
    }

    #[test]
    fn turning_fees_off_clears_baseline() {
        let (mut world, pair, _, _) = setup();
        let lp = Address::with_last_byte(1);
        let fee_to = Some(Address::with_last_byte(0xfe));
        deposit(&mut world, &pair, 10_000, 10_000);
        pair.mint(&mut world, &fee_to, lp, lp).unwrap();
        assert!(!pair.k_last().is_zero());

        deposit(&mut world, &pair, 1_000, 1_000);
        pair.mint(&mut world, &NoFee, lp, lp).unwrap();
        assert!(pair.k_last().is_zero());
    }
}
