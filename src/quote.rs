//! Constant product pricing helpers for callers preparing a swap or deposit.
//! They use the same 0.3% fee the pair enforces.

use crate::error::PairError;
use crate::math::{self, FEE_DENOMINATOR, FEE_NUMERATOR};
use alloy_primitives::U256;

/// Output for an exact input: `in * 997 * r_out / (r_in * 1000 + in * 997)`.
pub fn get_amount_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
) -> Result<U256, PairError> {
    if amount_in.is_zero() {
        return Err(PairError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(PairError::InsufficientLiquidity);
    }
    let in_with_fee = math::mul(amount_in, U256::from(FEE_DENOMINATOR - FEE_NUMERATOR))?;
    let numerator = math::mul(in_with_fee, reserve_out)?;
    let denominator = math::add(math::mul(reserve_in, U256::from(FEE_DENOMINATOR))?, in_with_fee)?;
    Ok(math::div(numerator, denominator)?)
}

/// Input needed for an exact output, rounded up by one.
pub fn get_amount_in(
    amount_out: U256,
    reserve_in: U256,
    reserve_out: U256,
) -> Result<U256, PairError> {
    if amount_out.is_zero() {
        return Err(PairError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || amount_out >= reserve_out {
        return Err(PairError::InsufficientLiquidity);
    }
    let numerator = math::mul(math::mul(reserve_in, amount_out)?, U256::from(FEE_DENOMINATOR))?;
    let denominator = math::mul(
        reserve_out - amount_out,
        U256::from(FEE_DENOMINATOR - FEE_NUMERATOR),
    )?;
    Ok(math::add(math::div(numerator, denominator)?, U256::from(1u8))?)
}

/// Amount of B matching `amount_a` at the current reserve ratio.
pub fn quote(amount_a: U256, reserve_a: U256, reserve_b: U256) -> Result<U256, PairError> {
    if amount_a.is_zero() {
        return Err(PairError::InsufficientInputAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(PairError::InsufficientLiquidity);
    }
    Ok(math::div(math::mul(amount_a, reserve_b)?, reserve_a)?)
}
