use crate::error::MathError;
use alloy_primitives::U256;

/// Shares locked at genesis and never redeemable.
pub const MINIMUM_SHARES: u64 = 1_000;

/// Swap fee numerator over [`FEE_DENOMINATOR`] (0.3%).
pub const FEE_NUMERATOR: u64 = 3;
pub const FEE_DENOMINATOR: u64 = 1_000;

/// Weight of LP growth against protocol growth in the fee formula (protocol takes 1/6).
pub const PROTOCOL_FEE_WEIGHT: u64 = 5;

/// Largest reserve a pair will commit: 2^112 - 1.
pub const RESERVE_MAX: U256 = U256::from_limbs([u64::MAX, (1 << 48) - 1, 0, 0]);

pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
    a.checked_sub(b).ok_or(MathError::Underflow)
}

pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
    a.checked_div(b).ok_or(MathError::DivisionByZero)
}

/// Floor square root (Babylonian method).
pub fn sqrt(y: U256) -> U256 {
    if y > U256::from(3u8) {
        let mut z = y;
        let mut x = y / U256::from(2u8) + U256::from(1u8);
        while x < z {
            z = x;
            x = (y / x + x) / U256::from(2u8);
        }
        z
    } else if !y.is_zero() {
        U256::from(1u8)
    } else {
        U256::ZERO
    }
}
