//! Reading the price accumulators: counterfactual observations and averages
//! between two snapshots.

use crate::error::OracleError;
use crate::pair::Pair;
use crate::uq112x112::UQ112x112;
use alloy_primitives::U256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: u32,
    pub price_a_cumulative: U256,
    pub price_b_cumulative: U256,
}

/// Time-weighted average prices between two observations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwapPrice {
    /// Price of A in B.
    pub price_a: UQ112x112,
    /// Price of B in A.
    pub price_b: UQ112x112,
    pub elapsed: u32,
}

impl TwapPrice {
    /// How much B `amount_a` of A was worth on average.
    pub fn consult_a(&self, amount_a: U256) -> U256 {
        self.price_a.mul_truncate(amount_a)
    }

    pub fn consult_b(&self, amount_b: U256) -> U256 {
        self.price_b.mul_truncate(amount_b)
    }
}

impl Pair {
    /// Accumulators as they would read if the pair committed at `now` with no
    /// balance change. Does not touch pair state.
    pub fn observe(&self, now: u64) -> Observation {
        let timestamp = now as u32;
        let (price_a_cumulative, price_b_cumulative) =
            Self::accumulate(&self.snapshot(), timestamp);
        Observation {
            timestamp,
            price_a_cumulative,
            price_b_cumulative,
        }
    }
}

/// Average prices from `earlier` to `later`; both accumulators and the
/// timestamps are differenced with wrapping arithmetic.
pub fn average_price(earlier: &Observation, later: &Observation) -> Result<TwapPrice, OracleError> {
    let elapsed = later.timestamp.wrapping_sub(earlier.timestamp);
    if elapsed == 0 {
        return Err(OracleError::ElapsedZero);
    }
    let span = U256::from(elapsed);
    let delta_a = later
        .price_a_cumulative
        .wrapping_sub(earlier.price_a_cumulative);
    let delta_b = later
        .price_b_cumulative
        .wrapping_sub(earlier.price_b_cumulative);
    Ok(TwapPrice {
        price_a: UQ112x112::from_raw(delta_a / span),
        price_b: UQ112x112::from_raw(delta_b / span),
        elapsed,
    })
}
