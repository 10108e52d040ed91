use alloy_primitives::{Address, U256};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairEvent {
    Mint {
        pair: Address,
        sender: Address,
        amount_a: U256,
        amount_b: U256,
    },
    Burn {
        pair: Address,
        sender: Address,
        amount_a: U256,
        amount_b: U256,
        to: Address,
    },
    Swap {
        pair: Address,
        sender: Address,
        amount_a_in: U256,
        amount_b_in: U256,
        amount_a_out: U256,
        amount_b_out: U256,
        to: Address,
    },
    Sync {
        pair: Address,
        reserve_a: U256,
        reserve_b: U256,
    },
}

impl PairEvent {
    pub fn pair(&self) -> Address {
        match self {
            Self::Mint { pair, .. }
            | Self::Burn { pair, .. }
            | Self::Swap { pair, .. }
            | Self::Sync { pair, .. } => *pair,
        }
    }
}
