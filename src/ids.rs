use crate::error::RegistryError;
use alloy_primitives::{Address, keccak256};

const PAIR_DOMAIN: &[u8] = b"wayfinder-pair";

/// Ordered asset pair: `a < b` always.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AssetPair {
    pub a: Address,
    pub b: Address,
}

impl AssetPair {
    pub fn new(x: Address, y: Address) -> Result<Self, RegistryError> {
        if x == y {
            return Err(RegistryError::IdenticalAssets);
        }
        let (a, b) = if x < y { (x, y) } else { (y, x) };
        if a.is_zero() {
            return Err(RegistryError::ZeroAddress);
        }
        Ok(Self { a, b })
    }

    pub fn address(&self) -> Address {
        pair_address(self.a, self.b)
    }
}

/// Deterministic pair address for an already-ordered pair.
pub fn pair_address(a: Address, b: Address) -> Address {
    let mut preimage = Vec::with_capacity(PAIR_DOMAIN.len() + 40);
    preimage.extend_from_slice(PAIR_DOMAIN);
    preimage.extend_from_slice(a.as_slice());
    preimage.extend_from_slice(b.as_slice());
    let hash = keccak256(&preimage);
    Address::from_slice(&hash[12..])
}
