use alloy_primitives::U256;

pub const RESOLUTION: usize = 112;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UQ112x112(U256);

impl UQ112x112 {
    /// Encodes a 112-bit integer. Callers guarantee `y` fits in 112 bits.
    pub fn encode(y: U256) -> Self {
        Self(y << RESOLUTION)
    }

    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> U256 {
        self.0
    }

    /// Divides by a non-zero 112-bit integer.
    pub fn uqdiv(self, y: U256) -> Self {
        Self(self.0 / y)
    }

    /// Multiplies by an integer and drops the fractional bits.
    pub fn mul_truncate(self, y: U256) -> U256 {
        self.0.wrapping_mul(y) >> RESOLUTION
    }
}
