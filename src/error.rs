//! Error types for pair operations, the registry and configuration.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Checked arithmetic failures
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("arithmetic underflow")]
    Underflow,

    #[error("division by zero")]
    DivisionByZero,
}

/// Failures reported by the share ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{holder} holds {available} of {asset}, needs {needed}")]
    InsufficientBalance {
        asset: Address,
        holder: Address,
        needed: U256,
        available: U256,
    },

    #[error("supply of {asset} would overflow")]
    SupplyOverflow { asset: Address },
}

/// Every way a pair operation can abort
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PairError {
    /// The pair is already mid-operation
    #[error("pair is locked")]
    Reentrancy,

    /// An observed balance does not fit in 112 bits
    #[error("balance exceeds 112 bits")]
    Overflow,

    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    #[error("recipient cannot be a pooled asset")]
    InvalidRecipient,

    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Fee-adjusted product fell below the pre-trade product
    #[error("constant product invariant violated")]
    InvariantViolation,

    #[error("transfer of {asset} failed")]
    TransferFailed { asset: Address },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("pair assets must differ")]
    IdenticalAssets,

    #[error("asset address is zero")]
    ZeroAddress,

    #[error("pair {0} already exists")]
    PairExists(Address),

    #[error("{0} is not the fee setter")]
    Forbidden(Address),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum OracleError {
    /// Both observations were taken in the same second
    #[error("observations share a timestamp")]
    ElapsedZero,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to install tracing subscriber: {0}")]
    Telemetry(String),
}
