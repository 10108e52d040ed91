pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod guard;
pub mod ids;
pub mod ledger;
mod liquidity;
pub mod math;
pub mod oracle;
pub mod pair;
pub mod quote;
pub mod registry;
mod swap;
pub mod telemetry;
pub mod uq112x112;
pub mod world;

pub use config::{Config, RegistryConfig, TelemetryConfig};
pub use error::{ConfigError, LedgerError, MathError, OracleError, PairError, RegistryError};
pub use events::PairEvent;
pub use graph::{NodeKind, PairGraph};
pub use ids::{AssetPair, pair_address};
pub use ledger::{
    AssetLedger, Clock, EventSink, FeeSource, Host, NoFee, ShareLedger, TransferReceipt,
};
pub use oracle::{Observation, TwapPrice, average_price};
pub use pair::{FlashCall, Pair, Reserves, SwapCallee};
pub use registry::Registry;
pub use uq112x112::UQ112x112;
pub use world::{TransferStyle, World};
