pub mod amm;
pub mod config;
pub mod errors;

pub use amm::networks::{resolve, NetworkConfig};
pub use amm::providers::{AmmClient, DexBackend};
pub use amm::swap::{QuoteRequest, Slippage, SwapEngine, SwapRequest};
pub use config::Config;
pub use errors::{AmmError, AmmResult, ErrorKind, Stage};
