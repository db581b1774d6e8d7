mod backend;
pub mod client;
pub mod handles;
pub mod utils;

pub use backend::{DexBackend, TxOutcome, V2SwapOrder, V3SwapOrder};
pub use client::{AmmClient, AmmStatus};
pub use utils::within;
