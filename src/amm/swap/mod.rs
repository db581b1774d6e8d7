mod allowance;
mod executor;
mod slippage;

pub use allowance::ensure_allowance;
pub use executor::{
    swap_deadline, QuoteReport, QuoteRequest, SwapEngine, SwapReport, SwapRequest, Timeouts,
    SWAP_DEADLINE_MINUTES,
};
pub use slippage::Slippage;
