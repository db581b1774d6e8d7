use crate::amm::models::TokenInfo;
use crate::errors::{AmmResult, Stage};
use alloy::primitives::{Address, TxHash, U256};

/// Exact-input multi-hop order for a V2 router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V2SwapOrder {
    pub amount_in: U256,
    pub amount_out_min: U256,
    pub path: Vec<Address>,
    pub recipient: Address,
    pub deadline: U256,
}

/// Exact-input single-hop order for a V3 router. The price limit is always disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V3SwapOrder {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out_min: U256,
}

/// What a mined transaction's receipt says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub success: bool,
}

/// The chain-facing calls the router and the swap workflow depend on.
#[async_trait::async_trait]
pub trait DexBackend: Send + Sync {
    fn wallet_address(&self) -> Option<Address>;

    async fn token_info(&self, token: Address) -> AmmResult<TokenInfo>;

    async fn v2_amounts_out(&self, amount_in: U256, path: &[Address]) -> AmmResult<Vec<U256>>;

    /// Zero address when no pool exists for the tier.
    async fn v3_pool(&self, token_a: Address, token_b: Address, fee: u32) -> AmmResult<Address>;

    async fn v3_quote(
        &self,
        token_in: Address,
        token_out: Address,
        fee: u32,
        amount_in: U256,
    ) -> AmmResult<U256>;

    async fn allowance(&self, token: Address, owner: Address, spender: Address)
        -> AmmResult<U256>;

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> AmmResult<TxHash>;

    async fn swap_v2(&self, order: &V2SwapOrder) -> AmmResult<TxHash>;

    async fn swap_v3(&self, order: &V3SwapOrder) -> AmmResult<TxHash>;

    /// Blocks until the transaction is mined; `stage` labels transport failures.
    async fn wait_for_receipt(&self, tx_hash: TxHash, stage: Stage) -> AmmResult<TxOutcome>;
}
