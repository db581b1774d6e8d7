use crate::amm::contracts::{
    IQuoter, IUniswapV2Factory, IUniswapV2Pair, IUniswapV2Router02, IUniswapV3Factory,
    IUniswapV3Pool, ISwapRouter, IERC20,
};
use crate::amm::providers::{V2SwapOrder, V3SwapOrder};
use crate::errors::{AmmError, AmmResult, Stage};
use alloy::primitives::aliases::U24;
use alloy::primitives::{Address, TxHash, U160, U256};
use alloy::providers::DynProvider;

pub const V2_SWAP_GAS_LIMIT: u64 = 300_000;
pub const V3_SWAP_GAS_LIMIT: u64 = 500_000;

/// ERC-20 calls used by the client.
pub struct Erc20Handle {
    contract: IERC20::IERC20Instance<DynProvider>,
}

impl Erc20Handle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IERC20::new(address, provider),
        }
    }

    pub async fn name(&self) -> AmmResult<String> {
        self.contract
            .name()
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::TokenInfo, e))
    }

    pub async fn symbol(&self) -> AmmResult<String> {
        self.contract
            .symbol()
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::TokenInfo, e))
    }

    pub async fn decimals(&self) -> AmmResult<u8> {
        self.contract
            .decimals()
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::TokenInfo, e))
    }

    pub async fn balance_of(&self, owner: Address) -> AmmResult<U256> {
        self.contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::Balance, e))
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> AmmResult<U256> {
        self.contract
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::CheckAllowance, e))
    }

    pub async fn approve(&self, spender: Address, amount: U256) -> AmmResult<TxHash> {
        let pending = self
            .contract
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| AmmError::transport(Stage::Approve, e))?;
        Ok(*pending.tx_hash())
    }
}

pub struct V2RouterHandle {
    contract: IUniswapV2Router02::IUniswapV2Router02Instance<DynProvider>,
}

impl V2RouterHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IUniswapV2Router02::new(address, provider),
        }
    }

    pub async fn get_amounts_out(&self, amount_in: U256, path: &[Address]) -> AmmResult<Vec<U256>> {
        self.contract
            .getAmountsOut(amount_in, path.to_vec())
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::Quote, e))
    }

    pub async fn swap_exact_tokens_for_tokens(&self, order: &V2SwapOrder) -> AmmResult<TxHash> {
        let pending = self
            .contract
            .swapExactTokensForTokens(
                order.amount_in,
                order.amount_out_min,
                order.path.clone(),
                order.recipient,
                order.deadline,
            )
            .gas(V2_SWAP_GAS_LIMIT)
            .send()
            .await
            .map_err(|e| AmmError::transport(Stage::Execute, e))?;
        Ok(*pending.tx_hash())
    }
}

/// V2 pair snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub reserve0: U256,
    pub reserve1: U256,
}

pub struct V2FactoryHandle {
    contract: IUniswapV2Factory::IUniswapV2FactoryInstance<DynProvider>,
}

impl V2FactoryHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IUniswapV2Factory::new(address, provider),
        }
    }

    pub async fn get_pair(&self, token_a: Address, token_b: Address) -> AmmResult<Address> {
        self.contract
            .getPair(token_a, token_b)
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::Status, e))
    }

    pub async fn all_pairs_length(&self) -> AmmResult<u64> {
        let length = self
            .contract
            .allPairsLength()
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::Status, e))?;
        Ok(length.saturating_to::<u64>())
    }

    /// Reads reserves of the pair for `token_a`/`token_b`, `None` if there is no pair.
    pub async fn pair_info(&self, token_a: Address, token_b: Address) -> AmmResult<Option<PairInfo>> {
        let pair_address = self.get_pair(token_a, token_b).await?;
        if pair_address.is_zero() {
            return Ok(None);
        }
        let pair = IUniswapV2Pair::new(pair_address, self.contract.provider().clone());
        let to_err = |e: alloy::contract::Error| AmmError::transport(Stage::Status, e);
        let token0 = pair.token0().call().await.map_err(to_err)?;
        let token1 = pair.token1().call().await.map_err(to_err)?;
        let reserves = pair.getReserves().call().await.map_err(to_err)?;
        Ok(Some(PairInfo {
            address: pair_address,
            token0,
            token1,
            reserve0: reserves.reserve0.to::<U256>(),
            reserve1: reserves.reserve1.to::<U256>(),
        }))
    }
}

pub struct V3RouterHandle {
    contract: ISwapRouter::ISwapRouterInstance<DynProvider>,
}

impl V3RouterHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: ISwapRouter::new(address, provider),
        }
    }

    pub async fn exact_input_single(&self, order: &V3SwapOrder) -> AmmResult<TxHash> {
        let params = ISwapRouter::ExactInputSingleParams {
            tokenIn: order.token_in,
            tokenOut: order.token_out,
            fee: U24::from(order.fee),
            recipient: order.recipient,
            deadline: order.deadline,
            amountIn: order.amount_in,
            amountOutMinimum: order.amount_out_min,
            sqrtPriceLimitX96: U160::ZERO,
        };
        let pending = self
            .contract
            .exactInputSingle(params)
            .gas(V3_SWAP_GAS_LIMIT)
            .send()
            .await
            .map_err(|e| AmmError::transport(Stage::Execute, e))?;
        Ok(*pending.tx_hash())
    }
}

/// V3 pool snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V3PoolInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub liquidity: u128,
}

pub struct V3FactoryHandle {
    contract: IUniswapV3Factory::IUniswapV3FactoryInstance<DynProvider>,
}

impl V3FactoryHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IUniswapV3Factory::new(address, provider),
        }
    }

    pub async fn get_pool(&self, token_a: Address, token_b: Address, fee: u32) -> AmmResult<Address> {
        self.contract
            .getPool(token_a, token_b, U24::from(fee))
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::Quote, e))
    }

    pub async fn pool_info(
        &self,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> AmmResult<Option<V3PoolInfo>> {
        let pool_address = self.get_pool(token_a, token_b, fee).await?;
        if pool_address.is_zero() {
            return Ok(None);
        }
        let pool = IUniswapV3Pool::new(pool_address, self.contract.provider().clone());
        let to_err = |e: alloy::contract::Error| AmmError::transport(Stage::Status, e);
        let token0 = pool.token0().call().await.map_err(to_err)?;
        let token1 = pool.token1().call().await.map_err(to_err)?;
        let liquidity = pool.liquidity().call().await.map_err(to_err)?;
        Ok(Some(V3PoolInfo {
            address: pool_address,
            token0,
            token1,
            fee,
            liquidity,
        }))
    }
}

pub struct QuoterHandle {
    contract: IQuoter::IQuoterInstance<DynProvider>,
}

impl QuoterHandle {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            contract: IQuoter::new(address, provider),
        }
    }

    pub async fn quote_exact_input_single(
        &self,
        token_in: Address,
        token_out: Address,
        fee: u32,
        amount_in: U256,
    ) -> AmmResult<U256> {
        self.contract
            .quoteExactInputSingle(token_in, token_out, U24::from(fee), amount_in, U160::ZERO)
            .call()
            .await
            .map_err(|e| AmmError::transport(Stage::Quote, e))
    }
}
