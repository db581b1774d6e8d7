use crate::amm::models::TokenInfo;
use crate::amm::networks::NetworkConfig;
use crate::amm::providers::handles::{
    Erc20Handle, PairInfo, QuoterHandle, V2FactoryHandle, V2RouterHandle, V3FactoryHandle,
    V3PoolInfo, V3RouterHandle,
};
use crate::amm::providers::utils::{poll_receipt, verify_chain_id};
use crate::amm::providers::{DexBackend, TxOutcome, V2SwapOrder, V3SwapOrder};
use crate::amm::wallet::Wallet;
use crate::errors::{AmmError, AmmResult, Stage};
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use log::{debug, info, warn};
use url::Url;

/// Chain and contract overview returned by [`AmmClient::status`].
#[derive(Debug, Clone)]
pub struct AmmStatus {
    pub network: NetworkConfig,
    pub block_number: u64,
    /// `None` when the factory could not be read.
    pub v2_pool_count: Option<u64>,
}

/// RPC connection validated against the network's chain ID, with typed
/// handles for every contract the swap flow touches.
pub struct AmmClient {
    network: NetworkConfig,
    provider: DynProvider,
    wallet: Option<Wallet>,
    v2_router: V2RouterHandle,
    v2_factory: V2FactoryHandle,
    v3_router: V3RouterHandle,
    v3_factory: V3FactoryHandle,
    quoter: QuoterHandle,
}

impl AmmClient {
    /// Connects to `network.rpc` and aborts if the live chain ID differs from
    /// the configured one. Without a wallet the client is read-only.
    pub async fn connect(network: NetworkConfig, wallet: Option<Wallet>) -> AmmResult<Self> {
        let url = Url::parse(&network.rpc).map_err(|e| {
            AmmError::InvalidConfig(format!("invalid RPC URL '{}': {}", network.rpc, e))
        })?;

        let provider = match &wallet {
            Some(wallet) => ProviderBuilder::new()
                .wallet(EthereumWallet::from(wallet.signer().clone()))
                .connect_http(url)
                .erased(),
            None => ProviderBuilder::new().connect_http(url).erased(),
        };

        Self::connect_with_provider(network, wallet, provider).await
    }

    /// Validates `provider` against `network` and binds the contract handles.
    /// `provider` must already carry the wallet's signer when one is given.
    pub async fn connect_with_provider(
        network: NetworkConfig,
        wallet: Option<Wallet>,
        provider: DynProvider,
    ) -> AmmResult<Self> {
        let live_chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| AmmError::transport(Stage::Connect, format!("{}: {}", network.rpc, e)))?;
        verify_chain_id(network.chain_id, live_chain_id)?;
        info!("Connected to {} via {}", network, network.rpc);

        let contracts = network.contracts;
        Ok(Self {
            v2_router: V2RouterHandle::new(contracts.v2_router, provider.clone()),
            v2_factory: V2FactoryHandle::new(contracts.v2_factory, provider.clone()),
            v3_router: V3RouterHandle::new(contracts.v3_router, provider.clone()),
            v3_factory: V3FactoryHandle::new(contracts.v3_factory, provider.clone()),
            quoter: QuoterHandle::new(contracts.quoter, provider.clone()),
            network,
            provider,
            wallet,
        })
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    pub fn wallet(&self) -> Option<&Wallet> {
        self.wallet.as_ref()
    }

    fn token(&self, address: Address) -> Erc20Handle {
        Erc20Handle::new(address, self.provider.clone())
    }

    fn require_wallet(&self) -> AmmResult<&Wallet> {
        self.wallet.as_ref().ok_or(AmmError::WalletNotLoaded)
    }

    pub async fn native_balance(&self) -> AmmResult<U256> {
        let wallet = self.require_wallet()?;
        self.provider
            .get_balance(wallet.address())
            .await
            .map_err(|e| AmmError::transport(Stage::Balance, e))
    }

    pub async fn block_number(&self) -> AmmResult<u64> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| AmmError::transport(Stage::Status, e))
    }

    pub async fn v2_pair(&self, token_a: Address, token_b: Address) -> AmmResult<Address> {
        self.v2_factory.get_pair(token_a, token_b).await
    }

    pub async fn v2_pair_info(&self, token_a: Address, token_b: Address) -> AmmResult<Option<PairInfo>> {
        self.v2_factory.pair_info(token_a, token_b).await
    }

    pub async fn v2_pool_count(&self) -> AmmResult<u64> {
        self.v2_factory.all_pairs_length().await
    }

    pub async fn v3_pool_info(
        &self,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> AmmResult<Option<V3PoolInfo>> {
        self.v3_factory.pool_info(token_a, token_b, fee).await
    }

    pub async fn status(&self) -> AmmResult<AmmStatus> {
        let block_number = self.block_number().await?;
        let v2_pool_count = match self.v2_pool_count().await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!("Could not read V2 pool count: {}", e);
                None
            }
        };
        Ok(AmmStatus {
            network: self.network.clone(),
            block_number,
            v2_pool_count,
        })
    }

    /// Releases the RPC connection.
    pub fn close(self) {
        info!("Closing connection to {}", self.network.rpc);
    }
}

#[async_trait::async_trait]
impl DexBackend for AmmClient {
    fn wallet_address(&self) -> Option<Address> {
        self.wallet.as_ref().map(Wallet::address)
    }

    async fn token_info(&self, token: Address) -> AmmResult<TokenInfo> {
        let handle = self.token(token);
        let decimals = handle.decimals().await?;
        let name = handle.name().await.unwrap_or_else(|e| {
            warn!("Token {} has no readable name: {}", token, e);
            String::new()
        });
        let symbol = handle.symbol().await.unwrap_or_else(|e| {
            warn!("Token {} has no readable symbol: {}", token, e);
            String::new()
        });

        let mut info = TokenInfo::new(token, name, symbol, decimals);
        if let Some(owner) = self.wallet_address() {
            match handle.balance_of(owner).await {
                Ok(balance) => info.balance = Some(balance),
                Err(e) => warn!("Could not read {} balance of {}: {}", info.symbol, owner, e),
            }
        }
        debug!("Token {}", info);
        Ok(info)
    }

    async fn v2_amounts_out(&self, amount_in: U256, path: &[Address]) -> AmmResult<Vec<U256>> {
        self.v2_router.get_amounts_out(amount_in, path).await
    }

    async fn v3_pool(&self, token_a: Address, token_b: Address, fee: u32) -> AmmResult<Address> {
        self.v3_factory.get_pool(token_a, token_b, fee).await
    }

    async fn v3_quote(
        &self,
        token_in: Address,
        token_out: Address,
        fee: u32,
        amount_in: U256,
    ) -> AmmResult<U256> {
        self.quoter
            .quote_exact_input_single(token_in, token_out, fee, amount_in)
            .await
    }

    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> AmmResult<U256> {
        self.token(token).allowance(owner, spender).await
    }

    async fn approve(&self, token: Address, spender: Address, amount: U256) -> AmmResult<TxHash> {
        self.require_wallet()?;
        self.token(token).approve(spender, amount).await
    }

    async fn swap_v2(&self, order: &V2SwapOrder) -> AmmResult<TxHash> {
        self.require_wallet()?;
        self.v2_router.swap_exact_tokens_for_tokens(order).await
    }

    async fn swap_v3(&self, order: &V3SwapOrder) -> AmmResult<TxHash> {
        self.require_wallet()?;
        self.v3_router.exact_input_single(order).await
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash, stage: Stage) -> AmmResult<TxOutcome> {
        let receipt = poll_receipt(&self.provider, tx_hash, stage).await?;
        Ok(TxOutcome {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        })
    }
}
