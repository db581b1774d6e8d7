//! In-memory `DexBackend` for unit tests.

use crate::amm::models::TokenInfo;
use crate::amm::providers::{DexBackend, TxOutcome, V2SwapOrder, V3SwapOrder};
use crate::errors::{AmmError, AmmResult, Stage};
use alloy::primitives::{Address, TxHash, U256};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const TOKEN_A: Address = Address::repeat_byte(0xaa);
pub const TOKEN_B: Address = Address::repeat_byte(0xbb);
pub const WALLET: Address = Address::repeat_byte(0x11);
pub const APPROVE_TX: TxHash = TxHash::repeat_byte(0x01);
pub const SWAP_TX: TxHash = TxHash::repeat_byte(0x02);

#[derive(Default)]
pub struct CallCounts {
    pub token_info: AtomicUsize,
    pub v2_quotes: AtomicUsize,
    pub v3_pools: AtomicUsize,
    pub v3_quotes: AtomicUsize,
    pub allowance: AtomicUsize,
    pub approve: AtomicUsize,
    pub swap_v2: AtomicUsize,
    pub swap_v3: AtomicUsize,
    pub receipts: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> usize {
        Self::get(&self.approve) + Self::get(&self.swap_v2) + Self::get(&self.swap_v3)
    }
}

/// Scripted chain. Unset responses behave like an empty chain: V2 quotes
/// fail, no V3 pools exist, allowances are zero, receipts succeed.
pub struct MockBackend {
    pub wallet: Option<Address>,
    pub decimals: u8,
    pub token_info_fails: bool,
    pub v2_amounts: Option<Vec<U256>>,
    /// fee tier -> (pool address, quote; `None` makes the quoter fail)
    pub v3_pools: HashMap<u32, (Address, Option<U256>)>,
    /// Every `getPool` call fails, as if the node were unreachable.
    pub pool_lookup_fails: bool,
    pub allowance: U256,
    pub approval_succeeds: bool,
    pub swap_succeeds: bool,
    pub calls: CallCounts,
    pub last_v2_order: Mutex<Option<V2SwapOrder>>,
    pub last_v3_order: Mutex<Option<V3SwapOrder>>,
    pub approved_spender: Mutex<Option<(Address, U256)>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            wallet: Some(WALLET),
            decimals: 18,
            token_info_fails: false,
            v2_amounts: None,
            v3_pools: HashMap::new(),
            pool_lookup_fails: false,
            allowance: U256::ZERO,
            approval_succeeds: true,
            swap_succeeds: true,
            calls: CallCounts::default(),
            last_v2_order: Mutex::new(None),
            last_v3_order: Mutex::new(None),
            approved_spender: Mutex::new(None),
        }
    }
}

impl MockBackend {
    pub fn with_v2_output(mut self, amount_in: u64, amount_out: u64) -> Self {
        self.v2_amounts = Some(vec![U256::from(amount_in), U256::from(amount_out)]);
        self
    }

    pub fn with_v3_pool(mut self, fee: u32, amount_out: u64) -> Self {
        let pool = Address::with_last_byte((fee % 251) as u8 + 1);
        self.v3_pools.insert(fee, (pool, Some(U256::from(amount_out))));
        self
    }

    pub fn with_allowance(mut self, allowance: U256) -> Self {
        self.allowance = allowance;
        self
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl DexBackend for MockBackend {
    fn wallet_address(&self) -> Option<Address> {
        self.wallet
    }

    async fn token_info(&self, token: Address) -> AmmResult<TokenInfo> {
        Self::bump(&self.calls.token_info);
        if self.token_info_fails {
            return Err(AmmError::transport(Stage::TokenInfo, "execution reverted"));
        }
        let symbol = if token == TOKEN_A { "AAA" } else { "BBB" };
        Ok(TokenInfo::new(
            token,
            format!("{} Token", symbol),
            symbol.to_string(),
            self.decimals,
        ))
    }

    async fn v2_amounts_out(&self, _amount_in: U256, _path: &[Address]) -> AmmResult<Vec<U256>> {
        Self::bump(&self.calls.v2_quotes);
        self.v2_amounts
            .clone()
            .ok_or_else(|| AmmError::transport(Stage::Quote, "execution reverted"))
    }

    async fn v3_pool(&self, _token_a: Address, _token_b: Address, fee: u32) -> AmmResult<Address> {
        Self::bump(&self.calls.v3_pools);
        if self.pool_lookup_fails {
            return Err(AmmError::transport(Stage::Quote, "connection refused"));
        }
        Ok(self
            .v3_pools
            .get(&fee)
            .map(|(pool, _)| *pool)
            .unwrap_or(Address::ZERO))
    }

    async fn v3_quote(
        &self,
        _token_in: Address,
        _token_out: Address,
        fee: u32,
        _amount_in: U256,
    ) -> AmmResult<U256> {
        Self::bump(&self.calls.v3_quotes);
        self.v3_pools
            .get(&fee)
            .and_then(|(_, quote)| *quote)
            .ok_or_else(|| AmmError::transport(Stage::Quote, "quoter reverted"))
    }

    async fn allowance(
        &self,
        _token: Address,
        _owner: Address,
        _spender: Address,
    ) -> AmmResult<U256> {
        Self::bump(&self.calls.allowance);
        Ok(self.allowance)
    }

    async fn approve(&self, _token: Address, spender: Address, amount: U256) -> AmmResult<TxHash> {
        Self::bump(&self.calls.approve);
        *self.approved_spender.lock().unwrap() = Some((spender, amount));
        Ok(APPROVE_TX)
    }

    async fn swap_v2(&self, order: &V2SwapOrder) -> AmmResult<TxHash> {
        Self::bump(&self.calls.swap_v2);
        *self.last_v2_order.lock().unwrap() = Some(order.clone());
        Ok(SWAP_TX)
    }

    async fn swap_v3(&self, order: &V3SwapOrder) -> AmmResult<TxHash> {
        Self::bump(&self.calls.swap_v3);
        *self.last_v3_order.lock().unwrap() = Some(order.clone());
        Ok(SWAP_TX)
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash, _stage: Stage) -> AmmResult<TxOutcome> {
        Self::bump(&self.calls.receipts);
        let success = if tx_hash == APPROVE_TX {
            self.approval_succeeds
        } else {
            self.swap_succeeds
        };
        Ok(TxOutcome {
            tx_hash,
            block_number: Some(1234),
            gas_used: 21_000,
            success,
        })
    }
}
