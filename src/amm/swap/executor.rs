use crate::amm::models::{display_price, RoutePreference, SwapQuote, TokenInfo, Venue, V3_FEE_TIERS};
use crate::amm::networks::AmmContracts;
use crate::amm::providers::{within, DexBackend, TxOutcome, V2SwapOrder, V3SwapOrder};
use crate::amm::routing::find_route;
use crate::amm::swap::{ensure_allowance, Slippage};
use crate::errors::{AmmError, AmmResult, Stage};
use alloy::primitives::{Address, U256};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{info, warn};
use std::time::Duration;

pub const SWAP_DEADLINE_MINUTES: i64 = 20;
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SWAP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Bound for quotes and other read-only work.
    pub read: Duration,
    /// Bound for the whole swap workflow, up to two mined transactions.
    pub swap: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: DEFAULT_READ_TIMEOUT,
            swap: DEFAULT_SWAP_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub token_in: Address,
    pub token_out: Address,
    /// Human decimal amount of `token_in`, e.g. "1.5".
    pub amount: String,
    pub preference: RoutePreference,
}

#[derive(Debug, Clone)]
pub struct SwapRequest {
    pub token_in: Address,
    pub token_out: Address,
    pub amount: String,
    pub slippage: Slippage,
    pub preference: RoutePreference,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct QuoteReport {
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
    pub quote: SwapQuote,
    pub amount_in_human: String,
    pub amount_out_human: String,
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SwapReport {
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
    pub quote: SwapQuote,
    pub slippage: Slippage,
    pub amount_out_min: U256,
    pub amount_out_min_human: String,
    pub deadline: U256,
    pub dry_run: bool,
    /// Set only when an approval had to be sent.
    pub approval: Option<TxOutcome>,
    /// `None` for a dry run.
    pub swap: Option<TxOutcome>,
}

/// Unix timestamp `SWAP_DEADLINE_MINUTES` after `now`.
pub fn swap_deadline(now: DateTime<Utc>) -> U256 {
    let deadline = now + ChronoDuration::minutes(SWAP_DEADLINE_MINUTES);
    U256::from(deadline.timestamp().max(0) as u64)
}

/// Drives quote, allowance, approval and swap against a [`DexBackend`].
pub struct SwapEngine<'a, B: DexBackend + ?Sized> {
    backend: &'a B,
    v2_router: Address,
    v3_router: Address,
    fee_tiers: Vec<u32>,
    timeouts: Timeouts,
}

impl<'a, B: DexBackend + ?Sized> SwapEngine<'a, B> {
    pub fn new(backend: &'a B, contracts: &AmmContracts) -> Self {
        Self {
            backend,
            v2_router: contracts.v2_router,
            v3_router: contracts.v3_router,
            fee_tiers: V3_FEE_TIERS.to_vec(),
            timeouts: Timeouts::default(),
        }
    }

    pub fn with_fee_tiers(mut self, fee_tiers: &[u32]) -> Self {
        self.fee_tiers = fee_tiers.to_vec();
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    fn router_for(&self, venue: Venue) -> Address {
        match venue {
            Venue::V2 => self.v2_router,
            Venue::V3 => self.v3_router,
        }
    }

    /// Quote only. Unreadable token metadata falls back to 18 decimals.
    pub async fn quote(&self, request: &QuoteRequest) -> AmmResult<QuoteReport> {
        within(self.timeouts.read, "quote", self.quote_inner(request)).await
    }

    async fn quote_inner(&self, request: &QuoteRequest) -> AmmResult<QuoteReport> {
        let token_in = self.lenient_token_info(request.token_in).await;
        let token_out = self.lenient_token_info(request.token_out).await;
        let amount_in = parse_amount(&token_in, &request.amount)?;

        let quote = find_route(
            self.backend,
            request.token_in,
            request.token_out,
            amount_in,
            request.preference,
            &self.fee_tiers,
        )
        .await?;

        let amount_in_f64 = token_in.to_human_amount_f64(quote.amount_in)?;
        let amount_out_f64 = token_out.to_human_amount_f64(quote.amount_out)?;
        Ok(QuoteReport {
            amount_in_human: token_in.to_human_amount(quote.amount_in)?,
            amount_out_human: token_out.to_human_amount(quote.amount_out)?,
            price: display_price(amount_in_f64, amount_out_f64),
            token_in,
            token_out,
            quote,
        })
    }

    async fn lenient_token_info(&self, token: Address) -> TokenInfo {
        match self.backend.token_info(token).await {
            Ok(info) => info,
            Err(e) => {
                warn!("Using default metadata for {}: {}", token, e);
                TokenInfo::unknown(token)
            }
        }
    }

    /// Full swap workflow, or everything up to the allowance check when
    /// `dry_run` is set. Broadcast transactions are never retried or undone.
    pub async fn swap(&self, request: &SwapRequest) -> AmmResult<SwapReport> {
        within(self.timeouts.swap, "swap", self.swap_inner(request)).await
    }

    async fn swap_inner(&self, request: &SwapRequest) -> AmmResult<SwapReport> {
        let token_in = self.backend.token_info(request.token_in).await?;
        let token_out = self.backend.token_info(request.token_out).await?;
        let amount_in = parse_amount(&token_in, &request.amount)?;

        let quote = find_route(
            self.backend,
            request.token_in,
            request.token_out,
            amount_in,
            request.preference,
            &self.fee_tiers,
        )
        .await?;

        let amount_out_min = request.slippage.amount_out_min(quote.amount_out);
        let deadline = swap_deadline(Utc::now());
        info!(
            "Swapping {} {} for at least {} {} via {}",
            request.amount,
            token_in.symbol,
            amount_out_min,
            token_out.symbol,
            quote.venue_label()
        );

        let mut report = SwapReport {
            amount_out_min_human: token_out.to_human_amount(amount_out_min)?,
            token_in,
            token_out,
            quote,
            slippage: request.slippage,
            amount_out_min,
            deadline,
            dry_run: request.dry_run,
            approval: None,
            swap: None,
        };
        if request.dry_run {
            info!("Dry run, nothing submitted");
            return Ok(report);
        }

        let wallet = self
            .backend
            .wallet_address()
            .ok_or(AmmError::WalletNotLoaded)?;
        let router = self.router_for(report.quote.venue);
        report.approval =
            ensure_allowance(self.backend, request.token_in, wallet, router, amount_in).await?;

        let tx_hash = match report.quote.venue {
            Venue::V2 => {
                let order = V2SwapOrder {
                    amount_in,
                    amount_out_min,
                    path: vec![request.token_in, request.token_out],
                    recipient: wallet,
                    deadline,
                };
                self.backend.swap_v2(&order).await?
            }
            Venue::V3 => {
                let fee = report.quote.fee_tier.ok_or_else(|| {
                    AmmError::transport(Stage::Execute, "V3 route without a fee tier")
                })?;
                let order = V3SwapOrder {
                    token_in: request.token_in,
                    token_out: request.token_out,
                    fee,
                    recipient: wallet,
                    deadline,
                    amount_in,
                    amount_out_min,
                };
                self.backend.swap_v3(&order).await?
            }
        };
        info!("Swap transaction sent: {}", tx_hash);

        let outcome = self
            .backend
            .wait_for_receipt(tx_hash, Stage::ConfirmSwap)
            .await?;
        if !outcome.success {
            return Err(AmmError::SwapReverted { tx_hash });
        }
        info!(
            "Swap confirmed in block {:?}, gas used {}",
            outcome.block_number, outcome.gas_used
        );
        report.swap = Some(outcome);
        Ok(report)
    }
}

fn parse_amount(token: &TokenInfo, amount: &str) -> AmmResult<U256> {
    let raw = token.to_raw_amount(amount)?;
    if raw.is_zero() {
        return Err(AmmError::InvalidAmount(format!(
            "amount must be greater than zero: {}",
            amount
        )));
    }
    Ok(raw)
}
