use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, LevelFilter};

use lux_amm::amm::models::{to_human_amount, RoutePreference, V3_FEE_TIERS};
use lux_amm::amm::networks::NetworkConfig;
use lux_amm::amm::providers::{within, AmmClient, DexBackend};
use lux_amm::amm::swap::{QuoteRequest, Slippage, SwapEngine, SwapRequest, Timeouts};
use lux_amm::amm::wallet::{derive_wallet, Credentials, ETHEREUM_DERIVATION_PATH};
use lux_amm::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about = "Swap and quote tokens on Lux and Zoo AMMs", long_about = None)]
struct Args {
    /// Network alias or chain ID (lux, zoo, lux-testnet, ...)
    #[arg(long, global = true)]
    network: Option<String>,

    /// Override the network's RPC endpoint
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// Hex private key; takes precedence over LUX_PRIVATE_KEY and LUX_MNEMONIC
    #[arg(long, global = true)]
    private_key: Option<String>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Native and known-token balances of the wallet
    Balance,
    /// Best route and expected output for a swap
    Quote {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        /// Skip V2 and search V3 fee tiers only
        #[arg(long)]
        v3: bool,
    },
    /// Swap an exact input amount
    Swap {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
        /// Tolerated slippage in percent; defaults to the configured value
        #[arg(long)]
        slippage: Option<f64>,
        #[arg(long)]
        v3: bool,
        /// Quote and compute bounds without sending transactions
        #[arg(long)]
        dry_run: bool,
    },
    /// Known tokens on the network
    Tokens,
    /// V2 pool count, or the pools for one pair
    Pools {
        token_a: Option<String>,
        token_b: Option<String>,
    },
    /// Chain and contract overview
    Status,
}

fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.to_string())).init();
}

fn preference(force_v3: bool) -> RoutePreference {
    if force_v3 {
        RoutePreference::ForceV3
    } else {
        RoutePreference::Auto
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = Config::load();
    if let Some(network) = &args.network {
        config.network.name = network.clone();
    }
    if let Some(rpc) = &args.rpc {
        config.network.rpc_url = Some(rpc.clone());
    }
    config.timeouts.validate()?;
    let timeouts = config.timeouts.to_timeouts();
    let network = config.resolve_network()?;
    info!("Using {}", network);

    if let Command::Tokens = args.command {
        print_tokens(&network);
        return Ok(());
    }

    let needs_wallet = matches!(args.command, Command::Balance | Command::Swap { .. });
    let wallet = if needs_wallet {
        let credentials = Credentials::from_env(args.private_key.clone());
        Some(derive_wallet(
            &credentials,
            ETHEREUM_DERIVATION_PATH,
            network.chain_id,
        )?)
    } else {
        None
    };

    let client = within(
        timeouts.read,
        "connect",
        AmmClient::connect(network.clone(), wallet),
    )
    .await?;

    let result = run(&client, &config, timeouts, args.command).await;
    client.close();
    result
}

async fn run(client: &AmmClient, config: &Config, timeouts: Timeouts, command: Command) -> Result<()> {
    let network = client.network();
    match command {
        Command::Balance => {
            let address = client.wallet_address().context("wallet not loaded")?;
            let native = within(timeouts.read, "balance", client.native_balance()).await?;
            println!("Address: {}", address);
            println!("Network: {}", network);
            println!("{}: {}", network.native_symbol, to_human_amount(native, 18)?);
            for (symbol, token) in network.tokens {
                match within(timeouts.read, "token info", client.token_info(*token)).await {
                    Ok(info) => {
                        let balance = info.balance.unwrap_or_default();
                        println!("{}: {}", symbol, info.to_human_amount(balance)?);
                    }
                    Err(e) => println!("{}: unavailable ({})", symbol, e),
                }
            }
        }
        Command::Quote {
            from,
            to,
            amount,
            v3,
        } => {
            let request = QuoteRequest {
                token_in: network.resolve_token(&from)?,
                token_out: network.resolve_token(&to)?,
                amount,
                preference: preference(v3),
            };
            let report = SwapEngine::new(client, &network.contracts)
                .with_timeouts(timeouts)
                .quote(&request)
                .await?;
            println!("Route: {}", report.quote.venue_label());
            println!(
                "Input: {} {}",
                report.amount_in_human, report.token_in.symbol
            );
            println!(
                "Expected output: {} {}",
                report.amount_out_human, report.token_out.symbol
            );
            if let Some(price) = report.price {
                println!(
                    "Price: 1 {} = {:.6} {}",
                    report.token_in.symbol, price, report.token_out.symbol
                );
            }
        }
        Command::Swap {
            from,
            to,
            amount,
            slippage,
            v3,
            dry_run,
        } => {
            let slippage = match slippage {
                Some(percent) => Slippage::from_percent(percent)?,
                None => config.slippage()?,
            };
            let request = SwapRequest {
                token_in: network.resolve_token(&from)?,
                token_out: network.resolve_token(&to)?,
                amount,
                slippage,
                preference: preference(v3),
                dry_run,
            };
            let report = SwapEngine::new(client, &network.contracts)
                .with_timeouts(timeouts)
                .swap(&request)
                .await?;
            println!("Route: {}", report.quote.venue_label());
            println!(
                "Expected output: {} {}",
                report.token_out.to_human_amount(report.quote.amount_out)?,
                report.token_out.symbol
            );
            println!(
                "Minimum output ({} slippage): {} {}",
                report.slippage, report.amount_out_min_human, report.token_out.symbol
            );
            if let Some(approval) = &report.approval {
                println!("Approval: {}", approval.tx_hash);
            }
            match &report.swap {
                Some(outcome) => {
                    println!("Swap: {}", outcome.tx_hash);
                    if let Some(block) = outcome.block_number {
                        println!("Confirmed in block {}", block);
                    }
                    println!("Gas used: {}", outcome.gas_used);
                }
                None => println!("Dry run: no transactions sent"),
            }
        }
        Command::Pools { token_a, token_b } => {
            let count = within(timeouts.read, "pool count", client.v2_pool_count()).await?;
            println!("V2 pools: {}", count);
            if let (Some(a), Some(b)) = (token_a, token_b) {
                let (a, b) = (network.resolve_token(&a)?, network.resolve_token(&b)?);
                match within(timeouts.read, "pair lookup", client.v2_pair_info(a, b)).await? {
                    Some(pair) => println!(
                        "V2 pair {}: reserves {} / {}",
                        pair.address, pair.reserve0, pair.reserve1
                    ),
                    None => println!("V2 pair: none"),
                }
                for fee in V3_FEE_TIERS {
                    match within(timeouts.read, "pool lookup", client.v3_pool_info(a, b, fee))
                        .await?
                    {
                        Some(pool) => println!(
                            "V3 pool {} (fee {}): liquidity {}",
                            pool.address, fee, pool.liquidity
                        ),
                        None => println!("V3 pool (fee {}): none", fee),
                    }
                }
            }
        }
        Command::Status => {
            let status = within(timeouts.read, "status", client.status()).await?;
            let contracts = status.network.contracts;
            println!("Network: {}", status.network);
            println!("RPC: {}", status.network.rpc);
            println!("Block: {}", status.block_number);
            match status.v2_pool_count {
                Some(count) => println!("V2 pools: {}", count),
                None => println!("V2 pools: unavailable"),
            }
            println!("V2 factory: {}", contracts.v2_factory);
            println!("V2 router: {}", contracts.v2_router);
            println!("V3 factory: {}", contracts.v3_factory);
            println!("V3 router: {}", contracts.v3_router);
            println!("Quoter: {}", contracts.quoter);
            println!("Multicall: {}", contracts.multicall);
            println!("Position manager: {}", contracts.nft_position);
            println!("Tick lens: {}", contracts.tick_lens);
            println!("Wrapped {}: {}", status.network.native_symbol, contracts.wrapped_native);
        }
        Command::Tokens => print_tokens(network),
    }
    Ok(())
}

fn print_tokens(network: &NetworkConfig) {
    println!("Tokens on {}:", network);
    for (symbol, address) in network.tokens {
        println!("  {:<6} {}", symbol, address);
    }
}
