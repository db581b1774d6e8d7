use crate::amm::networks::{resolve, NetworkConfig};
use crate::amm::swap::{Slippage, Timeouts};
use crate::errors::AmmResult;
use anyhow::{anyhow, Result};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub network: NetworkSection,
    pub timeouts: TimeoutConfig,
    pub swap: SwapConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NetworkSection {
    /// Registry alias or decimal chain ID.
    pub name: String,
    #[serde(default)]
    pub rpc_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutConfig {
    pub read_secs: u64,
    pub swap_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SwapConfig {
    pub slippage_percent: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkSection {
                name: "zoo".to_string(),
                rpc_url: None,
            },
            timeouts: TimeoutConfig {
                read_secs: 30,
                swap_secs: 120,
            },
            swap: SwapConfig {
                slippage_percent: 0.5,
            },
        }
    }
}

impl TimeoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.read_secs == 0 || self.swap_secs == 0 {
            return Err(anyhow!("timeouts must be at least one second"));
        }
        Ok(())
    }

    pub fn to_timeouts(&self) -> Timeouts {
        Timeouts {
            read: Duration::from_secs(self.read_secs),
            swap: Duration::from_secs(self.swap_secs),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        info!("Loading config from file");
        match Self::load_from_file("config/config.toml") {
            Ok(config) => {
                info!("Config loaded from file");
                config
            }
            Err(e) => {
                error!("Failed to load config from file: {}", e);
                info!("Falling back to environment variables or defaults");
                Self::from_env()
            }
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(name) = std::env::var("AMM_NETWORK") {
            config.network.name = name;
        }

        if let Ok(rpc_url) = std::env::var("AMM_RPC_URL") {
            config.network.rpc_url = Some(rpc_url);
        }

        if let Ok(secs) = std::env::var("AMM_READ_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.timeouts.read_secs = secs;
            }
        }

        if let Ok(secs) = std::env::var("AMM_SWAP_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.timeouts.swap_secs = secs;
            }
        }

        if let Ok(slippage) = std::env::var("AMM_SLIPPAGE") {
            if let Ok(slippage) = slippage.parse::<f64>() {
                config.swap.slippage_percent = slippage;
            }
        }

        config
    }

    /// Registry entry for `network.name`, pointed at `rpc_url` when set.
    pub fn resolve_network(&self) -> AmmResult<NetworkConfig> {
        let network = resolve(&self.network.name)?;
        match &self.network.rpc_url {
            Some(rpc) => network.with_rpc(rpc),
            None => Ok(network),
        }
    }

    pub fn slippage(&self) -> AmmResult<Slippage> {
        Slippage::from_percent(self.swap.slippage_percent)
    }
}
