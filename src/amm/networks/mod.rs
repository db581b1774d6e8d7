mod registry;

pub use registry::{AmmContracts, NetworkEntry, NETWORKS};

use crate::errors::{AmmError, AmmResult};
use alloy::primitives::Address;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Immutable chain descriptor resolved from the built-in registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc: String,
    pub native_symbol: &'static str,
    pub contracts: AmmContracts,
    pub tokens: &'static [(&'static str, Address)],
}

impl NetworkConfig {
    fn from_entry(entry: &NetworkEntry) -> Self {
        Self {
            name: entry.name,
            chain_id: entry.chain_id,
            rpc: entry.rpc.to_string(),
            native_symbol: entry.native_symbol,
            contracts: entry.contracts,
            tokens: entry.tokens,
        }
    }

    /// Returns a copy pointed at a different RPC endpoint. The registry row
    /// itself is untouched.
    pub fn with_rpc(&self, rpc: &str) -> AmmResult<Self> {
        Url::parse(rpc)
            .map_err(|e| AmmError::InvalidConfig(format!("invalid RPC URL '{}': {}", rpc, e)))?;
        Ok(Self {
            rpc: rpc.to_string(),
            ..self.clone()
        })
    }

    pub fn token_by_symbol(&self, symbol: &str) -> Option<Address> {
        self.tokens
            .iter()
            .find(|(sym, _)| sym.eq_ignore_ascii_case(symbol))
            .map(|(_, addr)| *addr)
    }

    /// Resolve a known token symbol or a hex address.
    pub fn resolve_token(&self, symbol_or_address: &str) -> AmmResult<Address> {
        let input = symbol_or_address.trim();
        if let Some(addr) = self.token_by_symbol(input) {
            return Ok(addr);
        }
        Address::from_str(input).map_err(|e| {
            AmmError::InvalidConfig(format!(
                "unknown token '{}' on {}: {}",
                input, self.name, e
            ))
        })
    }
}

impl fmt::Display for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Chain ID: {})", self.name, self.chain_id)
    }
}

/// Look up a network by alias or decimal chain ID.
pub fn resolve(identifier: &str) -> AmmResult<NetworkConfig> {
    let key = identifier.trim().to_ascii_lowercase();
    let by_alias = NETWORKS
        .iter()
        .find(|entry| entry.aliases.iter().any(|alias| *alias == key));
    if let Some(entry) = by_alias {
        return Ok(NetworkConfig::from_entry(entry));
    }
    key.parse::<u64>()
        .ok()
        .and_then(network_by_chain_id)
        .ok_or_else(|| AmmError::UnknownNetwork(identifier.to_string()))
}

pub fn network_by_chain_id(chain_id: u64) -> Option<NetworkConfig> {
    NETWORKS
        .iter()
        .find(|entry| entry.chain_id == chain_id)
        .map(NetworkConfig::from_entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use alloy::primitives::address;

    #[test]
    fn test_resolve_aliases() {
        let lux = resolve("lux").unwrap();
        assert_eq!(lux.chain_id, 96369);
        assert_eq!(resolve("lux-mainnet").unwrap(), lux);
        assert_eq!(resolve("zoo").unwrap().chain_id, 200200);
        assert_eq!(resolve("ZOO-mainnet").unwrap().chain_id, 200200);
        assert_eq!(resolve("testnet").unwrap().chain_id, 96368);
    }

    #[test]
    fn test_resolve_by_chain_id() {
        assert_eq!(resolve("200200").unwrap().name, "Zoo Mainnet");
        assert_eq!(network_by_chain_id(96368).unwrap().name, "Lux Testnet");
        assert!(network_by_chain_id(1).is_none());
    }

    #[test]
    fn test_unknown_network_is_configuration_error() {
        let err = resolve("mars").unwrap_err();
        assert!(matches!(err, AmmError::UnknownNetwork(ref n) if n == "mars"));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_rpc_override_leaves_registry_untouched() {
        let zoo = resolve("zoo").unwrap();
        let custom = zoo.with_rpc("https://rpc.example.org").unwrap();
        assert_eq!(custom.rpc, "https://rpc.example.org");
        assert_eq!(custom.chain_id, zoo.chain_id);
        assert_eq!(resolve("zoo").unwrap().rpc, "http://localhost:8545");
        assert!(zoo.with_rpc("not a url").is_err());
    }

    #[test]
    fn test_resolve_token() {
        let zoo = resolve("zoo").unwrap();
        assert_eq!(
            zoo.resolve_token("zusd").unwrap(),
            address!("848Cff46eb323f323b6Bbe1Df274E40793d7f2c2")
        );
        assert_eq!(
            zoo.resolve_token("0x60E0a8167FC13dE89348978860466C9ceC24B9ba")
                .unwrap(),
            address!("60E0a8167FC13dE89348978860466C9ceC24B9ba")
        );
        assert!(zoo.resolve_token("LETH").is_err());
    }
}
