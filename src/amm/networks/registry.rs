use alloy::primitives::{address, Address};

/// Fixed AMM contract deployment for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmmContracts {
    pub v2_factory: Address,
    pub v2_router: Address,
    pub v3_factory: Address,
    pub v3_router: Address,
    pub multicall: Address,
    pub quoter: Address,
    pub wrapped_native: Address,
    pub nft_position: Address,
    pub tick_lens: Address,
}

/// A static registry row. Rows are never mutated at runtime.
#[derive(Debug)]
pub struct NetworkEntry {
    pub aliases: &'static [&'static str],
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc: &'static str,
    pub native_symbol: &'static str,
    pub contracts: AmmContracts,
    pub tokens: &'static [(&'static str, Address)],
}

// Lux and Zoo share one deterministic deployment.
const SHARED_DEPLOYMENT: AmmContracts = AmmContracts {
    v2_factory: address!("D173926A10A0C4eCd3A51B1422270b65Df0551c1"),
    v2_router: address!("Ae2cf1E403aAFE6C05A5b8Ef63EB19ba591d8511"),
    v3_factory: address!("80bBc7C4C7a59C899D1B37BC14539A22D5830a84"),
    v3_router: address!("939bC0Bca6F9B9c52E6e3AD8A3C590b5d9B9D10E"),
    multicall: address!("d25F88CBdAe3c2CCA3Bb75FC4E723b44C0Ea362F"),
    quoter: address!("12e2B76FaF4dDA5a173a4532916bb6Bfa3645275"),
    wrapped_native: address!("4888E4a2Ee0F03051c72D2BD3ACf755eD3498B3E"),
    nft_position: address!("7a4C48B9dae0b7c396569b34042fcA604150Ee28"),
    tick_lens: address!("57A22965AdA0e52D785A9Aa155beF423D573b879"),
};

const LUX_TOKENS: &[(&str, Address)] = &[
    ("WLUX", address!("4888E4a2Ee0F03051c72D2BD3ACf755eD3498B3E")),
    ("LETH", address!("60E0a8167FC13dE89348978860466C9ceC24B9ba")),
    ("LBTC", address!("1E48D32a4F5e9f08DB9aE4959163300FaF8A6C8e")),
    ("LUSD", address!("848Cff46eb323f323b6Bbe1Df274E40793d7f2c2")),
    ("LZOO", address!("5E5290f350352768bD2bfC59c2DA15DD04A7cB88")),
    ("LSOL", address!("26B40f650156C7EbF9e087Dd0dca181Fe87625B7")),
    ("LBNB", address!("6EdcF3645DeF09DB45050638c41157D8B9FEa1cf")),
    ("LPOL", address!("28BfC5DD4B7E15659e41190983e5fE3df1132bB9")),
];

const ZOO_TOKENS: &[(&str, Address)] = &[
    ("WZOO", address!("4888E4a2Ee0F03051c72D2BD3ACf755eD3498B3E")),
    ("ZETH", address!("60E0a8167FC13dE89348978860466C9ceC24B9ba")),
    ("ZBTC", address!("1E48D32a4F5e9f08DB9aE4959163300FaF8A6C8e")),
    ("ZUSD", address!("848Cff46eb323f323b6Bbe1Df274E40793d7f2c2")),
    ("ZLUX", address!("5E5290f350352768bD2bfC59c2DA15DD04A7cB88")),
    ("ZSOL", address!("26B40f650156C7EbF9e087Dd0dca181Fe87625B7")),
    ("ZBNB", address!("6EdcF3645DeF09DB45050638c41157D8B9FEa1cf")),
    ("ZPOL", address!("28BfC5DD4B7E15659e41190983e5fE3df1132bB9")),
    ("ZCELO", address!("3078847F879A33994cDa2Ec1540ca52b5E0eE2e5")),
    ("ZFTM", address!("8B982132d639527E8a0eAAD385f97719af8f5e04")),
    ("ZTON", address!("3141b94b89691009b950c96e97Bff48e0C543E3C")),
];

pub const NETWORKS: &[NetworkEntry] = &[
    NetworkEntry {
        aliases: &["lux", "lux-mainnet"],
        name: "Lux Mainnet",
        chain_id: 96369,
        rpc: "http://localhost:8546",
        native_symbol: "LUX",
        contracts: SHARED_DEPLOYMENT,
        tokens: LUX_TOKENS,
    },
    NetworkEntry {
        aliases: &["zoo", "zoo-mainnet"],
        name: "Zoo Mainnet",
        chain_id: 200200,
        rpc: "http://localhost:8545",
        native_symbol: "ZOO",
        contracts: SHARED_DEPLOYMENT,
        tokens: ZOO_TOKENS,
    },
    NetworkEntry {
        aliases: &["lux-testnet", "testnet"],
        name: "Lux Testnet",
        chain_id: 96368,
        rpc: "http://localhost:8547",
        native_symbol: "LUX",
        contracts: SHARED_DEPLOYMENT,
        tokens: LUX_TOKENS,
    },
];
