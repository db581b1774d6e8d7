use crate::errors::{AmmError, AmmResult};
use alloy::primitives::Address;
use alloy::signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use alloy::signers::Signer;
use log::{debug, info};
use std::fmt;

pub const PRIVATE_KEY_ENV: &str = "LUX_PRIVATE_KEY";
pub const MNEMONIC_ENV: &str = "LUX_MNEMONIC";
pub const MNEMONIC_PASSPHRASE_ENV: &str = "LUX_MNEMONIC_PASSPHRASE";

/// One BIP-32 derivation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildIndex {
    Hardened(u32),
    Normal(u32),
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildIndex::Hardened(i) => write!(f, "{}'", i),
            ChildIndex::Normal(i) => write!(f, "{}", i),
        }
    }
}

/// Derivation path below the master key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivationPath<'a>(pub &'a [ChildIndex]);

impl fmt::Display for DerivationPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for step in self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

/// m/44'/60'/0'/0/0
pub const ETHEREUM_DERIVATION_PATH: DerivationPath<'static> = DerivationPath(&[
    ChildIndex::Hardened(44),
    ChildIndex::Hardened(60),
    ChildIndex::Hardened(0),
    ChildIndex::Normal(0),
    ChildIndex::Normal(0),
]);

/// Where the signing key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Explicit,
    EnvPrivateKey,
    EnvMnemonic,
}

/// Raw credential inputs, in precedence order.
#[derive(Clone, Default)]
pub struct Credentials {
    pub private_key: Option<String>,
    pub env_private_key: Option<String>,
    pub env_mnemonic: Option<String>,
    pub passphrase: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field(
                "env_private_key",
                &self.env_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("env_mnemonic", &self.env_mnemonic.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Credentials {
    pub fn from_env(explicit_key: Option<String>) -> Self {
        Self {
            private_key: explicit_key,
            env_private_key: std::env::var(PRIVATE_KEY_ENV).ok(),
            env_mnemonic: std::env::var(MNEMONIC_ENV).ok(),
            passphrase: std::env::var(MNEMONIC_PASSPHRASE_ENV).unwrap_or_default(),
        }
    }
}

/// A signing key bound to one chain, plus its address.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    source: CredentialSource,
}

impl Wallet {
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.signer.chain_id()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .field("chain_id", &self.chain_id())
            .field("source", &self.source)
            .finish()
    }
}

/// Parse a hex private key, with or without `0x`. Empty and all-zero keys are rejected.
pub fn parse_private_key(hex_key: &str, source_name: &'static str) -> AmmResult<PrivateKeySigner> {
    let trimmed = hex_key.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let invalid = |reason: String| AmmError::InvalidCredential {
        source_name,
        reason,
    };

    let bytes = alloy::primitives::hex::decode(stripped).map_err(|e| invalid(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(invalid(format!("expected 32 bytes, got {}", bytes.len())));
    }
    if bytes.iter().all(|b| *b == 0) {
        return Err(invalid("key is zero".to_string()));
    }
    PrivateKeySigner::from_slice(&bytes).map_err(|e| invalid(e.to_string()))
}

/// Mnemonic + passphrase -> seed -> master key -> `path` -> leaf signing key.
pub fn derive_from_mnemonic(
    mnemonic: &str,
    passphrase: &str,
    path: DerivationPath<'_>,
) -> AmmResult<PrivateKeySigner> {
    let invalid = |reason: String| AmmError::InvalidCredential {
        source_name: "mnemonic",
        reason,
    };

    MnemonicBuilder::<English>::default()
        .phrase(mnemonic.trim())
        .derivation_path(path.to_string().as_str())
        .map_err(|e| invalid(format!("failed to derive key: {}", e)))?
        .password(passphrase)
        .build()
        .map_err(|e| invalid(format!("failed to derive key: {}", e)))
}

/// Resolve the first available credential source into a chain-bound wallet.
/// Once a source is present it is used or fails; later sources are not tried.
pub fn derive_wallet(
    credentials: &Credentials,
    path: DerivationPath<'_>,
    chain_id: u64,
) -> AmmResult<Wallet> {
    let (signer, source) = if let Some(key) = non_empty(credentials.private_key.clone()) {
        (parse_private_key(&key, "private key")?, CredentialSource::Explicit)
    } else if let Some(key) = non_empty(credentials.env_private_key.clone()) {
        (
            parse_private_key(&key, PRIVATE_KEY_ENV)?,
            CredentialSource::EnvPrivateKey,
        )
    } else if let Some(mnemonic) = non_empty(credentials.env_mnemonic.clone()) {
        debug!("Deriving wallet along {}", path);
        (
            derive_from_mnemonic(&mnemonic, &credentials.passphrase, path)?,
            CredentialSource::EnvMnemonic,
        )
    } else {
        return Err(AmmError::NoCredentials);
    };

    let signer = signer.with_chain_id(Some(chain_id));
    info!("Wallet {} loaded from {:?}", signer.address(), source);
    Ok(Wallet { signer, source })
}
