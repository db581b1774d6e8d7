use alloy::primitives::{Address, TxHash};
use std::fmt;
use thiserror::Error;

/// Workflow stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    ChainId,
    TokenInfo,
    Quote,
    CheckAllowance,
    Approve,
    ConfirmApproval,
    Execute,
    ConfirmSwap,
    Balance,
    Status,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Connect => "connect",
            Stage::ChainId => "chain id query",
            Stage::TokenInfo => "token info",
            Stage::Quote => "quote",
            Stage::CheckAllowance => "allowance check",
            Stage::Approve => "approval",
            Stage::ConfirmApproval => "approval confirmation",
            Stage::Execute => "swap submission",
            Stage::ConfirmSwap => "swap confirmation",
            Stage::Balance => "balance query",
            Stage::Status => "status query",
        };
        f.write_str(name)
    }
}

/// Broad error classes, used by callers to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Credential,
    Input,
    Transport,
    Routing,
    OnChain,
}

#[derive(Debug, Error)]
pub enum AmmError {
    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no wallet credentials provided: use --private-key, LUX_PRIVATE_KEY, or LUX_MNEMONIC")]
    NoCredentials,

    #[error("invalid {source_name}: {reason}")]
    InvalidCredential {
        source_name: &'static str,
        reason: String,
    },

    #[error("wallet not loaded")]
    WalletNotLoaded,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid slippage: {0}")]
    InvalidSlippage(String),

    #[error("{stage} failed: {message}")]
    Transport { stage: Stage, message: String },

    #[error("{operation} timed out after {seconds}s")]
    Timeout {
        operation: &'static str,
        seconds: u64,
    },

    #[error("no pool found for pair {token_in} -> {token_out}")]
    NoRoute { token_in: Address, token_out: Address },

    #[error("approval transaction {tx_hash} failed on-chain")]
    ApprovalReverted { tx_hash: TxHash },

    #[error("swap transaction {tx_hash} failed on-chain")]
    SwapReverted { tx_hash: TxHash },
}

impl AmmError {
    pub fn transport(stage: Stage, err: impl fmt::Display) -> Self {
        AmmError::Transport {
            stage,
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AmmError::UnknownNetwork(_)
            | AmmError::ChainIdMismatch { .. }
            | AmmError::InvalidConfig(_) => ErrorKind::Configuration,
            AmmError::NoCredentials
            | AmmError::InvalidCredential { .. }
            | AmmError::WalletNotLoaded => ErrorKind::Credential,
            AmmError::InvalidAmount(_) | AmmError::InvalidSlippage(_) => ErrorKind::Input,
            AmmError::Transport { .. } | AmmError::Timeout { .. } => ErrorKind::Transport,
            AmmError::NoRoute { .. } => ErrorKind::Routing,
            AmmError::ApprovalReverted { .. } | AmmError::SwapReverted { .. } => {
                ErrorKind::OnChain
            }
        }
    }

    /// The stage that failed, when the error came from a remote call or a
    /// mined transaction.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AmmError::Transport { stage, .. } => Some(*stage),
            AmmError::ChainIdMismatch { .. } => Some(Stage::ChainId),
            AmmError::NoRoute { .. } => Some(Stage::Quote),
            AmmError::ApprovalReverted { .. } => Some(Stage::ConfirmApproval),
            AmmError::SwapReverted { .. } => Some(Stage::ConfirmSwap),
            _ => None,
        }
    }
}

pub type AmmResult<T> = Result<T, AmmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_follow_taxonomy() {
        assert_eq!(
            AmmError::UnknownNetwork("mars".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            AmmError::ChainIdMismatch {
                expected: 1,
                actual: 2
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(AmmError::NoCredentials.kind(), ErrorKind::Credential);
        assert_eq!(
            AmmError::transport(Stage::Quote, "connection refused").kind(),
            ErrorKind::Transport
        );
        assert_eq!(
            AmmError::NoRoute {
                token_in: Address::ZERO,
                token_out: Address::ZERO
            }
            .kind(),
            ErrorKind::Routing
        );
        assert_eq!(
            AmmError::SwapReverted {
                tx_hash: TxHash::ZERO
            }
            .kind(),
            ErrorKind::OnChain
        );
    }

    #[test]
    fn test_transport_error_names_stage() {
        let err = AmmError::transport(Stage::CheckAllowance, "boom");
        assert_eq!(err.stage(), Some(Stage::CheckAllowance));
        assert_eq!(err.to_string(), "allowance check failed: boom");
    }

    #[test]
    fn test_no_route_message() {
        let err = AmmError::NoRoute {
            token_in: Address::ZERO,
            token_out: Address::ZERO,
        };
        assert!(err.to_string().starts_with("no pool found for pair"));
    }
}
