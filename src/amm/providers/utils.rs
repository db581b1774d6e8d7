use crate::errors::{AmmError, AmmResult, Stage};
use alloy::primitives::TxHash;
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionReceipt;
use std::future::Future;
use std::time::Duration;

pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Run `fut` under a deadline. Expiry abandons the local call only; anything
/// already broadcast stays broadcast.
pub async fn within<T, F>(limit: Duration, operation: &'static str, fut: F) -> AmmResult<T>
where
    F: Future<Output = AmmResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AmmError::Timeout {
            operation,
            seconds: limit.as_secs(),
        }),
    }
}

pub fn verify_chain_id(expected: u64, actual: u64) -> AmmResult<()> {
    if expected != actual {
        return Err(AmmError::ChainIdMismatch { expected, actual });
    }
    Ok(())
}

/// Poll until the node returns a receipt for `tx_hash`.
pub async fn poll_receipt(
    provider: &DynProvider,
    tx_hash: TxHash,
    stage: Stage,
) -> AmmResult<TransactionReceipt> {
    loop {
        let receipt = provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| AmmError::transport(stage, e))?;
        if let Some(receipt) = receipt {
            return Ok(receipt);
        }
        tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_verify_chain_id() {
        assert!(verify_chain_id(200200, 200200).is_ok());
        let err = verify_chain_id(200200, 96369).unwrap_err();
        assert!(matches!(
            err,
            AmmError::ChainIdMismatch {
                expected: 200200,
                actual: 96369
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_within_passes_result_through() {
        let value = within(Duration::from_secs(1), "noop", async { Ok(7u8) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_within_times_out() {
        let err = within(Duration::from_millis(10), "sleepy call", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            AmmError::Timeout {
                operation: "sleepy call",
                ..
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
