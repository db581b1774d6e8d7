use crate::amm::providers::{DexBackend, TxOutcome};
use crate::errors::{AmmError, AmmResult, Stage};
use alloy::primitives::{Address, U256};
use log::info;

/// Makes sure `spender` may move at least `amount` of `token` for `owner`.
///
/// When the current allowance falls short, an unlimited approval is sent and
/// the function waits for it to be mined. Returns the approval outcome, or
/// `None` if no approval was needed.
pub async fn ensure_allowance<B: DexBackend + ?Sized>(
    backend: &B,
    token: Address,
    owner: Address,
    spender: Address,
    amount: U256,
) -> AmmResult<Option<TxOutcome>> {
    let current = backend.allowance(token, owner, spender).await?;
    if current >= amount {
        info!("Allowance {} for {} covers {}", current, spender, amount);
        return Ok(None);
    }

    info!("Approving {} to spend {}", spender, token);
    let tx_hash = backend.approve(token, spender, U256::MAX).await?;
    info!("Approval transaction sent: {}", tx_hash);

    let outcome = backend
        .wait_for_receipt(tx_hash, Stage::ConfirmApproval)
        .await?;
    if !outcome.success {
        return Err(AmmError::ApprovalReverted { tx_hash });
    }
    info!("Approval confirmed in block {:?}", outcome.block_number);
    Ok(Some(outcome))
}
