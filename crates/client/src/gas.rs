// Path: crates/client/src/gas.rs
//! Gas limits for submitted actions.

use crate::rpc::TransactionRequest;
use crate::wallet::{Wallet, WalletExt};
use alloy_primitives::U256;
use tea_types::app::ActionKind;

/// Estimates are padded by this percentage.
pub const GAS_BUFFER_PERCENT: u64 = 120;

/// The limit used when estimation fails.
pub fn fallback_gas_limit(kind: ActionKind) -> U256 {
    let limit: u64 = match kind {
        ActionKind::Deposit => 100_000,
        ActionKind::Withdraw | ActionKind::Stake | ActionKind::Unstake => 80_000,
        ActionKind::Vote | ActionKind::CreateProposal => 150_000,
        ActionKind::CloseProposal => 100_000,
    };
    U256::from(limit)
}

/// An estimate with the buffer applied.
pub fn buffered(estimate: U256) -> U256 {
    estimate.saturating_mul(U256::from(GAS_BUFFER_PERCENT)) / U256::from(100)
}

/// Estimates through the wallet's provider, falling back to a fixed limit.
pub async fn estimate_gas_with_fallback(
    wallet: &dyn Wallet,
    kind: ActionKind,
    tx: &TransactionRequest,
) -> U256 {
    match wallet.estimate_gas(tx).await {
        Ok(estimate) => {
            let limit = buffered(estimate);
            tracing::debug!(target: "actions", %kind, %estimate, %limit, "gas estimated");
            limit
        }
        Err(e) => {
            let limit = fallback_gas_limit(kind);
            tracing::warn!(target: "actions", %kind, error = %e, %limit, "gas estimation failed, using fallback limit");
            limit
        }
    }
}
