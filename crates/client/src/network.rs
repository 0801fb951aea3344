// Path: crates/client/src/network.rs
//! Read-provider reachability and wallet chain checks.

use crate::rpc::RpcClient;
use crate::wallet::{Wallet, WalletExt};
use serde_json::json;
use tea_types::{
    app::NetworkStatus,
    config::NetworkParams,
    error::{ClientError, UNRECOGNIZED_CHAIN_CODE},
};

/// Returns true if the read provider answers `eth_blockNumber`.
pub async fn check_connectivity(rpc: &RpcClient) -> bool {
    match rpc.block_number().await {
        Ok(block) => {
            tracing::debug!(target: "rpc", block, "read provider reachable");
            true
        }
        Err(e) => {
            tracing::error!(target: "rpc", error = %e, "network connectivity check failed");
            false
        }
    }
}

/// The header status for a connectivity result.
pub fn status_of(reachable: bool) -> NetworkStatus {
    if reachable {
        NetworkStatus::Connected
    } else {
        NetworkStatus::Disconnected
    }
}

/// Returns true if the wallet is on `params`' chain. Wallet errors read as false.
pub async fn check_correct_network(wallet: &dyn Wallet, params: &NetworkParams) -> bool {
    match wallet.chain_id().await {
        Ok(id) => id.eq_ignore_ascii_case(&params.chain_id_hex()),
        Err(e) => {
            tracing::error!(target: "wallet", error = %e, "error checking network");
            false
        }
    }
}

/// Fails with [`ClientError::WrongNetwork`] unless the wallet is on `params`' chain.
pub async fn ensure_correct_network(
    wallet: &dyn Wallet,
    params: &NetworkParams,
) -> Result<(), ClientError> {
    let actual = wallet.chain_id().await?;
    if actual.eq_ignore_ascii_case(&params.chain_id_hex()) {
        Ok(())
    } else {
        Err(ClientError::WrongNetwork {
            expected_name: params.chain_name.clone(),
            actual,
        })
    }
}

/// Asks the wallet to switch to `params`' chain, adding the chain first if
/// the wallet does not know it.
pub async fn switch_network(wallet: &dyn Wallet, params: &NetworkParams) -> Result<(), ClientError> {
    let switch = wallet
        .request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": params.chain_id_hex() }]),
        )
        .await;

    match switch {
        Ok(_) => {
            tracing::info!(target: "wallet", chain = %params.chain_name, "switched network");
            Ok(())
        }
        Err(e) if e.rpc_code() == Some(UNRECOGNIZED_CHAIN_CODE) => {
            tracing::info!(target: "wallet", chain = %params.chain_name, "chain unknown to wallet, adding it");
            wallet
                .request("wallet_addEthereumChain", json!([params.to_add_chain_params()]))
                .await
                .map_err(|add| {
                    tracing::error!(target: "wallet", error = %add, "error adding network");
                    ClientError::NetworkSwitch(format!(
                        "Failed to add {} network to wallet",
                        params.chain_name
                    ))
                })?;
            Ok(())
        }
        Err(e) => {
            tracing::error!(target: "wallet", error = %e, "error switching network");
            Err(ClientError::NetworkSwitch(format!(
                "Failed to switch to {} network",
                params.chain_name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::MockWallet;
    use tea_types::error::RpcError;

    fn unknown_chain() -> RpcError {
        RpcError::Rpc {
            code: UNRECOGNIZED_CHAIN_CODE,
            message: "Unrecognized chain ID".into(),
            data: None,
        }
    }

    #[tokio::test]
    async fn chain_id_compare_ignores_case() {
        let params = NetworkParams::default();
        let w = MockWallet::default().returning("eth_chainId", json!("0x27EA"));
        assert!(check_correct_network(&w, &params).await);
        let w = MockWallet::default().returning("eth_chainId", json!("0x1"));
        assert!(!check_correct_network(&w, &params).await);
        // A wallet that cannot answer is treated as the wrong network.
        assert!(!check_correct_network(&MockWallet::default(), &params).await);
    }

    #[tokio::test]
    async fn wrong_network_error_names_the_chain() {
        let w = MockWallet::default().returning("eth_chainId", json!("0x1"));
        let err = ensure_correct_network(&w, &NetworkParams::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please switch to Tea Sepolia network to continue (wallet is on 0x1)"
        );
    }

    #[tokio::test]
    async fn switch_adds_unknown_chain() {
        let w = MockWallet::default()
            .on("wallet_switchEthereumChain", |_| Err(unknown_chain()))
            .returning("wallet_addEthereumChain", serde_json::Value::Null);
        switch_network(&w, &NetworkParams::default()).await.unwrap();
        assert_eq!(
            w.methods(),
            vec!["wallet_switchEthereumChain", "wallet_addEthereumChain"]
        );
        let added = w.params_of("wallet_addEthereumChain").unwrap();
        assert_eq!(added[0]["chainId"], "0x27ea");
        assert_eq!(added[0]["nativeCurrency"]["symbol"], "TEA");
    }

    #[tokio::test]
    async fn failed_add_is_reported() {
        let w = MockWallet::default()
            .on("wallet_switchEthereumChain", |_| Err(unknown_chain()))
            .on("wallet_addEthereumChain", |_| {
                Err(RpcError::Rpc {
                    code: 4001,
                    message: "User rejected the request.".into(),
                    data: None,
                })
            });
        let err = switch_network(&w, &NetworkParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to add Tea Sepolia network to wallet");
    }

    #[tokio::test]
    async fn other_switch_errors_do_not_add() {
        let w = MockWallet::default().on("wallet_switchEthereumChain", |_| {
            Err(RpcError::Rpc {
                code: 4001,
                message: "User rejected the request.".into(),
                data: None,
            })
        });
        let err = switch_network(&w, &NetworkParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to switch to Tea Sepolia network");
        assert_eq!(w.methods(), vec!["wallet_switchEthereumChain"]);
    }
}
