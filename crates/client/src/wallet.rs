// Path: crates/client/src/wallet.rs
//! The signing-wallet seam.
//!
//! The dashboard never holds keys. Everything that needs the user's account
//! (listing accounts, switching chains, signing and sending) goes through an
//! EIP-1193 style `request(method, params)` call on a [`Wallet`].

use crate::rpc::{RpcClient, TransactionReceipt, TransactionRequest};
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tea_types::{
    config::RpcConfig,
    error::{ClientError, RpcError},
};

/// An EIP-1193 request channel to a wallet.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Sends one request and returns its raw result.
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError>;
}

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::Decode(format!("{method}: {e}")))
}

/// Typed helpers over [`Wallet::request`].
#[async_trait]
pub trait WalletExt: Wallet {
    /// `eth_requestAccounts`: asks the wallet to expose its accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, RpcError> {
        let v = self.request("eth_requestAccounts", json!([])).await?;
        decode("eth_requestAccounts", v)
    }

    /// `eth_accounts`: the accounts already exposed, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>, RpcError> {
        let v = self.request("eth_accounts", json!([])).await?;
        decode("eth_accounts", v)
    }

    /// `eth_chainId` as the wallet reports it (`0x`-prefixed hex).
    async fn chain_id(&self) -> Result<String, RpcError> {
        let v = self.request("eth_chainId", json!([])).await?;
        decode("eth_chainId", v)
    }

    /// `eth_getBalance` through the wallet's own provider.
    async fn get_balance(&self, account: Address) -> Result<U256, RpcError> {
        let v = self
            .request("eth_getBalance", json!([account, "latest"]))
            .await?;
        decode("eth_getBalance", v)
    }

    /// `eth_estimateGas` through the wallet's provider.
    async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<U256, RpcError> {
        let v = self.request("eth_estimateGas", json!([tx])).await?;
        decode("eth_estimateGas", v)
    }

    /// `eth_sendTransaction`: the wallet signs and broadcasts, returning the hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256, RpcError> {
        let v = self.request("eth_sendTransaction", json!([tx])).await?;
        decode("eth_sendTransaction", v)
    }

    /// `eth_getTransactionReceipt`; `None` while pending.
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, RpcError> {
        let v = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        decode("eth_getTransactionReceipt", v)
    }
}

impl<W: Wallet + ?Sized> WalletExt for W {}

/// Connects: prompts for accounts and returns the first one.
pub async fn connect(wallet: &dyn Wallet) -> Result<Address, ClientError> {
    let accounts = wallet.request_accounts().await?;
    let account = accounts.first().copied().ok_or(ClientError::NoAccounts)?;
    tracing::info!(target: "wallet", %account, "wallet connected");
    Ok(account)
}

/// The first exposed account, if the wallet is already connected.
pub async fn current_account(wallet: &dyn Wallet) -> Result<Option<Address>, ClientError> {
    Ok(wallet.accounts().await?.first().copied())
}

/// Resolves the sending account: the configured one if set, else the wallet's first.
pub async fn resolve_account(
    wallet: &dyn Wallet,
    configured: Option<Address>,
) -> Result<Address, ClientError> {
    match configured {
        Some(a) => Ok(a),
        None => current_account(wallet)
            .await?
            .ok_or(ClientError::NoAccounts),
    }
}

/// A wallet reached over JSON-RPC, such as a local signer or a dev node with
/// unlocked accounts.
///
/// Requests are never retried: resending `eth_sendTransaction` after a
/// dropped connection could broadcast twice.
#[derive(Debug)]
pub struct RpcWallet {
    rpc: RpcClient,
}

impl RpcWallet {
    /// Connects to the wallet endpoint at `url`.
    pub fn new(url: &str, request_timeout_ms: u64) -> Result<Self, RpcError> {
        let config = RpcConfig {
            endpoints: vec![url.to_string()],
            fallback_endpoints: Vec::new(),
            max_retries: 0,
            request_timeout_ms,
            ..RpcConfig::default()
        };
        Ok(Self {
            rpc: RpcClient::new(&config)?,
        })
    }

    /// The wallet endpoint.
    pub fn endpoint(&self) -> &str {
        self.rpc.current_endpoint()
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.rpc.request_value(method, params).await
    }
}

/// A scripted in-memory wallet for tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Handler = Box<dyn Fn(&Value) -> Result<Value, RpcError> + Send + Sync>;

    /// Answers each method with a handler and records every call.
    #[derive(Default)]
    pub struct MockWallet {
        handlers: HashMap<String, Handler>,
        pub calls: Mutex<Vec<(String, Value)>>,
    }

    impl MockWallet {
        pub fn on(
            mut self,
            method: &str,
            f: impl Fn(&Value) -> Result<Value, RpcError> + Send + Sync + 'static,
        ) -> Self {
            self.handlers.insert(method.to_string(), Box::new(f));
            self
        }

        pub fn returning(self, method: &str, value: Value) -> Self {
            self.on(method, move |_| Ok(value.clone()))
        }

        pub fn methods(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
        }

        pub fn params_of(&self, method: &str) -> Option<Value> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .find(|(m, _)| m == method)
                .map(|(_, p)| p.clone())
        }
    }

    #[async_trait]
    impl Wallet for MockWallet {
        async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), params.clone()));
            match self.handlers.get(method) {
                Some(h) => h(&params),
                None => Err(RpcError::Rpc {
                    code: -32601,
                    message: format!("method {method} not found"),
                    data: None,
                }),
            }
        }
    }
}
