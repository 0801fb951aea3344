// Path: crates/client/src/session.rs
//! Everything a command needs, built once from the config.

use crate::actions::ActionSubmitter;
use crate::balances::{get_native_balance, get_stea_balance, get_user_balances};
use crate::contracts::{ContractReader, RpcContracts};
use crate::network::{check_connectivity, status_of};
use crate::rpc::RpcClient;
use crate::wallet::{current_account, RpcWallet, Wallet};
use alloy_primitives::{Address, U256};
use tea_types::{
    app::{NetworkStatus, UserBalances},
    config::ClientConfig,
    error::ClientError,
};

/// The balances shown for the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub account: Address,
    pub native_balance: U256,
    pub stea_balance: U256,
    pub balances: UserBalances,
}

/// A read provider plus an optional signing wallet.
pub struct Session {
    config: ClientConfig,
    contracts: RpcContracts,
    wallet: Option<RpcWallet>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("rpc", self.contracts.rpc())
            .field("wallet", &self.wallet.as_ref().map(RpcWallet::endpoint))
            .finish()
    }
}

impl Session {
    /// Builds the transports described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let rpc = RpcClient::new(&config.rpc)?;
        let contracts = RpcContracts::new(rpc, config.contracts.clone());
        let wallet = match config.wallet.endpoint.as_deref() {
            Some(url) if !url.trim().is_empty() => {
                Some(RpcWallet::new(url, config.rpc.request_timeout_ms)?)
            }
            _ => None,
        };
        Ok(Self {
            config,
            contracts,
            wallet,
        })
    }

    /// The effective configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Typed contract reads over the read provider.
    pub fn contracts(&self) -> &RpcContracts {
        &self.contracts
    }

    /// The same contracts behind the read seam.
    pub fn reader(&self) -> &dyn ContractReader {
        &self.contracts
    }

    /// The wallet, if one is configured.
    pub fn wallet_opt(&self) -> Option<&dyn Wallet> {
        self.wallet.as_ref().map(|w| w as &dyn Wallet)
    }

    /// The wallet, or [`ClientError::WalletUnavailable`].
    pub fn wallet(&self) -> Result<&dyn Wallet, ClientError> {
        self.wallet_opt().ok_or(ClientError::WalletUnavailable)
    }

    /// The configured account, else the wallet's first exposed account.
    pub async fn account(&self) -> Result<Option<Address>, ClientError> {
        if let Some(a) = self.config.wallet.account {
            return Ok(Some(a));
        }
        match self.wallet_opt() {
            Some(w) => current_account(w).await,
            None => Ok(None),
        }
    }

    /// A submitter bound to the configured network and treasury.
    pub fn submitter(&self) -> Result<ActionSubmitter<'_>, ClientError> {
        Ok(ActionSubmitter::new(
            self.wallet()?,
            &self.config.network,
            self.config.contracts.treasury,
        )
        .with_account(self.config.wallet.account))
    }

    /// Whether the read provider answers `eth_blockNumber`.
    pub async fn network_status(&self) -> NetworkStatus {
        status_of(check_connectivity(self.contracts.rpc()).await)
    }

    /// Reads every dashboard balance for `account` concurrently.
    pub async fn dashboard(&self, account: Address) -> DashboardView {
        let reader = self.reader();
        let (native_balance, stea_balance, balances) = futures::join!(
            get_native_balance(self.wallet_opt(), reader, account),
            get_stea_balance(reader, account),
            get_user_balances(reader, account),
        );
        DashboardView {
            account,
            native_balance,
            stea_balance,
            balances,
        }
    }
}
