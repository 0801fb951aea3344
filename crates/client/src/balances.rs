// Path: crates/client/src/balances.rs
//! Dashboard balance reads. These never fail: an unreadable value shows as zero.

use crate::contracts::ContractReader;
use crate::wallet::{Wallet, WalletExt};
use alloy_primitives::{Address, U256};
use tea_types::{app::UserBalances, error::ClientError};

/// The account's sTEA balance, or zero if it cannot be read.
pub async fn get_stea_balance(reader: &dyn ContractReader, account: Address) -> U256 {
    match reader.stea_balance_of(account).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(target: "balances", %account, error = %e, "error getting sTEA balance");
            U256::ZERO
        }
    }
}

/// The staked balance: sTEA held, falling back to the treasury's record.
async fn staked_balance(reader: &dyn ContractReader, account: Address) -> Result<U256, ClientError> {
    match reader.stea_balance_of(account).await {
        Ok(b) => Ok(b),
        Err(e) => {
            tracing::warn!(target: "balances", error = %e, "sTEA read failed, using treasury stakedBalances");
            reader.staked_balance_of(account).await
        }
    }
}

/// Everything the dashboard shows for `account`; zeroed on any failure.
pub async fn get_user_balances(reader: &dyn ContractReader, account: Address) -> UserBalances {
    if !reader.connected().await {
        tracing::warn!(target: "balances", "network connectivity issues, balances may not load");
        return UserBalances::default();
    }
    let read = async {
        let (balance, staked_balance, total_staked, has_voted) = futures::try_join!(
            reader.balance_of(account),
            staked_balance(reader, account),
            reader.total_staked(),
            reader.has_voted(account),
        )?;
        Ok::<_, ClientError>(UserBalances {
            balance,
            staked_balance,
            total_staked,
            has_voted,
        })
    };
    match read.await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(target: "balances", %account, error = %e, "error getting user balances");
            UserBalances::default()
        }
    }
}

/// Native TEA balance: from the wallet if there is one, else the read provider.
pub async fn get_native_balance(
    wallet: Option<&dyn Wallet>,
    reader: &dyn ContractReader,
    account: Address,
) -> U256 {
    if let Some(wallet) = wallet {
        match wallet.get_balance(account).await {
            Ok(b) => return b,
            Err(e) => {
                tracing::warn!(target: "balances", error = %e, "wallet balance read failed, using read provider");
            }
        }
    }
    match reader.native_balance(account).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(target: "balances", %account, error = %e, "error getting native balance");
            U256::ZERO
        }
    }
}
