// Path: crates/client/src/actions.rs
//! State-changing treasury calls: validation, pre-checks, gas and submission.

use crate::contracts::ITreasury;
use crate::gas::estimate_gas_with_fallback;
use crate::network::ensure_correct_network;
use crate::rpc::TransactionRequest;
use crate::wallet::{resolve_account, Wallet, WalletExt};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use std::time::Instant;
use tea_types::{
    app::{ActionKind, PendingTransaction},
    config::NetworkParams,
    error::ClientError,
    format::parse_amount,
};

/// One treasury call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Deposit native TEA (wei).
    Deposit(U256),
    /// Withdraw deposited TEA (wei).
    Withdraw(U256),
    /// Stake deposited TEA (wei).
    Stake(U256),
    /// Unstake (wei).
    Unstake(U256),
    /// Open a proposal.
    CreateProposal(String),
    /// Vote on a proposal id.
    Vote(U256),
    /// Close a proposal id.
    CloseProposal(U256),
}

impl Action {
    /// Builds an amount action from user input in ether.
    pub fn with_amount(kind: ActionKind, input: &str) -> Result<Self, ClientError> {
        let wei = parse_amount(input)?;
        match kind {
            ActionKind::Deposit => Ok(Self::Deposit(wei)),
            ActionKind::Withdraw => Ok(Self::Withdraw(wei)),
            ActionKind::Stake => Ok(Self::Stake(wei)),
            ActionKind::Unstake => Ok(Self::Unstake(wei)),
            other => Err(ClientError::InvalidAmount(format!(
                "{} does not take an amount",
                other.method_name()
            ))),
        }
    }

    /// Builds a `createProposal` action; the description must not be blank.
    pub fn create_proposal(description: &str) -> Result<Self, ClientError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ClientError::EmptyProposal);
        }
        Ok(Self::CreateProposal(description.to_string()))
    }

    /// The kind used for gas fallbacks and messages.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Deposit(_) => ActionKind::Deposit,
            Self::Withdraw(_) => ActionKind::Withdraw,
            Self::Stake(_) => ActionKind::Stake,
            Self::Unstake(_) => ActionKind::Unstake,
            Self::CreateProposal(_) => ActionKind::CreateProposal,
            Self::Vote(_) => ActionKind::Vote,
            Self::CloseProposal(_) => ActionKind::CloseProposal,
        }
    }

    /// ABI-encoded calldata.
    pub fn calldata(&self) -> Bytes {
        let data = match self {
            Self::Deposit(_) => ITreasury::depositCall {}.abi_encode(),
            Self::Withdraw(amount) => ITreasury::withdrawCall { amount: *amount }.abi_encode(),
            Self::Stake(amount) => ITreasury::stakeCall { amount: *amount }.abi_encode(),
            Self::Unstake(amount) => ITreasury::unstakeCall { amount: *amount }.abi_encode(),
            Self::CreateProposal(description) => ITreasury::createProposalCall {
                description: description.clone(),
            }
            .abi_encode(),
            Self::Vote(id) => ITreasury::voteCall { proposalId: *id }.abi_encode(),
            Self::CloseProposal(id) => ITreasury::closeProposalCall { proposalId: *id }.abi_encode(),
        };
        data.into()
    }

    /// Native value to attach; only deposits carry one.
    pub fn value(&self) -> Option<U256> {
        match self {
            Self::Deposit(amount) => Some(*amount),
            _ => None,
        }
    }

    /// The unsigned transaction from `from` to `treasury`.
    pub fn to_request(&self, from: Address, treasury: Address) -> TransactionRequest {
        TransactionRequest {
            from: Some(from),
            value: self.value(),
            ..TransactionRequest::call(treasury, self.calldata())
        }
    }
}

/// Submits actions through a wallet.
pub struct ActionSubmitter<'a> {
    wallet: &'a dyn Wallet,
    network: &'a NetworkParams,
    treasury: Address,
    account: Option<Address>,
}

impl<'a> ActionSubmitter<'a> {
    /// Sends to `treasury` on `network`, from the wallet's first account.
    pub fn new(wallet: &'a dyn Wallet, network: &'a NetworkParams, treasury: Address) -> Self {
        Self {
            wallet,
            network,
            treasury,
            account: None,
        }
    }

    /// Sends from `account` instead of the wallet's first account.
    pub fn with_account(mut self, account: Option<Address>) -> Self {
        self.account = account;
        self
    }

    /// Checks the chain, estimates gas and hands the transaction to the wallet.
    pub async fn submit(&self, action: &Action) -> Result<PendingTransaction, ClientError> {
        let kind = action.kind();
        ensure_correct_network(self.wallet, self.network).await?;
        let from = resolve_account(self.wallet, self.account).await?;

        let mut tx = action.to_request(from, self.treasury);
        tx.gas = Some(estimate_gas_with_fallback(self.wallet, kind, &tx).await);

        tracing::info!(target: "actions", %kind, %from, "waiting for wallet confirmation");
        let hash = self.wallet.send_transaction(&tx).await?;
        tracing::info!(target: "actions", %kind, %hash, "transaction submitted");

        Ok(PendingTransaction {
            hash,
            kind,
            submitted_at: Instant::now(),
        })
    }
}

fn is_governance(kind: ActionKind) -> bool {
    matches!(
        kind,
        ActionKind::CreateProposal | ActionKind::Vote | ActionKind::CloseProposal
    )
}

/// The user-facing message for a failed submission.
pub fn humanize_tx_error(kind: ActionKind, err: &ClientError) -> String {
    match err {
        ClientError::WalletUnavailable
        | ClientError::NoAccounts
        | ClientError::WrongNetwork { .. }
        | ClientError::InvalidAmount(_)
        | ClientError::EmptyProposal => return err.to_string(),
        _ => {}
    }
    let msg = err.to_string().to_lowercase();

    if is_governance(kind) {
        let fixed = if msg.contains("user rejected") || msg.contains("user denied") {
            "Transaction rejected"
        } else if msg.contains("jsonrpcengine") {
            "Network connection issue. Please try again."
        } else {
            return match kind {
                ActionKind::CreateProposal => "Failed to create proposal".into(),
                ActionKind::Vote => "Failed to vote".into(),
                _ => "Failed to close proposal".into(),
            };
        };
        return fixed.into();
    }

    let fixed = if msg.contains("insufficient funds") {
        "Insufficient funds for this transaction"
    } else if msg.contains("user rejected") || msg.contains("user denied") {
        "Transaction was rejected"
    } else if msg.contains("cannot estimate gas") {
        "Cannot estimate gas. The transaction may fail."
    } else if msg.contains("timeout") || msg.contains("timed out") {
        "Transaction confirmation timed out. Check your wallet for status."
    } else if msg.contains("jsonrpcengine") {
        "Network communication error. Please try again with a higher gas price."
    } else if msg.contains("replacement fee too low") {
        "Gas price too low. Please try again with a higher gas price."
    } else {
        "Transaction failed"
    };
    fixed.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::MockWallet;
    use alloy_primitives::B256;
    use serde_json::json;
    use tea_types::error::RpcError;

    const FROM: Address = Address::new([0x11; 20]);
    const TREASURY: Address = Address::new([0xee; 20]);

    fn rpc_err(message: &str) -> ClientError {
        ClientError::Rpc(RpcError::Rpc {
            code: -32000,
            message: message.into(),
            data: None,
        })
    }

    fn happy_wallet() -> MockWallet {
        MockWallet::default()
            .returning("eth_chainId", json!("0x27ea"))
            .returning("eth_accounts", json!([FROM]))
            .returning("eth_estimateGas", json!("0x186a0"))
            .returning("eth_sendTransaction", json!(B256::repeat_byte(0x42)))
    }

    #[test]
    fn amount_actions_validate_input() {
        let one = U256::from(10).pow(U256::from(18));
        assert_eq!(
            Action::with_amount(ActionKind::Stake, "1").unwrap(),
            Action::Stake(one)
        );
        assert!(matches!(
            Action::with_amount(ActionKind::Deposit, "0"),
            Err(ClientError::InvalidAmount(_))
        ));
        assert!(matches!(
            Action::with_amount(ActionKind::Vote, "1"),
            Err(ClientError::InvalidAmount(_))
        ));
    }

    #[test]
    fn blank_proposal_is_rejected() {
        assert!(matches!(
            Action::create_proposal("   "),
            Err(ClientError::EmptyProposal)
        ));
        assert_eq!(
            Action::create_proposal(" Plant trees ").unwrap(),
            Action::CreateProposal("Plant trees".into())
        );
    }

    #[test]
    fn only_deposit_carries_value() {
        let x = U256::from(5);
        assert_eq!(Action::Deposit(x).value(), Some(x));
        assert_eq!(Action::Withdraw(x).value(), None);
        assert_eq!(Action::Deposit(x).calldata().to_vec(), vec![0xd0, 0xe3, 0x0d, 0xb0]);
        // selector + one word
        assert_eq!(Action::Stake(x).calldata().len(), 36);
    }

    #[tokio::test]
    async fn submit_sends_buffered_gas_and_value() {
        let wallet = happy_wallet();
        let network = NetworkParams::default();
        let submitter = ActionSubmitter::new(&wallet, &network, TREASURY);
        let pending = submitter.submit(&Action::Deposit(U256::from(7))).await.unwrap();
        assert_eq!(pending.hash, B256::repeat_byte(0x42));
        assert_eq!(pending.kind, ActionKind::Deposit);

        let sent = wallet.params_of("eth_sendTransaction").unwrap();
        assert_eq!(sent[0]["value"], "0x7");
        // 100_000 * 1.2
        assert_eq!(sent[0]["gas"], "0x1d4c0");
        assert_eq!(
            wallet.methods(),
            vec!["eth_chainId", "eth_accounts", "eth_estimateGas", "eth_sendTransaction"]
        );
    }

    #[tokio::test]
    async fn submit_refuses_wrong_chain() {
        let wallet = happy_wallet().returning("eth_chainId", json!("0xaa36a7"));
        let network = NetworkParams::default();
        let err = ActionSubmitter::new(&wallet, &network, TREASURY)
            .submit(&Action::Stake(U256::from(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::WrongNetwork { .. }));
        assert!(wallet.params_of("eth_sendTransaction").is_none());
    }

    #[tokio::test]
    async fn submit_without_account_fails() {
        let wallet = happy_wallet().returning("eth_accounts", json!([]));
        let network = NetworkParams::default();
        let err = ActionSubmitter::new(&wallet, &network, TREASURY)
            .submit(&Action::Vote(U256::from(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoAccounts));
    }

    #[test]
    fn errors_are_humanized() {
        let stake = ActionKind::Stake;
        assert_eq!(
            humanize_tx_error(stake, &rpc_err("insufficient funds for gas * price + value")),
            "Insufficient funds for this transaction"
        );
        assert_eq!(
            humanize_tx_error(stake, &rpc_err("User rejected the request.")),
            "Transaction was rejected"
        );
        assert_eq!(
            humanize_tx_error(stake, &rpc_err("replacement fee too low")),
            "Gas price too low. Please try again with a higher gas price."
        );
        assert_eq!(humanize_tx_error(stake, &rpc_err("boom")), "Transaction failed");
        assert_eq!(
            humanize_tx_error(ActionKind::Vote, &rpc_err("user rejected action")),
            "Transaction rejected"
        );
        assert_eq!(
            humanize_tx_error(ActionKind::CloseProposal, &rpc_err("boom")),
            "Failed to close proposal"
        );
        assert_eq!(
            humanize_tx_error(stake, &ClientError::NoAccounts),
            "No accounts available in wallet"
        );
    }
}
