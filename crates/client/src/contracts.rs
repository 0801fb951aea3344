// Path: crates/client/src/contracts.rs
//! ABI bindings for the treasury and sTEA contracts, and the read seam the
//! aggregation code is written against.

use crate::network::check_connectivity;
use crate::rpc::{RpcClient, TransactionRequest};
use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use tea_types::{app::Proposal, config::ContractsConfig, error::ClientError};

sol! {
    /// The staking treasury.
    interface ITreasury {
        function deposit() external payable;
        function withdraw(uint256 amount) external;
        function stake(uint256 amount) external;
        function unstake(uint256 amount) external;
        function createProposal(string description) external;
        function vote(uint256 proposalId) external;
        function closeProposal(uint256 proposalId) external;

        function balances(address account) external view returns (uint256);
        function stakedBalances(address account) external view returns (uint256);
        function totalStaked() external view returns (uint256);
        function hasVoted(address account) external view returns (bool);
        function proposals(uint256 index) external view returns (string description, uint256 voteCount, bool active);
        function leaderboard() external view returns (address[] memory, uint256[] memory);
    }

    /// The staking-receipt token (ERC-20 subset).
    interface IStea {
        function balanceOf(address account) external view returns (uint256);
        function totalSupply() external view returns (uint256);
        function decimals() external view returns (uint8);
        function symbol() external view returns (string);
        function name() external view returns (string);
    }
}

/// Read access to contract state.
#[async_trait]
pub trait ContractReader: Send + Sync {
    /// True if the read provider is reachable.
    async fn connected(&self) -> bool;
    /// The treasury's `leaderboard()` arrays.
    async fn leaderboard(&self) -> Result<(Vec<Address>, Vec<U256>), ClientError>;
    /// sTEA `balanceOf`.
    async fn stea_balance_of(&self, account: Address) -> Result<U256, ClientError>;
    /// Treasury `stakedBalances`.
    async fn staked_balance_of(&self, account: Address) -> Result<U256, ClientError>;
    /// Treasury `balances` (deposited TEA).
    async fn balance_of(&self, account: Address) -> Result<U256, ClientError>;
    /// Treasury `totalStaked`.
    async fn total_staked(&self) -> Result<U256, ClientError>;
    /// Treasury `hasVoted`.
    async fn has_voted(&self, account: Address) -> Result<bool, ClientError>;
    /// Treasury `proposals(index)`.
    async fn proposal(&self, index: u64) -> Result<Proposal, ClientError>;
    /// Native TEA balance from the read provider.
    async fn native_balance(&self, account: Address) -> Result<U256, ClientError>;
}

/// sTEA token metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: U256,
}

/// [`ContractReader`] over `eth_call` on the read provider.
#[derive(Debug)]
pub struct RpcContracts {
    rpc: RpcClient,
    addresses: ContractsConfig,
}

impl RpcContracts {
    /// Reads the contracts at `addresses` through `rpc`.
    pub fn new(rpc: RpcClient, addresses: ContractsConfig) -> Self {
        Self { rpc, addresses }
    }

    /// The underlying read provider.
    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    /// The contract addresses in use.
    pub fn addresses(&self) -> &ContractsConfig {
        &self.addresses
    }

    async fn call<C: SolCall + Send>(&self, to: Address, call: C) -> Result<C::Return, ClientError> {
        let tx = TransactionRequest::call(to, call.abi_encode());
        let data = self.rpc.call(&tx).await?;
        C::abi_decode_returns(&data, true).map_err(|e| {
            ClientError::Abi(format!("{}: {e}", C::SIGNATURE))
        })
    }

    /// Name, symbol, decimals and supply of sTEA.
    pub async fn token_info(&self) -> Result<TokenInfo, ClientError> {
        let stea = self.addresses.stea;
        let (name, symbol, decimals, supply) = futures::try_join!(
            self.call(stea, IStea::nameCall {}),
            self.call(stea, IStea::symbolCall {}),
            self.call(stea, IStea::decimalsCall {}),
            self.call(stea, IStea::totalSupplyCall {}),
        )?;
        Ok(TokenInfo {
            name: name._0,
            symbol: symbol._0,
            decimals: decimals._0,
            total_supply: supply._0,
        })
    }
}

#[async_trait]
impl ContractReader for RpcContracts {
    async fn connected(&self) -> bool {
        check_connectivity(&self.rpc).await
    }

    async fn leaderboard(&self) -> Result<(Vec<Address>, Vec<U256>), ClientError> {
        let r = self
            .call(self.addresses.treasury, ITreasury::leaderboardCall {})
            .await?;
        Ok((r._0, r._1))
    }

    async fn stea_balance_of(&self, account: Address) -> Result<U256, ClientError> {
        let r = self
            .call(self.addresses.stea, IStea::balanceOfCall { account })
            .await?;
        Ok(r._0)
    }

    async fn staked_balance_of(&self, account: Address) -> Result<U256, ClientError> {
        let r = self
            .call(self.addresses.treasury, ITreasury::stakedBalancesCall { account })
            .await?;
        Ok(r._0)
    }

    async fn balance_of(&self, account: Address) -> Result<U256, ClientError> {
        let r = self
            .call(self.addresses.treasury, ITreasury::balancesCall { account })
            .await?;
        Ok(r._0)
    }

    async fn total_staked(&self) -> Result<U256, ClientError> {
        let r = self
            .call(self.addresses.treasury, ITreasury::totalStakedCall {})
            .await?;
        Ok(r._0)
    }

    async fn has_voted(&self, account: Address) -> Result<bool, ClientError> {
        let r = self
            .call(self.addresses.treasury, ITreasury::hasVotedCall { account })
            .await?;
        Ok(r._0)
    }

    async fn proposal(&self, index: u64) -> Result<Proposal, ClientError> {
        let r = self
            .call(
                self.addresses.treasury,
                ITreasury::proposalsCall {
                    index: U256::from(index),
                },
            )
            .await?;
        Ok(Proposal {
            id: index,
            description: r.description,
            vote_count: r.voteCount,
            active: r.active,
        })
    }

    async fn native_balance(&self, account: Address) -> Result<U256, ClientError> {
        Ok(self.rpc.get_balance(account).await?)
    }
}
