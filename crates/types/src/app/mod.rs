// Path: crates/types/src/app/mod.rs
//! Domain data structures mirrored from the treasury and sTEA contracts.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// A governance proposal as stored by the treasury contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// The proposal's index in the contract's `proposals` array.
    pub id: u64,
    /// Free-form description.
    pub description: String,
    /// Votes cast so far.
    pub vote_count: U256,
    /// Whether the proposal still accepts votes.
    pub active: bool,
}

/// The balances shown on the dashboard for one account, in wei.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBalances {
    /// Deposited TEA held by the treasury for the account.
    pub balance: U256,
    /// Staked balance (sTEA held, or the treasury's record as a fallback).
    pub staked_balance: U256,
    /// Total staked across all accounts.
    pub total_staked: U256,
    /// Whether the account has already voted.
    pub has_voted: bool,
}

/// Reachability of the read provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    /// The read provider answered.
    Connected,
    /// The read provider did not answer.
    Disconnected,
    /// Not checked yet.
    #[default]
    Unknown,
}

impl fmt::Display for NetworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// One row of a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// The holder.
    pub address: Address,
    /// The holder's amount in wei.
    pub amount: U256,
}

/// Holders sorted by amount, highest first, each address at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Builds a board from raw observations.
    ///
    /// Duplicate addresses keep their maximum amount at the position of their
    /// first appearance; rows are then stably sorted by amount, descending.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (Address, U256)>,
    {
        let mut entries: Vec<LeaderboardEntry> = Vec::new();
        let mut index: HashMap<Address, usize> = HashMap::new();
        for (address, amount) in observations {
            match index.get(&address) {
                Some(&i) => {
                    if let Some(existing) = entries.get_mut(i) {
                        if amount > existing.amount {
                            existing.amount = amount;
                        }
                    }
                }
                None => {
                    index.insert(address, entries.len());
                    entries.push(LeaderboardEntry { address, amount });
                }
            }
        }
        entries.sort_by(|a, b| b.amount.cmp(&a.amount));
        Self { entries }
    }

    /// The rows, highest first.
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Holder addresses in rank order.
    pub fn addresses(&self) -> Vec<Address> {
        self.entries.iter().map(|e| e.address).collect()
    }

    /// Amounts in rank order.
    pub fn amounts(&self) -> Vec<U256> {
        self.entries.iter().map(|e| e.amount).collect()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the board has no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The 1-based rank of `address`, if it is on the board.
    pub fn rank_of(&self, address: Address) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.address == address)
            .map(|i| i + 1)
    }
}

/// Which read path produced a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSource {
    /// sTEA `balanceOf` for every holder on the treasury board.
    DirectStea,
    /// Treasury `stakedBalances` for the first holders on the board.
    StakedBalances,
    /// The treasury's own `leaderboard()` arrays.
    Contract,
}

impl LeaderboardSource {
    /// A short label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectStea => "direct_stea",
            Self::StakedBalances => "staked_balances",
            Self::Contract => "contract",
        }
    }
}

impl fmt::Display for LeaderboardSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DirectStea => "sTEA balances",
            Self::StakedBalances => "treasury staked balances",
            Self::Contract => "treasury leaderboard",
        };
        f.write_str(s)
    }
}

/// A leaderboard together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardSnapshot {
    /// The path that produced the rows.
    pub source: LeaderboardSource,
    /// The rows.
    pub board: Leaderboard,
}

/// The state-changing contract methods the client submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// `deposit()` payable.
    Deposit,
    /// `withdraw(uint256)`.
    Withdraw,
    /// `stake(uint256)`.
    Stake,
    /// `unstake(uint256)`.
    Unstake,
    /// `createProposal(string)`.
    CreateProposal,
    /// `vote(uint256)`.
    Vote,
    /// `closeProposal(uint256)`.
    CloseProposal,
}

impl ActionKind {
    /// The contract method name.
    pub fn method_name(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
            Self::CreateProposal => "createProposal",
            Self::Vote => "vote",
            Self::CloseProposal => "closeProposal",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Stake => "stake",
            Self::Unstake => "unstake",
            Self::CreateProposal => "proposal",
            Self::Vote => "vote",
            Self::CloseProposal => "close proposal",
        };
        f.write_str(s)
    }
}

/// A submitted transaction whose receipt has not been seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    /// Transaction hash returned by the wallet.
    pub hash: B256,
    /// What the transaction does.
    pub kind: ActionKind,
    /// When it was handed to the wallet.
    pub submitted_at: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[test]
    fn duplicates_keep_maximum() {
        let board = Leaderboard::from_observations([
            (addr(1), U256::from(5)),
            (addr(2), U256::from(7)),
            (addr(1), U256::from(9)),
            (addr(1), U256::from(3)),
        ]);
        assert_eq!(board.addresses(), vec![addr(1), addr(2)]);
        assert_eq!(board.amounts(), vec![U256::from(9), U256::from(7)]);
    }

    #[test]
    fn sort_is_numeric_not_lexical() {
        let big = U256::from(10).pow(U256::from(30));
        let board = Leaderboard::from_observations([
            (addr(1), U256::from(9)),
            (addr(2), big),
            (addr(3), U256::from(100)),
        ]);
        assert_eq!(board.addresses(), vec![addr(2), addr(3), addr(1)]);
        assert_eq!(board.rank_of(addr(1)), Some(3));
        assert_eq!(board.rank_of(addr(4)), None);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let board = Leaderboard::from_observations([
            (addr(3), U256::from(1)),
            (addr(1), U256::from(1)),
            (addr(2), U256::from(1)),
        ]);
        assert_eq!(board.addresses(), vec![addr(3), addr(1), addr(2)]);
    }

    #[test]
    fn empty_board() {
        let board = Leaderboard::from_observations(Vec::new());
        assert!(board.is_empty());
        assert_eq!(board.len(), 0);
    }

    #[test]
    fn method_names_match_the_abi() {
        assert_eq!(ActionKind::CreateProposal.method_name(), "createProposal");
        assert_eq!(ActionKind::CloseProposal.method_name(), "closeProposal");
        assert_eq!(LeaderboardSource::DirectStea.as_str(), "direct_stea");
    }
}
