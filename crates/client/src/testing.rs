// Path: crates/client/src/testing.rs
//! An in-memory [`ContractReader`] for unit tests.

use crate::contracts::ContractReader;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tea_types::{
    app::Proposal,
    error::{ClientError, RpcError},
};

fn reverted() -> ClientError {
    ClientError::Rpc(RpcError::Rpc {
        code: 3,
        message: "execution reverted".into(),
        data: None,
    })
}

/// Contract state held in maps. Unknown accounts read as zero, like storage.
pub struct MockReader {
    connected: bool,
    board: Option<(Vec<Address>, Vec<U256>)>,
    stea: HashMap<Address, U256>,
    staked: HashMap<Address, U256>,
    balances: HashMap<Address, U256>,
    native: HashMap<Address, U256>,
    total_staked: U256,
    voted: HashSet<Address>,
    proposals: Vec<Option<Proposal>>,
    stea_fails: bool,
    failing: HashSet<Address>,
    delays: HashMap<Address, Duration>,
    lookup_delay: Duration,
    pub stea_calls: AtomicUsize,
    pub staked_calls: AtomicUsize,
    pub proposal_calls: AtomicUsize,
}

impl Default for MockReader {
    fn default() -> Self {
        Self {
            connected: true,
            board: Some((Vec::new(), Vec::new())),
            stea: HashMap::new(),
            staked: HashMap::new(),
            balances: HashMap::new(),
            native: HashMap::new(),
            total_staked: U256::ZERO,
            voted: HashSet::new(),
            proposals: Vec::new(),
            stea_fails: false,
            failing: HashSet::new(),
            delays: HashMap::new(),
            lookup_delay: Duration::ZERO,
            stea_calls: AtomicUsize::new(0),
            staked_calls: AtomicUsize::new(0),
            proposal_calls: AtomicUsize::new(0),
        }
    }
}

impl MockReader {
    /// The provider reports no connectivity.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// The treasury `leaderboard()` arrays.
    pub fn with_board(mut self, addresses: Vec<Address>, amounts: Vec<U256>) -> Self {
        self.board = Some((addresses, amounts));
        self
    }

    /// `leaderboard()` reverts.
    pub fn failing_board(mut self) -> Self {
        self.board = None;
        self
    }

    /// sTEA `balanceOf(account)`.
    pub fn with_stea(mut self, account: Address, amount: U256) -> Self {
        self.stea.insert(account, amount);
        self
    }

    /// Treasury `stakedBalances(account)`.
    pub fn with_staked(mut self, account: Address, amount: U256) -> Self {
        self.staked.insert(account, amount);
        self
    }

    /// Treasury `balances(account)`.
    pub fn with_balance(mut self, account: Address, amount: U256) -> Self {
        self.balances.insert(account, amount);
        self
    }

    /// Native TEA held by `account`.
    pub fn with_native(mut self, account: Address, amount: U256) -> Self {
        self.native.insert(account, amount);
        self
    }

    /// Treasury `totalStaked()`.
    pub fn with_total_staked(mut self, amount: U256) -> Self {
        self.total_staked = amount;
        self
    }

    /// `hasVoted(account)` is true.
    pub fn with_vote(mut self, account: Address) -> Self {
        self.voted.insert(account);
        self
    }

    /// Appends a proposal slot; `None` makes that index revert.
    pub fn with_proposal(mut self, description: Option<&str>) -> Self {
        let id = self.proposals.len() as u64;
        self.proposals.push(description.map(|d| Proposal {
            id,
            description: d.to_string(),
            vote_count: U256::from(id),
            active: id % 2 == 0,
        }));
        self
    }

    /// Every sTEA `balanceOf` reverts.
    pub fn failing_stea(mut self) -> Self {
        self.stea_fails = true;
        self
    }

    /// Balance lookups for `account` fail.
    pub fn failing_lookup(mut self, account: Address) -> Self {
        self.failing.insert(account);
        self
    }

    /// Balance lookups for `account` take `delay`.
    pub fn slow_lookup(mut self, account: Address, delay: Duration) -> Self {
        self.delays.insert(account, delay);
        self
    }

    /// Every balance lookup takes `delay`.
    pub fn lookup_delay(mut self, delay: Duration) -> Self {
        self.lookup_delay = delay;
        self
    }

    async fn lookup(&self, map: &HashMap<Address, U256>, account: Address) -> Result<U256, ClientError> {
        let delay = self.delays.get(&account).copied().unwrap_or(self.lookup_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&account) {
            return Err(reverted());
        }
        Ok(map.get(&account).copied().unwrap_or_default())
    }
}

#[async_trait]
impl ContractReader for MockReader {
    async fn connected(&self) -> bool {
        self.connected
    }

    async fn leaderboard(&self) -> Result<(Vec<Address>, Vec<U256>), ClientError> {
        self.board.clone().ok_or_else(reverted)
    }

    async fn stea_balance_of(&self, account: Address) -> Result<U256, ClientError> {
        self.stea_calls.fetch_add(1, Ordering::SeqCst);
        if self.stea_fails {
            return Err(reverted());
        }
        self.lookup(&self.stea, account).await
    }

    async fn staked_balance_of(&self, account: Address) -> Result<U256, ClientError> {
        self.staked_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(&self.staked, account).await
    }

    async fn balance_of(&self, account: Address) -> Result<U256, ClientError> {
        Ok(self.balances.get(&account).copied().unwrap_or_default())
    }

    async fn total_staked(&self) -> Result<U256, ClientError> {
        Ok(self.total_staked)
    }

    async fn has_voted(&self, account: Address) -> Result<bool, ClientError> {
        Ok(self.voted.contains(&account))
    }

    async fn proposal(&self, index: u64) -> Result<Proposal, ClientError> {
        self.proposal_calls.fetch_add(1, Ordering::SeqCst);
        self.proposals
            .get(index as usize)
            .cloned()
            .flatten()
            .ok_or_else(reverted)
    }

    async fn native_balance(&self, account: Address) -> Result<U256, ClientError> {
        Ok(self.native.get(&account).copied().unwrap_or_default())
    }
}
