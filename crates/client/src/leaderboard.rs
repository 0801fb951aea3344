// Path: crates/client/src/leaderboard.rs
//! Leaderboard aggregation.
//!
//! Holder addresses come from the treasury's `leaderboard()`. Their balances
//! are looked up in bounded, rate-limited batches from the richest source
//! available, falling back to cheaper sources when one yields nothing and to
//! the treasury's own arrays when the whole refresh runs past its deadline.

use crate::contracts::ContractReader;
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;
use tea_telemetry::leaderboard_metrics;
use tea_types::{
    app::{Leaderboard, LeaderboardSnapshot, LeaderboardSource},
    config::LeaderboardConfig,
    error::ClientError,
};
use tokio::time::{sleep, timeout, Instant};

/// A per-address balance query.
#[async_trait]
pub trait BalanceLookup: Send + Sync {
    async fn balance_of(&self, account: Address) -> Result<U256, ClientError>;
}

/// sTEA `balanceOf`.
pub struct SteaBalances<'a>(pub &'a dyn ContractReader);

#[async_trait]
impl BalanceLookup for SteaBalances<'_> {
    async fn balance_of(&self, account: Address) -> Result<U256, ClientError> {
        self.0.stea_balance_of(account).await
    }
}

/// Treasury `stakedBalances`.
pub struct StakedBalances<'a>(pub &'a dyn ContractReader);

#[async_trait]
impl BalanceLookup for StakedBalances<'_> {
    async fn balance_of(&self, account: Address) -> Result<U256, ClientError> {
        self.0.staked_balance_of(account).await
    }
}

/// How a list of addresses is walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    /// Lookups in flight at once.
    pub batch_size: usize,
    /// Bound on each lookup.
    pub lookup_timeout: Duration,
    /// Pause between batches.
    pub batch_delay: Duration,
    /// Only the first this-many raw addresses are considered.
    pub max_addresses: Option<usize>,
}

impl BatchPlan {
    /// The plan for sTEA lookups.
    pub fn direct(cfg: &LeaderboardConfig) -> Self {
        Self {
            batch_size: cfg.direct_batch_size,
            lookup_timeout: Duration::from_millis(cfg.lookup_timeout_ms),
            batch_delay: Duration::from_millis(cfg.batch_delay_ms),
            max_addresses: None,
        }
    }

    /// The plan for treasury `stakedBalances` lookups.
    pub fn staked(cfg: &LeaderboardConfig) -> Self {
        Self {
            batch_size: cfg.staked_batch_size,
            lookup_timeout: Duration::from_millis(cfg.lookup_timeout_ms),
            batch_delay: Duration::from_millis(cfg.batch_delay_ms),
            max_addresses: Some(cfg.staked_max_addresses),
        }
    }
}

async fn lookup_one(
    lookup: &dyn BalanceLookup,
    account: Address,
    limit: Duration,
) -> Option<(Address, U256)> {
    match timeout(limit, lookup.balance_of(account)).await {
        Ok(Ok(balance)) if !balance.is_zero() => Some((account, balance)),
        Ok(Ok(_)) => None,
        Ok(Err(e)) => {
            tracing::debug!(target: "leaderboard", %account, error = %e, "balance lookup failed");
            leaderboard_metrics().inc_lookup_dropped("error");
            None
        }
        Err(_) => {
            tracing::warn!(target: "leaderboard", %account, "timeout fetching balance");
            leaderboard_metrics().inc_lookup_dropped("timeout");
            None
        }
    }
}

/// Looks up every address and returns the non-zero balances as a board.
///
/// Lookups that fail, time out or return zero are left off the board.
pub async fn collect_balances(
    addresses: &[Address],
    lookup: &dyn BalanceLookup,
    plan: &BatchPlan,
) -> Leaderboard {
    let considered = plan.max_addresses.unwrap_or(addresses.len());
    let mut seen = HashSet::new();
    let unique: Vec<Address> = addresses
        .iter()
        .take(considered)
        .copied()
        .filter(|a| seen.insert(*a))
        .collect();

    let batches: Vec<&[Address]> = unique.chunks(plan.batch_size.max(1)).collect();
    let total = batches.len();
    let mut observations = Vec::with_capacity(unique.len());

    for (i, batch) in batches.into_iter().enumerate() {
        tracing::debug!(target: "leaderboard", batch = i + 1, total, "processing batch");
        let results = join_all(
            batch
                .iter()
                .map(|&account| lookup_one(lookup, account, plan.lookup_timeout)),
        )
        .await;
        observations.extend(results.into_iter().flatten());

        if i + 1 < total && !plan.batch_delay.is_zero() {
            sleep(plan.batch_delay).await;
        }
    }

    Leaderboard::from_observations(observations)
}

/// The treasury's arrays as a board; `None` if their lengths disagree.
pub fn contract_board(addresses: Vec<Address>, amounts: Vec<U256>) -> Option<Leaderboard> {
    if addresses.len() != amounts.len() {
        return None;
    }
    Some(Leaderboard::from_observations(addresses.into_iter().zip(amounts)))
}

async fn read_raw(reader: &dyn ContractReader) -> Option<(Vec<Address>, Vec<U256>)> {
    if !reader.connected().await {
        tracing::warn!(target: "leaderboard", "network connectivity issues, leaderboard unavailable");
        return None;
    }
    match reader.leaderboard().await {
        Ok(raw) => Some(raw),
        Err(e) => {
            tracing::error!(target: "leaderboard", error = %e, "error reading treasury leaderboard");
            None
        }
    }
}

/// The treasury's own board, without any balance lookups.
pub async fn contract_leaderboard(reader: &dyn ContractReader) -> Leaderboard {
    let Some((addresses, amounts)) = read_raw(reader).await else {
        return Leaderboard::default();
    };
    contract_board(addresses, amounts).unwrap_or_else(|| {
        tracing::error!(target: "leaderboard", "invalid leaderboard data format");
        Leaderboard::default()
    })
}

/// Tries each source in turn until one yields rows.
pub async fn fetch_with_fallback(reader: &dyn ContractReader, cfg: &LeaderboardConfig) -> LeaderboardSnapshot {
    let snapshot = |source, board| LeaderboardSnapshot { source, board };

    let Some((addresses, amounts)) = read_raw(reader).await else {
        return snapshot(LeaderboardSource::Contract, Leaderboard::default());
    };
    if addresses.len() != amounts.len() {
        tracing::error!(target: "leaderboard", "invalid leaderboard data format");
        return snapshot(LeaderboardSource::Contract, Leaderboard::default());
    }

    let direct = collect_balances(&addresses, &SteaBalances(reader), &BatchPlan::direct(cfg)).await;
    if !direct.is_empty() {
        return snapshot(LeaderboardSource::DirectStea, direct);
    }
    tracing::info!(target: "leaderboard", "no sTEA balances, falling back to treasury staked balances");

    let staked = collect_balances(&addresses, &StakedBalances(reader), &BatchPlan::staked(cfg)).await;
    if !staked.is_empty() {
        return snapshot(LeaderboardSource::StakedBalances, staked);
    }
    tracing::info!(target: "leaderboard", "no staked balances, using treasury leaderboard");

    let board = contract_board(addresses, amounts).unwrap_or_default();
    snapshot(LeaderboardSource::Contract, board)
}

/// Refreshes the board under the configured deadline.
///
/// Past the deadline the in-flight lookups are abandoned and the treasury's
/// own board is returned instead.
pub async fn refresh_leaderboard(reader: &dyn ContractReader, cfg: &LeaderboardConfig) -> LeaderboardSnapshot {
    let started = Instant::now();
    let deadline = Duration::from_millis(cfg.refresh_deadline_ms);

    let refresh = async {
        match timeout(deadline, fetch_with_fallback(reader, cfg)).await {
            Ok(snapshot) => snapshot,
            Err(_) => {
                tracing::warn!(target: "leaderboard", ?deadline, "leaderboard refresh timed out, using treasury leaderboard");
                LeaderboardSnapshot {
                    source: LeaderboardSource::Contract,
                    board: contract_leaderboard(reader).await,
                }
            }
        }
    };
    let snapshot = warn_if_slow(refresh, Duration::from_millis(cfg.slow_refresh_warn_ms), |after| {
        tracing::warn!(target: "leaderboard", ?after, "leaderboard refresh is taking longer than expected");
    })
    .await;

    let elapsed = started.elapsed();
    leaderboard_metrics().inc_refresh(snapshot.source.as_str());
    leaderboard_metrics().observe_refresh_duration(elapsed.as_secs_f64());
    tracing::info!(
        target: "leaderboard",
        source = snapshot.source.as_str(),
        rows = snapshot.board.len(),
        "leaderboard refreshed"
    );
    snapshot
}

/// Drives `fut` to completion, calling `on_slow` once if it is still running
/// after `after`.
async fn warn_if_slow<F, S>(fut: F, after: Duration, on_slow: S) -> F::Output
where
    F: Future,
    S: FnOnce(Duration),
{
    tokio::pin!(fut);
    tokio::select! {
        out = &mut fut => return out,
        _ = sleep(after) => on_slow(after),
    }
    fut.await
}

/// True if `row` is the connected account.
pub fn is_you(row: Address, account: Option<Address>) -> bool {
    account == Some(row)
}
