// Path: crates/client/src/proposals.rs
//! Governance proposal scan.
//!
//! The treasury exposes proposals only by index, with no count. Indices are
//! probed in concurrent batches until a batch comes back with nothing.

use crate::contracts::ContractReader;
use futures::future::join_all;
use tea_types::app::Proposal;

/// Reads up to `max` proposals, `batch_size` indices at a time.
///
/// An index whose read fails is skipped. The scan ends after the first batch
/// without a single readable proposal. Never fails; an unreachable provider
/// just yields fewer (or no) proposals.
pub async fn get_proposals(reader: &dyn ContractReader, max: usize, batch_size: usize) -> Vec<Proposal> {
    if !reader.connected().await {
        tracing::warn!(target: "proposals", "network connectivity issues, proposals may not load");
    }
    let batch_size = batch_size.max(1);
    let mut out = Vec::new();

    for start in (0..max).step_by(batch_size) {
        let end = (start + batch_size).min(max);
        let reads = (start..end).map(|i| async move {
            match reader.proposal(i as u64).await {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::trace!(target: "proposals", index = i, error = %e, "no proposal");
                    None
                }
            }
        });
        let found: Vec<Proposal> = join_all(reads).await.into_iter().flatten().collect();
        if found.is_empty() {
            break;
        }
        out.extend(found);
    }

    tracing::debug!(target: "proposals", count = out.len(), "proposals loaded");
    out
}

/// Sorts newest (highest id) first.
pub fn newest_first(mut proposals: Vec<Proposal>) -> Vec<Proposal> {
    proposals.sort_by(|a, b| b.id.cmp(&a.id));
    proposals
}

/// Whether `account` may still vote on `proposal`.
pub fn can_vote(proposal: &Proposal, has_voted: bool) -> bool {
    proposal.active && !has_voted
}
