// Path: crates/client/src/pending.rs
//! Tracks submitted transactions until their receipts appear.

use crate::rpc::{RpcClient, TransactionReceipt};
use crate::wallet::{Wallet, WalletExt};
use alloy_primitives::B256;
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tea_types::{
    app::{ActionKind, PendingTransaction},
    error::RpcError,
};

/// Anything that can look up a transaction receipt.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    /// `None` while the transaction is pending.
    async fn receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, RpcError>;
}

#[async_trait]
impl ReceiptSource for RpcClient {
    async fn receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, RpcError> {
        self.get_transaction_receipt(hash).await
    }
}

#[async_trait]
impl<W: Wallet + ?Sized> ReceiptSource for W {
    async fn receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>, RpcError> {
        self.transaction_receipt(hash).await
    }
}

/// What one poll learned about a tracked transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingUpdate {
    /// A receipt was found; the transaction is no longer tracked.
    Confirmed {
        hash: B256,
        kind: ActionKind,
        success: bool,
    },
    /// Still no receipt after the stall threshold; still tracked.
    Stalled {
        hash: B256,
        kind: ActionKind,
        minutes: u64,
    },
}

/// Submitted transactions awaiting receipts.
#[derive(Debug)]
pub struct PendingTracker {
    txs: Vec<PendingTransaction>,
    stall_after: Duration,
}

impl PendingTracker {
    /// An empty tracker that reports transactions older than `stall_after`.
    pub fn new(stall_after: Duration) -> Self {
        Self {
            txs: Vec::new(),
            stall_after,
        }
    }

    /// Starts tracking `tx`; a hash already tracked is ignored.
    pub fn track(&mut self, tx: PendingTransaction) {
        if !self.txs.iter().any(|t| t.hash == tx.hash) {
            self.txs.push(tx);
        }
    }

    /// Transactions still awaiting a receipt.
    pub fn pending(&self) -> &[PendingTransaction] {
        &self.txs
    }

    /// True once every tracked transaction has confirmed.
    pub fn is_empty(&self) -> bool {
        self.txs.is_empty()
    }

    /// Checks every tracked transaction once, as of `now`.
    ///
    /// Confirmed transactions are dropped. A failed receipt lookup leaves the
    /// transaction tracked and reports nothing.
    pub async fn poll(&mut self, source: &dyn ReceiptSource, now: Instant) -> Vec<PendingUpdate> {
        let mut updates = Vec::new();
        let mut still_pending = Vec::with_capacity(self.txs.len());

        for tx in self.txs.drain(..) {
            match source.receipt(tx.hash).await {
                Ok(Some(receipt)) => {
                    let success = receipt.succeeded();
                    tracing::info!(target: "pending", hash = %tx.hash, kind = %tx.kind, success, "transaction confirmed");
                    updates.push(PendingUpdate::Confirmed {
                        hash: tx.hash,
                        kind: tx.kind,
                        success,
                    });
                }
                Ok(None) => {
                    let age = now.saturating_duration_since(tx.submitted_at);
                    if age > self.stall_after {
                        let minutes = age.as_secs() / 60;
                        tracing::warn!(target: "pending", hash = %tx.hash, minutes, "transaction pending for a long time");
                        updates.push(PendingUpdate::Stalled {
                            hash: tx.hash,
                            kind: tx.kind,
                            minutes,
                        });
                    }
                    still_pending.push(tx);
                }
                Err(e) => {
                    tracing::error!(target: "pending", hash = %tx.hash, error = %e, "error checking transaction");
                    still_pending.push(tx);
                }
            }
        }

        self.txs = still_pending;
        updates
    }
}
