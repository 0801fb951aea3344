// Path: crates/client/src/lib.rs
//! # Tea Client Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free code. Panics are disallowed in non-test code to promote
//! robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Tea Client
//!
//! Talks to the Tea Sepolia treasury and sTEA contracts: a JSON-RPC read
//! provider with retries and failover, a wallet seam for signing, contract
//! reads that degrade to zero instead of failing, action submission with gas
//! fallbacks, and the batched leaderboard aggregation.

pub mod actions;
pub mod balances;
pub mod contracts;
pub mod gas;
pub mod leaderboard;
pub mod network;
pub mod pending;
pub mod proposals;
pub mod rpc;
pub mod session;
pub mod wallet;

#[cfg(test)]
mod testing;

// Re-export for convenience
pub use contracts::{ContractReader, RpcContracts};
pub use rpc::RpcClient;
pub use session::Session;
pub use wallet::{RpcWallet, Wallet, WalletExt};
