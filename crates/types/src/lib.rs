// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Tea Staking Types
//!
//! The foundational library for the Tea staking client, containing the data
//! structures mirrored from the treasury and sTEA contracts, the error enums
//! shared by every crate, and the TOML configuration model.
//!
//! ## Architectural Role
//!
//! As the base crate, `tea-types` has no networking or runtime dependencies
//! and is a dependency of every other crate in the workspace.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ClientError> = std::result::Result<T, E>;

/// Domain data structures: proposals, balances, leaderboards and transactions.
pub mod app;
/// Configuration structures loaded from `tea.toml`.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Display helpers for addresses, token amounts and large numbers.
pub mod format;
/// Page arithmetic and page-number strips for list views.
pub mod page;

pub use alloy_primitives::{Address, B256, U256};
