// Path: crates/cli/src/lib.rs
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

//! # Tea CLI Library
//!
//! The subcommands behind the `tea` binary. Each command module owns its
//! `clap` arguments and a `run` function; none of them contain contract or
//! transport logic, which lives in `tea-client`.

pub mod commands;
pub mod util;

pub use commands::GlobalArgs;
