// Path: crates/cli/src/main.rs
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

//! # Tea CLI
//!
//! A terminal dashboard for the Tea Sepolia staking treasury.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tea_cli::commands::*;
use tea_telemetry::init::{init_tracing, LogFormat};
use tea_types::app::ActionKind;

#[derive(Parser, Debug)]
#[clap(
    name = "tea",
    version,
    about = "Stake, vote and track the Tea Sepolia treasury from the terminal.",
    long_about = "Reads balances, proposals and the sTEA leaderboard from the Tea Sepolia network and submits treasury transactions through a JSON-RPC wallet."
)]
struct Cli {
    #[clap(flatten)]
    global: GlobalArgs,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // --- Overview ---
    /// Show network, contract and wallet status.
    Status(status::StatusArgs),

    /// Check or switch the wallet's network.
    Network(network::NetworkArgs),

    /// Connect the wallet and show the active account.
    Connect(connect::ConnectArgs),

    /// Show balances for the connected account.
    Dashboard(dashboard::DashboardArgs),

    // --- Treasury actions ---
    /// Deposit TEA into the treasury.
    Deposit(action::AmountArgs),

    /// Withdraw deposited TEA.
    Withdraw(action::AmountArgs),

    /// Stake deposited TEA for sTEA.
    Stake(action::AmountArgs),

    /// Unstake sTEA back to deposited TEA.
    Unstake(action::AmountArgs),

    // --- Governance and rankings ---
    /// List, create, vote on and close proposals.
    Governance(governance::GovernanceArgs),

    /// Show the sTEA holder leaderboard.
    Leaderboard(leaderboard::LeaderboardArgs),

    /// Track submitted transactions.
    Tx(tx::TxArgs),

    // --- Tools ---
    /// Generate or inspect tea.toml.
    Config(config::ConfigCmdArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let global = cli.global.clone();

    let format = if global.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(format, &global.log_level)?;
    tea_telemetry::prometheus::install()?;

    let result = match cli.command {
        // --- Overview ---
        Commands::Status(args) => status::run(args, global.clone()).await,
        Commands::Network(args) => network::run(args, global.clone()).await,
        Commands::Connect(args) => connect::run(args, global.clone()).await,
        Commands::Dashboard(args) => dashboard::run(args, global.clone()).await,

        // --- Treasury actions ---
        Commands::Deposit(args) => action::run(ActionKind::Deposit, args, global.clone()).await,
        Commands::Withdraw(args) => action::run(ActionKind::Withdraw, args, global.clone()).await,
        Commands::Stake(args) => action::run(ActionKind::Stake, args, global.clone()).await,
        Commands::Unstake(args) => action::run(ActionKind::Unstake, args, global.clone()).await,

        // --- Governance and rankings ---
        Commands::Governance(args) => governance::run(args, global.clone()).await,
        Commands::Leaderboard(args) => leaderboard::run(args, global.clone()).await,
        Commands::Tx(args) => tx::run(args, global.clone()).await,

        // --- Tools ---
        Commands::Config(args) => config::run(args),
    };

    if global.print_metrics {
        eprint!("{}", tea_telemetry::prometheus::gather_text()?);
    }
    result
}
