// Path: crates/cli/src/commands/tx.rs

use super::GlobalArgs;
use crate::util::watch_pending;
use alloy_primitives::B256;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Instant;
use tea_types::{
    app::{ActionKind, PendingTransaction},
    format::format_token,
};

#[derive(Parser, Debug)]
pub struct TxArgs {
    #[clap(subcommand)]
    pub command: TxCommands,
}

#[derive(Subcommand, Debug)]
pub enum TxCommands {
    /// Poll until the given transactions are confirmed.
    Watch {
        /// Transaction hashes.
        #[clap(required = true)]
        hashes: Vec<B256>,
        /// What the transactions were, for the confirmation message.
        #[clap(long, value_enum, default_value = "stake")]
        kind: KindArg,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    Deposit,
    Withdraw,
    Stake,
    Unstake,
    CreateProposal,
    Vote,
    CloseProposal,
}

impl From<KindArg> for ActionKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Deposit => ActionKind::Deposit,
            KindArg::Withdraw => ActionKind::Withdraw,
            KindArg::Stake => ActionKind::Stake,
            KindArg::Unstake => ActionKind::Unstake,
            KindArg::CreateProposal => ActionKind::CreateProposal,
            KindArg::Vote => ActionKind::Vote,
            KindArg::CloseProposal => ActionKind::CloseProposal,
        }
    }
}

pub async fn run(args: TxArgs, global: GlobalArgs) -> Result<()> {
    match args.command {
        TxCommands::Watch { hashes, kind } => {
            let session = global.session()?;
            let now = Instant::now();
            let txs = hashes
                .into_iter()
                .map(|hash| PendingTransaction {
                    hash,
                    kind: kind.into(),
                    submitted_at: now,
                })
                .collect();
            watch_pending(&session, txs).await?;

            if let Some(account) = session.account().await.ok().flatten() {
                let view = session.dashboard(account).await;
                println!(
                    "Balances: deposited {} TEA, staked {} TEA, sTEA {}",
                    format_token(view.balances.balance),
                    format_token(view.balances.staked_balance),
                    format_token(view.stea_balance)
                );
            }
        }
    }
    Ok(())
}
