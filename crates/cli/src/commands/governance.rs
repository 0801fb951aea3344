// Path: crates/cli/src/commands/governance.rs

use super::{action::submit, GlobalArgs};
use crate::util::render_proposals;
use alloy_primitives::U256;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tea_client::{
    actions::Action,
    proposals::{can_vote, get_proposals, newest_first},
    ContractReader, Session,
};

#[derive(Parser, Debug)]
pub struct GovernanceArgs {
    #[clap(subcommand)]
    pub command: GovernanceCommands,
}

#[derive(Subcommand, Debug)]
pub enum GovernanceCommands {
    /// List proposals, newest first.
    List {
        /// Page to show.
        #[clap(long, default_value = "1")]
        page: usize,
        /// Print the proposals as JSON.
        #[clap(long)]
        json: bool,
    },
    /// Open a new proposal.
    Create {
        /// What the proposal is about.
        description: String,
        #[clap(long)]
        wait: bool,
    },
    /// Vote for a proposal.
    Vote {
        id: u64,
        #[clap(long)]
        wait: bool,
    },
    /// Close a proposal.
    Close {
        id: u64,
        #[clap(long)]
        wait: bool,
    },
}

/// Whether the connected account has voted; an unreachable wallet counts as no account.
async fn voted(session: &Session) -> bool {
    match session.account().await.ok().flatten() {
        Some(a) => session.reader().has_voted(a).await.unwrap_or(false),
        None => false,
    }
}

pub async fn run(args: GovernanceArgs, global: GlobalArgs) -> Result<()> {
    match args.command {
        GovernanceCommands::List { page, json } => {
            let session = global.session()?;
            let cfg = &session.config().governance;
            let proposals = newest_first(
                get_proposals(session.reader(), cfg.max_proposals, cfg.batch_size).await,
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&proposals)?);
                return Ok(());
            }
            let has_voted = voted(&session).await;
            print!("{}", render_proposals(&proposals, page, cfg.per_page, has_voted));
        }
        GovernanceCommands::Create { description, wait } => {
            let action = Action::create_proposal(&description)?;
            submit(&global.session()?, action, wait).await?;
        }
        GovernanceCommands::Vote { id, wait } => {
            let session = global.session()?;
            let proposal = session
                .reader()
                .proposal(id)
                .await
                .with_context(|| format!("Proposal #{id} not found"))?;
            let has_voted = voted(&session).await;
            if !can_vote(&proposal, has_voted) {
                if proposal.active {
                    bail!("You have already voted.");
                }
                bail!("Proposal #{id} is closed.");
            }
            submit(&session, Action::Vote(U256::from(id)), wait).await?;
        }
        GovernanceCommands::Close { id, wait } => {
            submit(&global.session()?, Action::CloseProposal(U256::from(id)), wait).await?;
        }
    }
    Ok(())
}
