// Path: crates/cli/src/commands/connect.rs

use super::GlobalArgs;
use crate::util::network_alert;
use anyhow::{Context, Result};
use clap::Parser;
use tea_client::wallet::{connect, current_account};
use tea_types::format::short_address;

#[derive(Parser, Debug)]
pub struct ConnectArgs {
    /// Only report an already-connected account; never prompt the wallet.
    #[clap(long)]
    pub no_prompt: bool,
}

pub async fn run(args: ConnectArgs, global: GlobalArgs) -> Result<()> {
    let session = global.session()?;
    let wallet = session.wallet()?;

    let account = if args.no_prompt {
        current_account(wallet).await?
    } else {
        Some(connect(wallet).await.context("Failed to connect wallet")?)
    };

    match account {
        Some(a) => println!("✅ Connected: {} ({})", short_address(&a), a),
        None => println!("No account connected. Run `tea connect` to connect your wallet."),
    }
    network_alert(&session).await;
    Ok(())
}
