// Path: crates/cli/src/commands/network.rs

use super::GlobalArgs;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tea_client::{
    network::{check_correct_network, status_of, switch_network},
    WalletExt,
};

#[derive(Parser, Debug)]
pub struct NetworkArgs {
    #[clap(subcommand)]
    pub command: NetworkCommands,
}

#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// Check the read provider and the wallet's chain.
    Check,
    /// Ask the wallet to switch to the configured network, adding it if needed.
    Switch,
}

pub async fn run(args: NetworkArgs, global: GlobalArgs) -> Result<()> {
    let session = global.session()?;
    let params = &session.config().network;

    match args.command {
        NetworkCommands::Check => {
            let reachable = tea_client::network::check_connectivity(session.contracts().rpc()).await;
            println!("Read provider: {}", status_of(reachable));
            match session.wallet_opt() {
                None => println!("Wallet: not configured"),
                Some(wallet) => {
                    if check_correct_network(wallet, params).await {
                        println!("✅ Wallet is on {}", params.chain_name);
                    } else {
                        let actual = wallet.chain_id().await.unwrap_or_else(|_| "unknown".into());
                        println!("⚠️  Wrong network detected (wallet chain {actual}).");
                        println!(
                            "   Please switch to {} ({}). Run `tea network switch`.",
                            params.chain_name,
                            params.chain_id_hex()
                        );
                    }
                }
            }
        }
        NetworkCommands::Switch => {
            let wallet = session.wallet()?;
            switch_network(wallet, params)
                .await
                .context("Network switch failed")?;
            println!("✅ Switched to {}", params.chain_name);
        }
    }
    Ok(())
}
