// Path: crates/cli/src/commands/status.rs

use super::GlobalArgs;
use crate::util::network_alert;
use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tea_client::{network::check_correct_network, ContractReader};
use tea_types::{
    app::NetworkStatus,
    format::{format_token, short_address},
};

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Print the report as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct StatusReport {
    network: NetworkStatus,
    chain_name: String,
    chain_id: u64,
    endpoint: String,
    block_number: Option<u64>,
    treasury: String,
    stea: String,
    total_staked: Option<String>,
    stea_total_supply: Option<String>,
    wallet_configured: bool,
    wallet_on_correct_network: Option<bool>,
}

pub async fn run(args: StatusArgs, global: GlobalArgs) -> Result<()> {
    let session = global.session()?;
    let cfg = session.config();
    let rpc = session.contracts().rpc();

    let block_number = rpc.block_number().await.ok();
    let network = if block_number.is_some() {
        NetworkStatus::Connected
    } else {
        NetworkStatus::Disconnected
    };
    let total_staked = match network {
        NetworkStatus::Connected => session.reader().total_staked().await.ok(),
        _ => None,
    };
    let token = match network {
        NetworkStatus::Connected => session.contracts().token_info().await.ok(),
        _ => None,
    };
    let wallet_on_correct_network = match session.wallet_opt() {
        Some(w) => Some(check_correct_network(w, &cfg.network).await),
        None => None,
    };

    let report = StatusReport {
        network,
        chain_name: cfg.network.chain_name.clone(),
        chain_id: cfg.network.chain_id,
        endpoint: rpc.current_endpoint().to_string(),
        block_number,
        treasury: cfg.contracts.treasury.to_checksum(None),
        stea: cfg.contracts.stea.to_checksum(None),
        total_staked: total_staked.map(format_token),
        stea_total_supply: token.as_ref().map(|t| format_token(t.total_supply)),
        wallet_configured: session.wallet_opt().is_some(),
        wallet_on_correct_network,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Network: {} ({})", report.chain_name, report.network);
    println!("  Chain ID: {}", report.chain_id);
    println!("  RPC: {}", report.endpoint);
    match report.block_number {
        Some(n) => println!("  Block: {n}"),
        None => println!("  Block: unavailable (check your connection)"),
    }
    println!("Contracts:");
    println!("  Treasury: {}", short_address(&cfg.contracts.treasury));
    match &token {
        Some(t) => println!(
            "  {} ({}): {}, supply {}",
            t.name,
            t.symbol,
            short_address(&cfg.contracts.stea),
            format_token(t.total_supply)
        ),
        None => println!("  sTEA: {}", short_address(&cfg.contracts.stea)),
    }
    if let Some(total) = &report.total_staked {
        println!("  Total staked: {total} TEA");
    }
    match report.wallet_on_correct_network {
        None => println!("Wallet: not configured (set --wallet or [wallet].endpoint)"),
        Some(true) => println!("Wallet: on {}", report.chain_name),
        Some(false) => println!("Wallet: wrong network"),
    }
    network_alert(&session).await;
    Ok(())
}
