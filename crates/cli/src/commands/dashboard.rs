// Path: crates/cli/src/commands/dashboard.rs

use super::GlobalArgs;
use crate::util::network_alert;
use anyhow::{bail, Result};
use clap::Parser;
use serde_json::json;
use tea_types::format::{format_token, short_address};

#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Print the balances as JSON.
    #[clap(long)]
    pub json: bool,
}

pub async fn run(args: DashboardArgs, global: GlobalArgs) -> Result<()> {
    let session = global.session()?;
    let Some(account) = session.account().await? else {
        bail!("No account connected. Run `tea connect` or pass --account.");
    };
    let view = session.dashboard(account).await;

    if args.json {
        let out = json!({
            "account": view.account,
            "native_balance": view.native_balance.to_string(),
            "stea_balance": view.stea_balance.to_string(),
            "balances": view.balances,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let b = &view.balances;
    println!("Account {}", short_address(&view.account));
    println!("  Wallet balance:   {:>12} TEA", format_token(view.native_balance));
    println!("  Deposited:        {:>12} TEA", format_token(b.balance));
    println!("  Staked:           {:>12} TEA", format_token(b.staked_balance));
    println!("  sTEA balance:     {:>12} sTEA", format_token(view.stea_balance));
    println!("  Total staked:     {:>12} TEA", format_token(b.total_staked));
    println!(
        "  Governance:       {}",
        if b.has_voted { "voted" } else { "not voted yet" }
    );
    network_alert(&session).await;
    Ok(())
}
