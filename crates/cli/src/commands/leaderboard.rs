// Path: crates/cli/src/commands/leaderboard.rs

use super::GlobalArgs;
use crate::util::render_leaderboard;
use anyhow::Result;
use clap::Parser;
use serde_json::json;
use std::time::Duration;
use tea_client::leaderboard::refresh_leaderboard;
use tea_client::Session;

#[derive(Parser, Debug)]
pub struct LeaderboardArgs {
    /// Page to show.
    #[clap(long, default_value = "1")]
    pub page: usize,

    /// Keep refreshing until interrupted.
    #[clap(long)]
    pub watch: bool,

    /// Print the full board as JSON.
    #[clap(long, conflicts_with = "watch")]
    pub json: bool,
}

async fn show(session: &Session, args: &LeaderboardArgs) -> Result<()> {
    let cfg = &session.config().leaderboard;
    let snapshot = refresh_leaderboard(session.reader(), cfg).await;
    if args.json {
        let rows: Vec<_> = snapshot
            .board
            .entries()
            .iter()
            .map(|e| json!({ "address": e.address, "amount": e.amount.to_string() }))
            .collect();
        let out = json!({ "source": snapshot.source.as_str(), "entries": rows });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    let you = session.account().await.ok().flatten();
    print!("{}", render_leaderboard(&snapshot, args.page, cfg.per_page, you));
    Ok(())
}

pub async fn run(args: LeaderboardArgs, global: GlobalArgs) -> Result<()> {
    let session = global.session()?;
    show(&session, &args).await?;
    if !args.watch {
        return Ok(());
    }

    let every = Duration::from_secs(session.config().leaderboard.auto_refresh_secs.max(1));
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                println!();
                show(&session, &args).await?;
            }
            _ = tokio::signal::ctrl_c() => {
                return Ok(());
            }
        }
    }
}
