// Path: crates/cli/src/commands/action.rs

use super::GlobalArgs;
use crate::util::watch_pending;
use anyhow::{anyhow, Result};
use clap::Parser;
use tea_client::{
    actions::{humanize_tx_error, Action},
    Session,
};
use tea_telemetry::error_metrics;
use tea_types::{
    app::{ActionKind, PendingTransaction},
    error::{ClientError, ErrorCode},
    format::titlecase,
};

#[derive(Parser, Debug)]
pub struct AmountArgs {
    /// Amount in TEA, e.g. `1.5`.
    pub amount: String,

    /// Wait for the receipt before exiting.
    #[clap(long)]
    pub wait: bool,
}

/// Submits `action` and reports the outcome the way every action does.
pub async fn submit(session: &Session, action: Action, wait: bool) -> Result<PendingTransaction> {
    let kind = action.kind();
    let submitter = session.submitter().map_err(|e| fail(kind, e))?;

    println!("Please confirm the {kind} transaction in your wallet...");
    let pending = submitter.submit(&action).await.map_err(|e| fail(kind, e))?;
    println!("Transaction submitted! Hash: {}", pending.hash);

    if wait {
        watch_pending(session, vec![pending.clone()]).await?;
    } else {
        println!("Track it with `tea tx watch {}`.", pending.hash);
    }
    Ok(pending)
}

fn fail(kind: ActionKind, err: ClientError) -> anyhow::Error {
    tracing::error!(target: "actions", %kind, code = err.code(), error = %err, "transaction error");
    error_metrics().inc_error("action", err.code());
    anyhow!(humanize_tx_error(kind, &err))
}

pub async fn run(kind: ActionKind, args: AmountArgs, global: GlobalArgs) -> Result<()> {
    let action = Action::with_amount(kind, &args.amount)?;
    submit(&global.session()?, action, args.wait).await?;
    if args.wait {
        println!("{} complete.", titlecase(kind.method_name()));
    }
    Ok(())
}
