// Path: crates/cli/src/util.rs
//! Terminal rendering shared by the commands.

use alloy_primitives::Address;
use std::fmt;
use std::time::{Duration, Instant};
use tea_client::{
    network::check_correct_network,
    pending::{PendingTracker, PendingUpdate},
    Session,
};
use tea_types::{
    app::{LeaderboardSnapshot, PendingTransaction, Proposal},
    format::{format_token, short_address, titlecase},
    page::{paginate, PageMarker},
};

/// Renders a page-number strip like `[1] 2 3 ... 10`.
pub fn render_strip(current: usize, markers: &[PageMarker]) -> String {
    markers
        .iter()
        .map(|m| match m {
            PageMarker::Number(n) if *n == current => format!("[{n}]"),
            PageMarker::Number(n) => n.to_string(),
            PageMarker::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders one page of the leaderboard, marking `you`.
pub fn render_leaderboard(
    snapshot: &LeaderboardSnapshot,
    page: usize,
    per_page: usize,
    you: Option<Address>,
) -> String {
    LeaderboardPage {
        snapshot,
        page,
        per_page,
        you,
    }
    .to_string()
}

struct LeaderboardPage<'a> {
    snapshot: &'a LeaderboardSnapshot,
    page: usize,
    per_page: usize,
    you: Option<Address>,
}

impl fmt::Display for LeaderboardPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.snapshot.board.entries();
        let p = paginate(entries.len(), self.page, self.per_page);
        writeln!(
            f,
            "🏆 Top sTEA holders ({}), page {}/{}",
            self.snapshot.source, p.page, p.total_pages
        )?;
        if entries.is_empty() {
            return writeln!(f, "  No stakers yet.");
        }
        for (i, e) in p.slice(entries).iter().enumerate() {
            let marker = if self.you == Some(e.address) { "  (You)" } else { "" };
            writeln!(
                f,
                "  {:>4}  {:<14}  {:>12} sTEA{}",
                p.rank(i),
                short_address(&e.address),
                format_token(e.amount),
                marker
            )?;
        }
        if p.total_pages > 1 {
            writeln!(f, "  Pages: {}", render_strip(p.page, &p.strip()))?;
        }
        Ok(())
    }
}

/// Renders one page of proposals, newest first.
pub fn render_proposals(proposals: &[Proposal], page: usize, per_page: usize, has_voted: bool) -> String {
    ProposalsPage {
        proposals,
        page,
        per_page,
        has_voted,
    }
    .to_string()
}

struct ProposalsPage<'a> {
    proposals: &'a [Proposal],
    page: usize,
    per_page: usize,
    has_voted: bool,
}

impl fmt::Display for ProposalsPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = paginate(self.proposals.len(), self.page, self.per_page);
        writeln!(f, "🗳️  Proposals, page {}/{}", p.page, p.total_pages)?;
        if self.proposals.is_empty() {
            return writeln!(f, "  No proposals yet. Create one with `tea governance create`.");
        }
        for prop in p.slice(self.proposals) {
            let state = if prop.active { "active" } else { "closed" };
            writeln!(
                f,
                "  #{:<4} [{}] {} ({} votes)",
                prop.id, state, prop.description, prop.vote_count
            )?;
        }
        if self.has_voted {
            writeln!(f, "  You have already voted.")?;
        }
        if p.total_pages > 1 {
            writeln!(f, "  Pages: {}", render_strip(p.page, &p.strip()))?;
        }
        Ok(())
    }
}

/// Warns when a connected wallet sits on the wrong chain.
pub async fn network_alert(session: &Session) {
    let Some(wallet) = session.wallet_opt() else {
        return;
    };
    let connected = matches!(session.account().await, Ok(Some(_)));
    if connected && !check_correct_network(wallet, &session.config().network).await {
        println!("⚠️  Wrong network detected.");
        println!(
            "   Please switch to {} (chain id {}). Run `tea network switch`.",
            session.config().network.chain_name,
            session.config().network.chain_id
        );
    }
}

fn print_update(update: &PendingUpdate) {
    match update {
        PendingUpdate::Confirmed {
            hash,
            kind,
            success: true,
        } => println!("✅ {} transaction confirmed! ({hash})", titlecase(&kind.to_string())),
        PendingUpdate::Confirmed { hash, kind, .. } => {
            println!("❌ {} transaction reverted. ({hash})", titlecase(&kind.to_string()))
        }
        PendingUpdate::Stalled { hash, minutes, .. } => println!(
            "⏳ Transaction {hash} has been pending for {minutes} minutes. Consider speeding it up in your wallet."
        ),
    }
}

/// Polls the read provider until every transaction has a receipt.
pub async fn watch_pending(session: &Session, txs: Vec<PendingTransaction>) -> anyhow::Result<()> {
    let cfg = &session.config().pending;
    let mut tracker = PendingTracker::new(Duration::from_secs(cfg.stall_after_mins * 60));
    for tx in txs {
        tracker.track(tx);
    }
    let interval = Duration::from_secs(cfg.poll_interval_secs.max(1));

    loop {
        for update in tracker.poll(session.contracts().rpc(), Instant::now()).await {
            print_update(&update);
        }
        if tracker.is_empty() {
            return Ok(());
        }
        println!("… {} transaction(s) pending", tracker.pending().len());
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                println!("Stopped watching; transactions may still confirm.");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use tea_types::app::{Leaderboard, LeaderboardSource};

    fn snapshot(n: u8) -> LeaderboardSnapshot {
        LeaderboardSnapshot {
            source: LeaderboardSource::DirectStea,
            board: Leaderboard::from_observations(
                (1..=n).map(|i| (Address::repeat_byte(i), U256::from(i) * U256::from(10).pow(U256::from(18)))),
            ),
        }
    }

    #[test]
    fn strip_marks_current_page() {
        let markers = [
            PageMarker::Number(1),
            PageMarker::Ellipsis,
            PageMarker::Number(4),
            PageMarker::Number(10),
        ];
        assert_eq!(render_strip(4, &markers), "1 ... [4] 10");
    }

    #[test]
    fn leaderboard_page_ranks_and_marks_you() {
        let snap = snapshot(12);
        let you = Address::repeat_byte(1);
        let out = render_leaderboard(&snap, 2, 10, Some(you));
        assert!(out.contains("page 2/2"));
        // The smallest holder is rank 12 on the second page.
        assert!(out.contains("  12  "));
        assert!(out.contains("(You)"));
        assert!(out.contains("Pages: 1 [2]"));
    }

    #[test]
    fn empty_leaderboard() {
        let out = render_leaderboard(&snapshot(0), 1, 10, None);
        assert!(out.contains("No stakers yet."));
    }

    #[test]
    fn proposals_page() {
        let props: Vec<Proposal> = (0..7)
            .rev()
            .map(|id| Proposal {
                id,
                description: format!("p{id}"),
                vote_count: U256::from(id),
                active: id > 3,
            })
            .collect();
        let out = render_proposals(&props, 1, 5, false);
        assert!(out.contains("#6"));
        assert!(out.contains("[active]"));
        assert!(!out.contains("#1 "));
        let out = render_proposals(&props, 2, 5, true);
        assert!(out.contains("[closed] p1"));
        assert!(out.contains("already voted"));
    }
}
