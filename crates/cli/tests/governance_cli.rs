// Path: crates/cli/tests/governance_cli.rs

use tea_cli::commands::governance::{run, GovernanceArgs, GovernanceCommands};
use tea_cli::GlobalArgs;

/// A config whose read provider and wallet both refuse connections.
fn unreachable_config(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("tea.toml");
    std::fs::write(
        &path,
        "[rpc]\n\
         endpoints = [\"http://127.0.0.1:9\"]\n\
         max_retries = 0\n\
         request_timeout_ms = 1000\n\
         \n\
         [wallet]\n\
         endpoint = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();
    path
}

#[tokio::test]
async fn list_renders_without_a_reachable_wallet() {
    let dir = tempfile::tempdir().unwrap();
    let global = GlobalArgs {
        config: Some(unreachable_config(dir.path())),
        ..Default::default()
    };
    run(
        GovernanceArgs {
            command: GovernanceCommands::List {
                page: 1,
                json: false,
            },
        },
        global,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn vote_reports_the_missing_proposal_not_the_wallet() {
    let dir = tempfile::tempdir().unwrap();
    let global = GlobalArgs {
        config: Some(unreachable_config(dir.path())),
        ..Default::default()
    };
    let err = run(
        GovernanceArgs {
            command: GovernanceCommands::Vote { id: 3, wait: false },
        },
        global,
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Proposal #3 not found");
}
