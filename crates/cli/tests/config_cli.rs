// Path: crates/cli/tests/config_cli.rs

use tea_cli::commands::config::{run, ConfigCmdArgs, ConfigSubCommands};
use tea_cli::GlobalArgs;
use tea_types::config::{ClientConfig, TEA_SEPOLIA_CHAIN_ID};

fn new_in(dir: &std::path::Path, wallet: Option<&str>, force: bool) -> anyhow::Result<()> {
    run(ConfigCmdArgs {
        command: ConfigSubCommands::New {
            out_dir: dir.to_path_buf(),
            wallet_endpoint: wallet.map(str::to_string),
            force,
        },
    })
}

#[test]
fn generated_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    new_in(dir.path(), Some("http://127.0.0.1:1248"), false).unwrap();

    let cfg = ClientConfig::load(&dir.path().join("tea.toml")).unwrap();
    assert_eq!(cfg.network.chain_id, TEA_SEPOLIA_CHAIN_ID);
    assert_eq!(cfg.wallet.endpoint.as_deref(), Some("http://127.0.0.1:1248"));
    assert_eq!(cfg.leaderboard, ClientConfig::default().leaderboard);
}

#[test]
fn existing_config_is_not_overwritten_without_force() {
    let dir = tempfile::tempdir().unwrap();
    new_in(dir.path(), None, false).unwrap();
    assert!(new_in(dir.path(), None, false).is_err());
    new_in(dir.path(), Some("http://signer"), true).unwrap();
    let cfg = ClientConfig::load(&dir.path().join("tea.toml")).unwrap();
    assert_eq!(cfg.wallet.endpoint.as_deref(), Some("http://signer"));
}

#[test]
fn global_args_read_the_generated_file() {
    let dir = tempfile::tempdir().unwrap();
    new_in(dir.path(), None, false).unwrap();
    let args = GlobalArgs {
        config: Some(dir.path().join("tea.toml")),
        rpc: vec!["http://localhost:8545".into()],
        ..Default::default()
    };
    let cfg = args.load_config().unwrap();
    assert_eq!(cfg.rpc.all_endpoints(), vec!["http://localhost:8545".to_string()]);
    assert!(cfg.wallet.endpoint.is_none());
}
