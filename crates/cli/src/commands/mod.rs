// Path: crates/cli/src/commands/mod.rs

pub mod action;
pub mod config;
pub mod connect;
pub mod dashboard;
pub mod governance;
pub mod leaderboard;
pub mod network;
pub mod status;
pub mod tx;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tea_client::Session;
use tea_types::config::ClientConfig;

/// The config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tea.toml";

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Path to a tea.toml config file.
    #[clap(long, global = true, env = "TEA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read RPC endpoint; repeat to set a failover list. Replaces the configured endpoints.
    #[clap(long = "rpc", global = true, value_name = "URL")]
    pub rpc: Vec<String>,

    /// JSON-RPC endpoint of the signing wallet.
    #[clap(long, global = true, env = "TEA_WALLET", value_name = "URL")]
    pub wallet: Option<String>,

    /// Account to act as, instead of the wallet's first account.
    #[clap(long, global = true)]
    pub account: Option<Address>,

    /// Emit logs as JSON.
    #[clap(long, global = true)]
    pub json_logs: bool,

    /// Default log level when RUST_LOG is unset.
    #[clap(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Print Prometheus metrics to stderr on exit.
    #[clap(long, global = true)]
    pub print_metrics: bool,
}

impl GlobalArgs {
    /// Loads the config file (if any) and applies flag overrides.
    pub fn load_config(&self) -> Result<ClientConfig> {
        let mut cfg = match &self.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                ClientConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                    .with_context(|| format!("Failed to load ./{DEFAULT_CONFIG_FILE}"))?
            }
            None => ClientConfig::default(),
        };
        self.apply_overrides(&mut cfg);
        cfg.validate().context("Invalid configuration")?;
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut ClientConfig) {
        if !self.rpc.is_empty() {
            cfg.rpc.endpoints = self.rpc.clone();
            cfg.rpc.fallback_endpoints.clear();
        }
        if let Some(wallet) = &self.wallet {
            cfg.wallet.endpoint = Some(wallet.clone());
        }
        if let Some(account) = self.account {
            cfg.wallet.account = Some(account);
        }
    }

    /// Builds a session from the effective config.
    pub fn session(&self) -> Result<Session> {
        let cfg = self.load_config()?;
        tracing::debug!(endpoints = ?cfg.rpc.all_endpoints(), wallet = ?cfg.wallet.endpoint, "session config");
        Session::new(cfg).context("Failed to set up RPC transports")
    }
}
