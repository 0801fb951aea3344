// Path: crates/cli/src/commands/config.rs

use super::DEFAULT_CONFIG_FILE;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tea_types::config::ClientConfig;

#[derive(Parser, Debug)]
pub struct ConfigCmdArgs {
    #[clap(subcommand)]
    pub command: ConfigSubCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubCommands {
    /// Generate a tea.toml with the built-in Tea Sepolia defaults.
    New {
        #[clap(long, default_value = ".")]
        out_dir: PathBuf,
        /// Wallet endpoint to write into [wallet].
        #[clap(long, value_name = "URL")]
        wallet_endpoint: Option<String>,
        /// Overwrite an existing file.
        #[clap(long)]
        force: bool,
    },
    /// Print the effective config after defaults are applied.
    Show {
        #[clap(long)]
        path: Option<PathBuf>,
    },
}

pub fn run(args: ConfigCmdArgs) -> Result<()> {
    match args.command {
        ConfigSubCommands::New {
            out_dir,
            wallet_endpoint,
            force,
        } => {
            fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(DEFAULT_CONFIG_FILE);
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let mut cfg = ClientConfig::default();
            cfg.wallet.endpoint = wallet_endpoint;
            cfg.save(&path)?;
            println!("✅ Generated {}", path.display());
            println!("ℹ️  Set [wallet].endpoint to your signer's JSON-RPC URL to submit transactions.");
        }
        ConfigSubCommands::Show { path } => {
            let cfg = match path {
                Some(p) => ClientConfig::load(&p)?,
                None => ClientConfig::default(),
            };
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
    }
    Ok(())
}
