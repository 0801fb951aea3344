// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the Tea staking client.
//!
//! Every field carries a serde default so an empty `tea.toml` describes the
//! public Tea Sepolia deployment.

use crate::error::ConfigError;
use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// The chain id of the Tea Sepolia test network.
pub const TEA_SEPOLIA_CHAIN_ID: u64 = 10218;
/// The public RPC endpoint of Tea Sepolia.
pub const TEA_SEPOLIA_RPC_URL: &str = "https://tea-sepolia.g.alchemy.com/public";
/// The block explorer of Tea Sepolia.
pub const TEA_SEPOLIA_EXPLORER_URL: &str = "https://explorer.teaprotocol.io/";
/// The deployed staking/treasury contract.
pub const TREASURY_ADDRESS: Address = address!("D0501e868AEC9973E118B975E00E1d078c88D263");
/// The deployed sTEA staking-receipt token.
pub const STEA_ADDRESS: Address = address!("09bA156Aaf3505d07b6F82872b35D75b7A7d5032");

/// The native currency of a network as the wallet displays it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    /// Currency name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places.
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "TEA".into(),
            symbol: "TEA".into(),
            decimals: 18,
        }
    }
}

/// Parameters of the single network this client operates on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkParams {
    /// Numeric chain id.
    pub chain_id: u64,
    /// Human-readable chain name.
    pub chain_name: String,
    /// RPC URLs advertised to the wallet when the chain must be added.
    pub rpc_urls: Vec<String>,
    /// Block explorer URLs advertised to the wallet.
    pub block_explorer_urls: Vec<String>,
    /// The native currency.
    pub native_currency: NativeCurrency,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            chain_id: TEA_SEPOLIA_CHAIN_ID,
            chain_name: "Tea Sepolia".into(),
            rpc_urls: vec![TEA_SEPOLIA_RPC_URL.into()],
            block_explorer_urls: vec![TEA_SEPOLIA_EXPLORER_URL.into()],
            native_currency: NativeCurrency::default(),
        }
    }
}

impl NetworkParams {
    /// The chain id as the `0x`-prefixed lowercase hex string wallets report.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// The `wallet_addEthereumChain` parameter object.
    pub fn to_add_chain_params(&self) -> serde_json::Value {
        serde_json::json!({
            "chainId": self.chain_id_hex(),
            "chainName": self.chain_name,
            "nativeCurrency": {
                "name": self.native_currency.name,
                "symbol": self.native_currency.symbol,
                "decimals": self.native_currency.decimals,
            },
            "rpcUrls": self.rpc_urls,
            "blockExplorerUrls": self.block_explorer_urls,
        })
    }
}

/// Addresses of the contracts the client talks to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ContractsConfig {
    /// The staking/treasury contract.
    pub treasury: Address,
    /// The sTEA receipt token.
    pub stea: Address,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            treasury: TREASURY_ADDRESS,
            stea: STEA_ADDRESS,
        }
    }
}

/// Settings for the read-side JSON-RPC transport.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RpcConfig {
    /// Primary endpoints, tried in order.
    pub endpoints: Vec<String>,
    /// Endpoints tried after every primary endpoint has failed.
    pub fallback_endpoints: Vec<String>,
    /// Retries per endpoint for transport errors, 429 and 5xx.
    pub max_retries: u32,
    /// Linear backoff step in milliseconds.
    pub retry_delay_ms: u64,
    /// Upper bound on a single backoff in milliseconds.
    pub max_retry_delay_ms: u64,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![TEA_SEPOLIA_RPC_URL.into()],
            fallback_endpoints: Vec::new(),
            max_retries: 3,
            retry_delay_ms: 1_000,
            max_retry_delay_ms: 5_000,
            request_timeout_ms: 10_000,
        }
    }
}

impl RpcConfig {
    /// Primary endpoints followed by fallbacks, with duplicates removed.
    pub fn all_endpoints(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for url in self.endpoints.iter().chain(self.fallback_endpoints.iter()) {
            let url = url.trim_end_matches('/').to_string();
            if !url.is_empty() && !out.contains(&url) {
                out.push(url);
            }
        }
        out
    }

    /// The backoff before retry number `attempt` (1-based).
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let ms = self
            .retry_delay_ms
            .saturating_mul(u64::from(attempt))
            .min(self.max_retry_delay_ms);
        Duration::from_millis(ms)
    }
}

/// Where signing requests are sent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WalletConfig {
    /// A JSON-RPC endpoint that owns the account and signs `eth_sendTransaction`.
    pub endpoint: Option<String>,
    /// Account to act as. When unset the wallet's first account is used.
    pub account: Option<Address>,
}

/// Tuning for leaderboard aggregation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LeaderboardConfig {
    /// Batch size when reading sTEA balances for every holder.
    pub direct_batch_size: usize,
    /// Batch size when reading treasury staked balances.
    pub staked_batch_size: usize,
    /// How many raw leaderboard addresses the staked-balance source reads.
    pub staked_max_addresses: usize,
    /// Bound on a single balance lookup in milliseconds.
    pub lookup_timeout_ms: u64,
    /// Pause between batches in milliseconds.
    pub batch_delay_ms: u64,
    /// Deadline for a whole refresh in milliseconds.
    pub refresh_deadline_ms: u64,
    /// Rows per page.
    pub per_page: usize,
    /// Interval of watch mode in seconds.
    pub auto_refresh_secs: u64,
    /// A refresh slower than this logs a warning.
    pub slow_refresh_warn_ms: u64,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            direct_batch_size: 10,
            staked_batch_size: 5,
            staked_max_addresses: 20,
            lookup_timeout_ms: 3_000,
            batch_delay_ms: 200,
            refresh_deadline_ms: 30_000,
            per_page: 10,
            auto_refresh_secs: 30,
            slow_refresh_warn_ms: 5_000,
        }
    }
}

/// Tuning for the proposal scan.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GovernanceConfig {
    /// Highest number of proposal indices probed.
    pub max_proposals: usize,
    /// Indices read concurrently per batch.
    pub batch_size: usize,
    /// Proposals per page.
    pub per_page: usize,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            max_proposals: 50,
            batch_size: 10,
            per_page: 5,
        }
    }
}

/// Tuning for pending transaction tracking.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PendingConfig {
    /// Receipt polling interval in seconds.
    pub poll_interval_secs: u64,
    /// Minutes after which a pending transaction is reported as stalled.
    pub stall_after_mins: u64,
}

impl Default for PendingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            stall_after_mins: 30,
        }
    }
}

/// The complete client configuration, as stored in `tea.toml`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// The target network.
    pub network: NetworkParams,
    /// Contract addresses.
    pub contracts: ContractsConfig,
    /// Read transport.
    pub rpc: RpcConfig,
    /// Signing wallet.
    pub wallet: WalletConfig,
    /// Leaderboard aggregation.
    pub leaderboard: LeaderboardConfig,
    /// Proposal scan.
    pub governance: GovernanceConfig,
    /// Pending transaction tracking.
    pub pending: PendingConfig,
}

impl ClientConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: Self = toml::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Writes the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Rejects values that would make the client unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rpc.all_endpoints().is_empty() {
            return Err(ConfigError::Invalid("rpc.endpoints must not be empty".into()));
        }
        if self.leaderboard.direct_batch_size == 0 || self.leaderboard.staked_batch_size == 0 {
            return Err(ConfigError::Invalid(
                "leaderboard batch sizes must be positive".into(),
            ));
        }
        if self.governance.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "governance.batch_size must be positive".into(),
            ));
        }
        if self.leaderboard.per_page == 0 || self.governance.per_page == 0 {
            return Err(ConfigError::Invalid("page sizes must be positive".into()));
        }
        Ok(())
    }
}
