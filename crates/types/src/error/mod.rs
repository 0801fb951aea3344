// Path: crates/types/src/error/mod.rs
//! Core error types for the Tea staking client.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// The JSON-RPC error code a wallet returns when asked to switch to a chain it does not know.
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// Errors raised by the JSON-RPC transport.
#[derive(Error, Debug, Clone)]
pub enum RpcError {
    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The endpoint that answered.
        endpoint: String,
        /// A truncated snippet of the response body.
        body: String,
    },
    /// The endpoint answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    Rpc {
        /// The JSON-RPC error code.
        code: i64,
        /// The error message.
        message: String,
        /// Optional error data (often revert data).
        data: Option<serde_json::Value>,
    },
    /// The response could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Every configured endpoint failed.
    #[error("all {tried} RPC endpoints failed; last error: {last}")]
    Exhausted {
        /// How many endpoints were tried.
        tried: usize,
        /// The last error observed.
        last: Box<RpcError>,
    },
}

impl RpcError {
    /// Returns true if the error is worth retrying against the same endpoint.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Rpc { .. } | Self::Decode(_) | Self::Exhausted { .. } => false,
        }
    }

    /// Returns the JSON-RPC error code if this is an error object from the remote.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            Self::Exhausted { last, .. } => last.rpc_code(),
            _ => None,
        }
    }
}

impl ErrorCode for RpcError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "RPC_TRANSPORT",
            Self::Http { .. } => "RPC_HTTP_STATUS",
            Self::Rpc { .. } => "RPC_ERROR_OBJECT",
            Self::Decode(_) => "RPC_DECODE",
            Self::Exhausted { .. } => "RPC_ENDPOINTS_EXHAUSTED",
        }
    }
}

/// Errors related to loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid TOML for the expected schema.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config could not be serialized.
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "CONFIG_IO",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::Serialize(_) => "CONFIG_SERIALIZE",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

/// Errors surfaced by client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A JSON-RPC request failed.
    #[error("{0}")]
    Rpc(#[from] RpcError),
    /// No wallet endpoint is configured.
    #[error("Wallet not configured")]
    WalletUnavailable,
    /// The wallet returned no accounts.
    #[error("No accounts available in wallet")]
    NoAccounts,
    /// The wallet is connected to a different chain.
    #[error("Please switch to {expected_name} network to continue (wallet is on {actual})")]
    WrongNetwork {
        /// The human-readable name of the required chain.
        expected_name: String,
        /// The chain id the wallet reported.
        actual: String,
    },
    /// Switching or adding the network in the wallet failed.
    #[error("{0}")]
    NetworkSwitch(String),
    /// The amount entered is empty, unparsable or not positive.
    #[error("Please enter a valid amount: {0}")]
    InvalidAmount(String),
    /// A proposal needs a non-empty description.
    #[error("Please enter a proposal description")]
    EmptyProposal,
    /// ABI encoding or decoding failed.
    #[error("ABI error: {0}")]
    Abi(String),
    /// An operation exceeded its deadline.
    #[error("Timed out: {0}")]
    Timeout(String),
    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl ErrorCode for ClientError {
    fn code(&self) -> &'static str {
        match self {
            Self::Rpc(e) => e.code(),
            Self::WalletUnavailable => "CLIENT_WALLET_UNAVAILABLE",
            Self::NoAccounts => "CLIENT_NO_ACCOUNTS",
            Self::WrongNetwork { .. } => "CLIENT_WRONG_NETWORK",
            Self::NetworkSwitch(_) => "CLIENT_NETWORK_SWITCH",
            Self::InvalidAmount(_) => "CLIENT_INVALID_AMOUNT",
            Self::EmptyProposal => "CLIENT_EMPTY_PROPOSAL",
            Self::Abi(_) => "CLIENT_ABI",
            Self::Timeout(_) => "CLIENT_TIMEOUT",
            Self::Config(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(RpcError::Transport("reset".into()).is_retryable());
        let http = |status| RpcError::Http {
            status,
            endpoint: "x".into(),
            body: String::new(),
        };
        assert!(http(429).is_retryable());
        assert!(http(503).is_retryable());
        assert!(!http(404).is_retryable());
        let rpc = RpcError::Rpc {
            code: -32000,
            message: "execution reverted".into(),
            data: None,
        };
        assert!(!rpc.is_retryable());
    }

    #[test]
    fn rpc_code_looks_through_exhausted() {
        let err = RpcError::Exhausted {
            tried: 2,
            last: Box::new(RpcError::Rpc {
                code: UNRECOGNIZED_CHAIN_CODE,
                message: "Unrecognized chain ID".into(),
                data: None,
            }),
        };
        assert_eq!(err.rpc_code(), Some(UNRECOGNIZED_CHAIN_CODE));
        assert_eq!(err.code(), "RPC_ENDPOINTS_EXHAUSTED");
    }

    #[test]
    fn client_error_delegates_codes() {
        let err = ClientError::from(RpcError::Decode("bad hex".into()));
        assert_eq!(err.code(), "RPC_DECODE");
        assert_eq!(ClientError::NoAccounts.code(), "CLIENT_NO_ACCOUNTS");
    }
}
