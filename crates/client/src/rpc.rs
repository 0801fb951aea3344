// Path: crates/client/src/rpc.rs
//! A JSON-RPC 2.0 client over HTTP with per-endpoint retries and failover.
//!
//! Each request is tried against the endpoint that answered last. Transport
//! errors, 429 and 5xx responses are retried with a linear backoff (or the
//! server's `Retry-After`), then the request moves on to the next endpoint.
//! A JSON-RPC error object is a definitive answer and is never retried.

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use reqwest::{
    header::{HeaderValue, RETRY_AFTER},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tea_telemetry::{rpc_metrics, time::Timer};
use tea_types::{config::RpcConfig, error::RpcError};
use tokio::time::sleep;

/// A transaction as sent to `eth_call`, `eth_estimateGas` and `eth_sendTransaction`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Sender; required by wallets for signing requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Contract address.
    pub to: Address,
    /// ABI-encoded calldata.
    pub data: Bytes,
    /// Attached native value in wei.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    /// Gas limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
}

impl TransactionRequest {
    /// A call to `to` with `data`.
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            ..Default::default()
        }
    }
}

/// The fields of a receipt the client looks at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// The transaction hash.
    pub transaction_hash: B256,
    /// Block the transaction was included in.
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` on revert.
    #[serde(default)]
    pub status: Option<U64>,
    /// Gas consumed.
    #[serde(default)]
    pub gas_used: Option<U256>,
}

impl TransactionReceipt {
    /// True unless the receipt reports a revert.
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |s| !s.is_zero())
    }
}

#[derive(Serialize)]
struct RequestBody<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a Value,
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// A failed attempt and the server's requested backoff, if any.
struct Failure {
    error: RpcError,
    retry_after: Option<Duration>,
}

impl From<RpcError> for Failure {
    fn from(error: RpcError) -> Self {
        Self {
            error,
            retry_after: None,
        }
    }
}

/// A JSON-RPC client bound to an ordered list of endpoints.
pub struct RpcClient {
    http: Client,
    endpoints: Vec<String>,
    preferred: AtomicUsize,
    next_id: AtomicU64,
    config: RpcConfig,
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("endpoints", &self.endpoints)
            .field("preferred", &self.preferred.load(Ordering::Relaxed))
            .finish()
    }
}

impl RpcClient {
    /// Builds a client for every endpoint in `config`, primaries first.
    pub fn new(config: &RpcConfig) -> Result<Self, RpcError> {
        let endpoints = config.all_endpoints();
        if endpoints.is_empty() {
            return Err(RpcError::Transport("no RPC endpoints configured".into()));
        }
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
            .build()
            .map_err(|e| RpcError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoints,
            preferred: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            config: config.clone(),
        })
    }

    /// The endpoints in failover order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// The endpoint that answered most recently.
    pub fn current_endpoint(&self) -> &str {
        let idx = self.preferred.load(Ordering::Relaxed);
        self.endpoints
            .get(idx)
            .or_else(|| self.endpoints.first())
            .map_or("", String::as_str)
    }

    /// Sends `method` and decodes the result into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, RpcError> {
        let value = self.request_value(method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| RpcError::Decode(format!("{method}: {e}")))
    }

    /// Sends `method` and returns the raw `result` (`null` when absent).
    pub async fn request_value(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let _timer = Timer::new(rpc_metrics(), method);
        let result = self.request_with_failover(method, &params).await;
        let outcome = if result.is_ok() { "ok" } else { "error" };
        rpc_metrics().inc_requests_total(method, outcome);
        result
    }

    async fn request_with_failover(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
        let n = self.endpoints.len();
        let start = self.preferred.load(Ordering::Relaxed) % n;
        let mut last: Option<RpcError> = None;

        let order = self.endpoints.iter().enumerate().cycle().skip(start).take(n);
        for (offset, (idx, endpoint)) in order.enumerate() {
            match self.send_with_retry(endpoint, method, params).await {
                Ok(v) => {
                    if idx != start {
                        tracing::info!(target: "rpc", %endpoint, "switched to healthy endpoint");
                    }
                    self.preferred.store(idx, Ordering::Relaxed);
                    return Ok(v);
                }
                // The endpoint answered; another node will answer the same.
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    tracing::warn!(target: "rpc", %endpoint, method, error = %e, "endpoint failed");
                    if offset + 1 < n {
                        rpc_metrics().inc_failovers();
                    }
                    last = Some(e);
                }
            }
        }

        Err(RpcError::Exhausted {
            tried: n,
            last: Box::new(last.unwrap_or_else(|| RpcError::Transport("no endpoint tried".into()))),
        })
    }

    async fn send_with_retry(
        &self,
        endpoint: &str,
        method: &str,
        params: &Value,
    ) -> Result<Value, RpcError> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(endpoint, method, params).await {
                Ok(v) => return Ok(v),
                Err(f) if f.error.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = backoff(&self.config, attempt, f.retry_after);
                    tracing::debug!(
                        target: "rpc",
                        "{} to {} failed (attempt {}): {}; backoff {:?}",
                        method,
                        endpoint,
                        attempt,
                        f.error,
                        delay
                    );
                    rpc_metrics().inc_retries(method);
                    sleep(delay).await;
                }
                Err(f) => return Err(f.error),
            }
        }
    }

    async fn send_once(&self, endpoint: &str, method: &str, params: &Value) -> Result<Value, Failure> {
        let body = RequestBody {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        let resp = self
            .http
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        let status = resp.status();
        let retry_after = parse_retry_after(resp.headers().get(RETRY_AFTER));
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RpcError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(Failure {
                error: RpcError::Http {
                    status: status.as_u16(),
                    endpoint: endpoint.to_string(),
                    body: ascii_snippet(&bytes),
                },
                retry_after,
            });
        }

        let parsed: ResponseBody = serde_json::from_slice(&bytes).map_err(|e| {
            RpcError::Decode(format!("{e}; body='{}'", ascii_snippet(&bytes)))
        })?;
        if let Some(err) = parsed.error {
            return Err(RpcError::Rpc {
                code: err.code,
                message: err.message,
                data: err.data,
            }
            .into());
        }
        Ok(parsed.result.unwrap_or(Value::Null))
    }

    /// `eth_blockNumber`.
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let n: U64 = self.request("eth_blockNumber", json!([])).await?;
        Ok(n.to::<u64>())
    }

    /// `eth_chainId`.
    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let n: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(n.to::<u64>())
    }

    /// `eth_getBalance` at the latest block.
    pub async fn get_balance(&self, account: Address) -> Result<U256, RpcError> {
        self.request("eth_getBalance", json!([account, "latest"])).await
    }

    /// `eth_call` at the latest block.
    pub async fn call(&self, tx: &TransactionRequest) -> Result<Bytes, RpcError> {
        self.request("eth_call", json!([tx, "latest"])).await
    }

    /// `eth_estimateGas`.
    pub async fn estimate_gas(&self, tx: &TransactionRequest) -> Result<U256, RpcError> {
        self.request("eth_estimateGas", json!([tx])).await
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    pub async fn get_transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        self.request("eth_getTransactionReceipt", json!([hash])).await
    }
}

fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    header
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// The pause before retry `attempt`: the server's `Retry-After` when given,
/// else the linear step. Never longer than `max_retry_delay_ms`.
fn backoff(config: &RpcConfig, attempt: u32, retry_after: Option<Duration>) -> Duration {
    let cap = Duration::from_millis(config.max_retry_delay_ms);
    retry_after
        .map(|d| d.min(cap))
        .unwrap_or_else(|| config.retry_delay(attempt))
}

pub(crate) fn ascii_snippet(bytes: &[u8]) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s = s.trim();
    let s: String = s.chars().take(160).collect();
    s.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_after_header_is_parsed() {
        let h = HeaderValue::from_static("2");
        assert_eq!(parse_retry_after(Some(&h)), Some(Duration::from_secs(2)));
        let h = HeaderValue::from_static(" 3600 ");
        assert_eq!(parse_retry_after(Some(&h)), Some(Duration::from_secs(3600)));
        let h = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&h)), None);
        assert_eq!(parse_retry_after(None), None);
    }

    #[test]
    fn backoff_honours_retry_after_within_the_cap() {
        let cfg = RpcConfig::default();
        assert_eq!(backoff(&cfg, 2, None), Duration::from_millis(2_000));
        assert_eq!(
            backoff(&cfg, 2, Some(Duration::from_secs(3))),
            Duration::from_secs(3)
        );
        assert_eq!(
            backoff(&cfg, 1, Some(Duration::from_secs(30))),
            Duration::from_millis(cfg.max_retry_delay_ms)
        );
        assert_eq!(backoff(&cfg, 3, Some(Duration::ZERO)), Duration::ZERO);
    }

    #[test]
    fn snippet_is_single_line_and_truncated() {
        let long = "x".repeat(500);
        assert_eq!(ascii_snippet(long.as_bytes()).len(), 160);
        assert_eq!(ascii_snippet(b" a\nb\t"), "a\\nb");
    }

    #[test]
    fn request_serializes_with_wallet_field_names() {
        let tx = TransactionRequest {
            from: Some(Address::repeat_byte(1)),
            value: Some(U256::from(16)),
            gas: None,
            ..TransactionRequest::call(Address::repeat_byte(2), vec![0xd0, 0xe3])
        };
        let v = serde_json::to_value(&tx).unwrap();
        assert_eq!(v["data"], "0xd0e3");
        assert_eq!(v["value"], "0x10");
        assert!(v.get("gas").is_none());
        assert_eq!(
            v["from"].as_str().unwrap().to_lowercase(),
            format!("0x{}", "01".repeat(20))
        );
    }

    #[test]
    fn receipt_status() {
        let r: TransactionReceipt = serde_json::from_value(json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x0",
        }))
        .unwrap();
        assert!(!r.succeeded());
        assert_eq!(r.block_number, Some(U64::from(16)));
    }

    #[test]
    fn empty_endpoint_list_is_rejected() {
        let cfg = RpcConfig {
            endpoints: vec![],
            fallback_endpoints: vec![],
            ..RpcConfig::default()
        };
        assert!(matches!(RpcClient::new(&cfg), Err(RpcError::Transport(_))));
    }
}
