// Path: crates/client/tests/common/mod.rs
#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tea_types::config::RpcConfig;

/// How the mock node answers one request.
pub enum Reply {
    Result(Value),
    Error(i64, &'static str),
    Status(u16),
    RetryAfter(u16, u64),
}

type Handler = dyn Fn(&str, &Value, usize) -> Reply + Send + Sync;

struct NodeState {
    handler: Box<Handler>,
    hits: AtomicUsize,
    log: Mutex<Vec<(String, Value)>>,
}

/// A JSON-RPC node on a random local port.
#[derive(Clone)]
pub struct MockNode {
    pub url: String,
    state: Arc<NodeState>,
}

impl MockNode {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn methods(&self) -> Vec<String> {
        self.state
            .log
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    pub fn params_of(&self, method: &str) -> Option<Value> {
        self.state
            .log
            .lock()
            .unwrap()
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
    }
}

async fn handle(State(state): State<Arc<NodeState>>, Json(req): Json<Value>) -> Response {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    let method = req["method"].as_str().unwrap_or_default().to_string();
    let params = req["params"].clone();
    state.log.lock().unwrap().push((method.clone(), params.clone()));
    let id = req["id"].clone();

    match (state.handler)(&method, &params, hit) {
        Reply::Result(result) => {
            Json(json!({ "jsonrpc": "2.0", "id": id, "result": result })).into_response()
        }
        Reply::Error(code, message) => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": code, "message": message }
        }))
        .into_response(),
        Reply::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            "upstream unavailable",
        )
            .into_response(),
        Reply::RetryAfter(code, secs) => (
            StatusCode::from_u16(code).unwrap(),
            [(header::RETRY_AFTER, secs.to_string())],
            "slow down",
        )
            .into_response(),
    }
}

/// Starts a node that answers with `handler(method, params, hit_index)`.
pub async fn spawn<F>(handler: F) -> MockNode
where
    F: Fn(&str, &Value, usize) -> Reply + Send + Sync + 'static,
{
    let state = Arc::new(NodeState {
        handler: Box::new(handler),
        hits: AtomicUsize::new(0),
        log: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/", post(handle))
        .with_state(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    MockNode {
        url: format!("http://{addr}"),
        state,
    }
}

/// A transport config with fast retries against `urls`.
pub fn rpc_config(urls: &[&MockNode]) -> RpcConfig {
    RpcConfig {
        endpoints: urls.iter().map(|n| n.url.clone()).collect(),
        fallback_endpoints: Vec::new(),
        max_retries: 3,
        retry_delay_ms: 5,
        max_retry_delay_ms: 20,
        request_timeout_ms: 2_000,
    }
}

/// The 4-byte selector and the rest of an `eth_call`'s calldata.
pub fn calldata(params: &Value) -> ([u8; 4], Vec<u8>) {
    let data = params[0]["data"].as_str().unwrap_or("0x");
    let bytes = alloy_primitives::hex::decode(data).unwrap();
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&bytes[..4]);
    (selector, bytes[4..].to_vec())
}

pub fn hex_result(bytes: Vec<u8>) -> Reply {
    Reply::Result(Value::String(alloy_primitives::hex::encode_prefixed(bytes)))
}
