//! Transport layer for JSON-RPC communication

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::SdkError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request and get the JSON `result`
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError>;
}

/// Helper to deserialize response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

/// Chain identifier the mock reports by default
pub const MOCK_CHAIN_IDENTIFIER: &str = "4c78adac";

/// Reference gas price the mock reports by default
pub const MOCK_REFERENCE_GAS_PRICE: u64 = 1000;

#[derive(Default)]
struct MockState {
    queued: HashMap<String, VecDeque<Result<Value, SdkError>>>,
    fixed: HashMap<String, Value>,
    defaults: HashMap<String, Value>,
    requests: Vec<(String, Vec<Value>)>,
}

/// Mock transport for testing
///
/// Answers come from, in order: responses queued for the method, a fixed
/// response for the method, then built-in defaults. Anything else is a
/// "method not found" RPC error. Clones share state, so a test can keep a
/// handle after giving one to a client.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();
        defaults.insert(
            "suix_getReferenceGasPrice".to_string(),
            Value::String(MOCK_REFERENCE_GAS_PRICE.to_string()),
        );
        defaults.insert(
            "sui_getChainIdentifier".to_string(),
            Value::String(MOCK_CHAIN_IDENTIFIER.to_string()),
        );
        defaults.insert(
            "sui_getLatestCheckpointSequenceNumber".to_string(),
            Value::String("1000".to_string()),
        );

        Self {
            state: Arc::new(Mutex::new(MockState {
                defaults,
                ..MockState::default()
            })),
        }
    }

    /// Answer every call to `method` with `response`
    pub fn set_response(&self, method: &str, response: Value) {
        self.state.lock().fixed.insert(method.to_string(), response);
    }

    /// Answer the next call to `method` with `response`
    pub fn push_response(&self, method: &str, response: Value) {
        self.push_result(method, Ok(response));
    }

    /// Fail the next call to `method` with `error`
    pub fn push_error(&self, method: &str, error: SdkError) {
        self.push_result(method, Err(error));
    }

    fn push_result(&self, method: &str, result: Result<Value, SdkError>) {
        self.state
            .lock()
            .queued
            .entry(method.to_string())
            .or_default()
            .push_back(result);
    }

    /// Clear custom responses and recorded requests
    pub fn clear_responses(&self) {
        let mut state = self.state.lock();
        state.queued.clear();
        state.fixed.clear();
        state.requests.clear();
    }

    /// Every request so far, oldest first
    pub fn requests(&self) -> Vec<(String, Vec<Value>)> {
        self.state.lock().requests.clone()
    }

    /// Params of the most recent call to `method`
    pub fn last_params(&self, method: &str) -> Option<Vec<Value>> {
        self.state
            .lock()
            .requests
            .iter()
            .rev()
            .find(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
    }

    /// Number of calls to `method`
    pub fn request_count(&self, method: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let mut state = self.state.lock();
        state.requests.push((method.to_string(), params));

        if let Some(result) = state.queued.get_mut(method).and_then(VecDeque::pop_front) {
            return result;
        }
        if let Some(response) = state.fixed.get(method).or_else(|| state.defaults.get(method)) {
            return Ok(response.clone());
        }

        Err(SdkError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// HTTP transport for real RPC communication
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport with reqwest's default timeouts
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Create a transport whose requests fail after `timeout`
    pub fn with_timeout(url: &str, timeout: std::time::Duration) -> Result<Self, SdkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        })
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Vec<Value>) -> Result<Value, SdkError> {
        let id = self.next_id();
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        tracing::trace!(id, method, "sending request");

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
