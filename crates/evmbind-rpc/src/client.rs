//! Typed node client: `eth_call` plus the log-filter lifecycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::Address;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use evmbind_core::{BindError, FilterChange, FilterId, JsonRpcRequest};

use crate::filter::FilterQuery;
use crate::http::HttpTransport;
use crate::transport::RpcTransport;

/// A node client over one shared transport.
///
/// No per-call mutable state beyond the request-id counter, so one client
/// may be shared (`Arc<EthClient>`) across concurrent call sites.
pub struct EthClient {
    transport: Arc<dyn RpcTransport>,
    next_id: AtomicU64,
}

impl EthClient {
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    /// Connect over HTTP with the default configuration.
    pub fn dial(url: impl Into<String>) -> Result<Self, BindError> {
        Ok(Self::new(Arc::new(HttpTransport::dial(url)?)))
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    /// Generic JSON-RPC passthrough: send `method` with `params` and
    /// deserialize the `result` member.
    ///
    /// A JSON-RPC error object from the node surfaces as
    /// [`BindError::Node`]; transport failures as [`BindError::Network`].
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, BindError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let req = JsonRpcRequest::new(id, method, params);
        let resp = self.transport.send(req).await?;

        let result = resp.into_result().map_err(|error| BindError::Node {
            method: method.to_owned(),
            error,
        })?;

        serde_json::from_value(result)
            .map_err(|e| BindError::decoding(format!("`{method}` result"), e))
    }

    /// Read-only contract invocation (`eth_call` against the latest block).
    /// Returns the raw return bytes; ABI decoding is the caller's concern.
    pub async fn call(&self, to: Address, calldata: &[u8]) -> Result<Vec<u8>, BindError> {
        let params = vec![
            json!({
                "to": to,
                "data": format!("0x{}", hex::encode(calldata)),
            }),
            json!("latest"),
        ];
        let raw: String = self.invoke("eth_call", params).await?;
        let raw = raw.strip_prefix("0x").unwrap_or(&raw);
        hex::decode(raw).map_err(|e| BindError::decoding("`eth_call` return bytes", e))
    }

    /// Register a log filter. The returned handle is caller-owned: poll it
    /// with [`filter_changes`](Self::filter_changes) and release it with
    /// [`uninstall_filter`](Self::uninstall_filter) — the node keeps state
    /// for every filter that is never uninstalled.
    pub async fn new_filter(&self, query: &FilterQuery) -> Result<FilterId, BindError> {
        let id: String = self.invoke("eth_newFilter", vec![query.to_param()]).await?;
        Ok(FilterId(id))
    }

    /// Poll for log entries that matched since the last poll, in node order.
    pub async fn filter_changes(&self, id: &FilterId) -> Result<Vec<FilterChange>, BindError> {
        self.invoke("eth_getFilterChanges", vec![json!(id.0)]).await
    }

    /// Release a filter. The node must report success; anything else is
    /// [`BindError::FilterLifecycle`].
    pub async fn uninstall_filter(&self, id: &FilterId) -> Result<(), BindError> {
        let removed: bool = self.invoke("eth_uninstallFilter", vec![json!(id.0)]).await?;
        if !removed {
            return Err(BindError::FilterLifecycle {
                filter_id: id.0.clone(),
            });
        }
        Ok(())
    }
}
