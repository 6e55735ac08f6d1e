//! HTTP JSON-RPC transport backed by `reqwest`.

use async_trait::async_trait;
use std::time::Duration;

use evmbind_core::{BindError, JsonRpcRequest, JsonRpcResponse};

use crate::transport::RpcTransport;

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Hard deadline for one round trip; exceeding it is a network error.
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// A plain HTTP JSON-RPC transport. One fresh round trip per call; callers
/// layer their own retry and backoff if they need resilience.
pub struct HttpTransport {
    url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for the given JSON-RPC endpoint URL.
    pub fn new(url: impl Into<String>, config: HttpConfig) -> Result<Self, BindError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(BindError::network)?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }

    /// Build with the default configuration.
    pub fn dial(url: impl Into<String>) -> Result<Self, BindError> {
        Self::new(url, HttpConfig::default())
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, BindError> {
        tracing::debug!(method = %req.method, id = req.id, url = %self.url, "rpc request");

        let resp = self
            .http
            .post(&self.url)
            .json(&req)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(method = %req.method, url = %self.url, error = %e, "rpc transport failure");
                BindError::network(e)
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(BindError::network(format!("HTTP {status}: {body}")));
        }

        resp.json::<JsonRpcResponse>()
            .await
            .map_err(BindError::network)
    }

    fn url(&self) -> &str {
        &self.url
    }
}
