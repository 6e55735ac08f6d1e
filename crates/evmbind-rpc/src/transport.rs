//! The `RpcTransport` trait.

use async_trait::async_trait;
use evmbind_core::{BindError, JsonRpcRequest, JsonRpcResponse};

/// The async trait every JSON-RPC transport implements.
///
/// # Thread safety
/// Implementations are `Send + Sync` and carry no mutable per-call state, so
/// concurrent calls on one transport are safe. Shutdown is `Drop`: the caller
/// must not drop the transport while calls are in flight it still cares
/// about.
///
/// # Object safety
/// The trait is object-safe and is normally stored as `Arc<dyn RpcTransport>`.
#[async_trait]
pub trait RpcTransport: Send + Sync + 'static {
    /// Send a single JSON-RPC request and return the raw response.
    ///
    /// Transport failures (connection, timeout, malformed reply) surface as
    /// [`BindError::Network`]; a JSON-RPC error *object* is not a transport
    /// failure and comes back inside the response.
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, BindError>;

    /// The endpoint this transport talks to, for diagnostics.
    fn url(&self) -> &str;
}
