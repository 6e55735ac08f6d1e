//! # evmbind-rpc
//!
//! The network seam of evmbind:
//!
//! - [`RpcTransport`] — the object-safe async trait every transport
//!   implements; stored as `Arc<dyn RpcTransport>`
//! - [`HttpTransport`] — `reqwest`-backed JSON-RPC over HTTP
//! - [`EthClient`] — typed helpers for `eth_call` and the
//!   `eth_newFilter` / `eth_getFilterChanges` / `eth_uninstallFilter`
//!   lifecycle
//! - [`FilterQuery`] — the log-filter registration argument builder
//!
//! No retries, no caching: every call is a fresh round trip. Callers supply
//! their own timeouts and retry loops; dropping the future cancels the call.

pub mod client;
pub mod filter;
pub mod http;
pub mod transport;

pub use client::EthClient;
pub use filter::{FilterQuery, TopicFilter};
pub use http::{HttpConfig, HttpTransport};
pub use transport::RpcTransport;
