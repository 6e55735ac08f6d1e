//! # evmbind-core
//!
//! Shared primitives for the evmbind contract-binding toolkit: the error
//! taxonomy, JSON-RPC 2.0 wire types, raw log entries as returned by
//! `eth_getFilterChanges`, and the dynamic ABI value type that the encoder
//! and decoder crates exchange.

pub mod error;
pub mod log;
pub mod rpc;
pub mod value;

pub use error::BindError;
pub use log::{FilterChange, FilterId};
pub use rpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use value::AbiValue;
