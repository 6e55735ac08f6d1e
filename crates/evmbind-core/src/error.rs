//! The evmbind error taxonomy.
//!
//! Every layer wraps and forwards the underlying cause with added context
//! (which function, event or filter was involved) rather than recovering
//! locally. There is no built-in retry; callers needing resilience supply
//! their own timeouts and retry loops around the async operations.

use thiserror::Error;

use crate::rpc::JsonRpcError;

/// Errors produced anywhere in the evmbind pipeline.
#[derive(Debug, Error)]
pub enum BindError {
    /// Argument count or types did not match the ABI schema. Raised before
    /// any call is sent.
    #[error("encode {context}: {reason}")]
    Encoding { context: String, reason: String },

    /// The transport could not complete the round trip (connection refused,
    /// timeout, malformed HTTP response).
    #[error("network: {reason}")]
    Network { reason: String },

    /// The node returned a JSON-RPC error object, e.g. reverted execution.
    #[error("node rejected `{method}`: {error}")]
    Node {
        method: String,
        error: JsonRpcError,
    },

    /// Returned bytes or a decoded value did not match the expected shape.
    #[error("decode {context}: {reason}")]
    Decoding { context: String, reason: String },

    /// A log entry matched a known event but carries fewer topics than the
    /// event's indexed-field count requires.
    #[error(
        "log entry {log_index} in block {block_number}: event `{event}` requires {expected} topics, got {got}"
    )]
    Validation {
        event: String,
        block_number: u64,
        log_index: u64,
        expected: usize,
        got: usize,
    },

    /// `eth_uninstallFilter` reported the filter was not removed.
    #[error("filter {filter_id} was not uninstalled")]
    FilterLifecycle { filter_id: String },
}

impl BindError {
    /// Encoding error with call-site context.
    pub fn encoding(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Encoding {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Network error with the underlying transport failure.
    pub fn network(reason: impl ToString) -> Self {
        Self::Network {
            reason: reason.to_string(),
        }
    }

    /// Decoding error with call-site context.
    pub fn decoding(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decoding {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` if the node itself rejected the call (as opposed to a
    /// transport failure). Not retryable.
    pub fn is_node_error(&self) -> bool {
        matches!(self, Self::Node { .. })
    }

    /// Returns `true` if the round trip never completed. Callers may retry.
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_error_display_includes_method() {
        let err = BindError::Node {
            method: "eth_call".into(),
            error: JsonRpcError {
                code: -32000,
                message: "execution reverted".into(),
                data: None,
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("eth_call"));
        assert!(msg.contains("execution reverted"));
        assert!(err.is_node_error());
        assert!(!err.is_network_error());
    }

    #[test]
    fn validation_error_identifies_entry() {
        let err = BindError::Validation {
            event: "Transfer".into(),
            block_number: 1234,
            log_index: 7,
            expected: 4,
            got: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Transfer"));
        assert!(msg.contains("1234"));
        assert!(msg.contains("7"));
    }
}
