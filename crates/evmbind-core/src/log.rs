//! Raw log entries and filter identifiers.
//!
//! A [`FilterChange`] is one entry of the batch returned by
//! `eth_getFilterChanges`. It is produced by the node and read-only to this
//! system: `topics[0]`, when present, is the keccak256 hash of the event's
//! canonical signature; `topics[1..]` carry the indexed field values and
//! `data` holds the ABI-encoded non-indexed fields.

use alloy_primitives::{Address, Bytes, B256, U64};
use serde::{Deserialize, Serialize};

/// Opaque identifier returned by `eth_newFilter`.
///
/// Lifecycle is create → zero-or-more polls → uninstall. The node keeps
/// server-side state for every live filter; a handle that is never
/// uninstalled leaks that state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterId(pub String);

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One raw log entry from an `eth_getFilterChanges` batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChange {
    /// Contract that emitted the log.
    pub address: Address,
    /// `topics[0]` is the event signature hash; the rest are indexed fields.
    pub topics: Vec<B256>,
    /// ABI-encoded non-indexed fields.
    pub data: Bytes,
    pub block_number: U64,
    pub transaction_hash: B256,
    pub transaction_index: U64,
    pub block_hash: B256,
    pub log_index: U64,
    /// Set by the node when the log was invalidated by a chain reorg.
    pub removed: bool,
}

impl FilterChange {
    /// The event signature hash, if the entry carries any topics.
    pub fn event_signature(&self) -> Option<B256> {
        self.topics.first().copied()
    }
}
