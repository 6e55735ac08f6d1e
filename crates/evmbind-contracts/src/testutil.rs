//! Shared helpers for the unit tests in this crate.

use evmbind_core::FilterChange;
use serde_json::json;

/// Build a log entry with the given topics and data payload, with fixed
/// positional metadata.
pub(crate) fn log_entry(topics: &[&str], data: &str) -> FilterChange {
    serde_json::from_value(json!({
        "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "topics": topics,
        "data": data,
        "blockNumber": "0x3e8",
        "transactionHash": "0x6afc8cd6d2b9e87f0f1c8d2f4a8c6b3b61b92e1f9c39d10d38e7f4d0b8d9a111",
        "transactionIndex": "0x0",
        "blockHash": "0x23f9cbdfae01d9fdc1e88add34a4c4e04b1ab7a9ac4d09d5aa60fa3c02b0e5ac",
        "logIndex": "0x0",
        "removed": false
    }))
    .expect("valid log entry JSON")
}

/// 32-byte topic carrying an address (left-padded).
pub(crate) fn address_topic(addr: &str) -> String {
    let hex = addr.trim_start_matches("0x").to_lowercase();
    format!("0x000000000000000000000000{hex}")
}
