//! Parsed ABI schemas.
//!
//! An [`AbiSchema`] is the in-memory form of one contract family's fixed,
//! embedded interface description (standard Ethereum ABI JSON). It is parsed
//! once at binding construction, never mutated afterwards, and shared behind
//! an `Arc` across every capability component of the binding — so it may be
//! read concurrently without synchronization.

use alloy_json_abi::{Event, Function, JsonAbi};
use alloy_primitives::B256;
use evmbind_core::BindError;
use std::collections::HashMap;

/// An immutable, parsed contract interface description.
#[derive(Debug, Clone)]
pub struct AbiSchema {
    abi: JsonAbi,
    /// Event-signature hash (topic 0) → canonical event name.
    ///
    /// The signature hash is a keccak256 digest, so at most one known event
    /// matches any topic 0; collisions are not handled.
    events_by_topic0: HashMap<B256, String>,
}

impl AbiSchema {
    /// Parse a standard Ethereum ABI JSON string.
    ///
    /// Explicit and idempotent: malformed schema text is an error, never a
    /// panic, and parsing the same text twice yields equivalent schemas.
    pub fn parse(abi_json: &str) -> Result<Self, BindError> {
        let abi: JsonAbi = serde_json::from_str(abi_json)
            .map_err(|e| BindError::decoding("ABI schema", e))?;

        let events_by_topic0 = abi
            .events()
            .map(|ev| (ev.selector(), ev.name.clone()))
            .collect();

        Ok(Self {
            abi,
            events_by_topic0,
        })
    }

    /// Look up a declared function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.abi.functions().find(|f| f.name == name)
    }

    /// Look up a declared event by name.
    pub fn event(&self, name: &str) -> Option<&Event> {
        self.abi.events().find(|e| e.name == name)
    }

    /// Match a log entry's `topics[0]` against the declared events.
    ///
    /// Returns `None` for signatures this schema does not know — callers skip
    /// such entries to stay forward-compatible with future contract events.
    pub fn event_for_topic0(&self, topic0: B256) -> Option<&Event> {
        let name = self.events_by_topic0.get(&topic0)?;
        self.event(name)
    }

    /// The signature hash (topic 0) of a declared event, if present.
    pub fn event_topic0(&self, name: &str) -> Option<B256> {
        self.event(name).map(|e| e.selector())
    }
}
