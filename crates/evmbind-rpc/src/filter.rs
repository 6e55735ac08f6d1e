//! Log-filter registration arguments.
//!
//! [`FilterQuery`] builds the parameter object for `eth_newFilter`. The JSON
//! shape mirrors the node's filter-registration schema exactly — any
//! deviation breaks interoperability:
//!
//! `{fromBlock, toBlock, address?: Address | Address[], topics?: (null |
//! Hash | Hash[])[]}`
//!
//! with singleton sets collapsed to scalars and `null` as the positional
//! wildcard.

use alloy_primitives::{Address, B256};
use serde_json::{json, Map, Value};

/// One positional topic constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    /// Matches anything at this position.
    Any,
    /// Exact match on one hash.
    Exact(B256),
    /// Logical OR over several hashes at this position.
    OneOf(Vec<B256>),
}

/// Builder for the `eth_newFilter` parameter object.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    from_block: String,
    to_block: String,
    addresses: Vec<Address>,
    topics: Vec<TopicFilter>,
}

impl FilterQuery {
    /// A query over the given block range. Each bound is either a decimal
    /// block number or a symbolic tag such as `"latest"` or `"pending"`,
    /// passed through to the node verbatim.
    pub fn new(from_block: impl Into<String>, to_block: impl Into<String>) -> Self {
        Self {
            from_block: from_block.into(),
            to_block: to_block.into(),
            addresses: Vec::new(),
            topics: Vec::new(),
        }
    }

    /// Restrict to logs emitted by `address`. May be called repeatedly.
    pub fn address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Append one positional topic constraint.
    pub fn topic(mut self, filter: TopicFilter) -> Self {
        self.topics.push(filter);
        self
    }

    /// Render the JSON parameter object for filter registration.
    pub fn to_param(&self) -> Value {
        let mut arg = Map::new();
        arg.insert("fromBlock".into(), json!(self.from_block));
        arg.insert("toBlock".into(), json!(self.to_block));

        match self.addresses.as_slice() {
            [] => {}
            [single] => {
                arg.insert("address".into(), json!(single));
            }
            many => {
                arg.insert("address".into(), json!(many));
            }
        }

        if !self.topics.is_empty() {
            let topics: Vec<Value> = self
                .topics
                .iter()
                .map(|t| match t {
                    TopicFilter::Any => Value::Null,
                    TopicFilter::Exact(h) => json!(h),
                    // An empty OR-set constrains nothing; a singleton
                    // collapses to a scalar, like the address field.
                    TopicFilter::OneOf(hs) => match hs.as_slice() {
                        [] => Value::Null,
                        [single] => json!(single),
                        many => json!(many),
                    },
                })
                .collect();
            arg.insert("topics".into(), Value::Array(topics));
        }

        Value::Object(arg)
    }
}
