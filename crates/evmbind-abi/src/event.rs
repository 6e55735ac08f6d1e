//! Event-log decoding.
//!
//! One [`FilterChange`] decodes against a matched ABI event in two parts:
//! indexed fields come positionally from `topics[1..]` (each a fixed-width
//! 32-byte value), non-indexed fields from ABI-unpacking `data` against the
//! event's non-indexed type list. The decoded fields are reassembled in the
//! event's declaration order.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_json_abi::Event;
use alloy_primitives::{Address, B256, U256};
use evmbind_core::{AbiValue, BindError, FilterChange};

use crate::convert;

/// A typed event payload decoded from one raw log entry. Transient: handed
/// straight to a callback, not retained.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    pub name: String,
    /// Field name → value, in declaration order.
    pub fields: Vec<(String, AbiValue)>,
}

impl DecodedEvent {
    pub fn field(&self, name: &str) -> Option<&AbiValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn typed<T>(
        &self,
        name: &str,
        wanted: &str,
        get: impl FnOnce(&AbiValue) -> Option<T>,
    ) -> Result<T, BindError> {
        let v = self.field(name).ok_or_else(|| {
            BindError::decoding(
                format!("event `{}` field `{name}`", self.name),
                "field not present",
            )
        })?;
        get(v).ok_or_else(|| {
            BindError::decoding(
                format!("event `{}` field `{name}`", self.name),
                format!("expected {wanted}, got {}", v.type_name()),
            )
        })
    }

    pub fn address_field(&self, name: &str) -> Result<Address, BindError> {
        self.typed(name, "address", AbiValue::as_address)
    }

    pub fn uint_field(&self, name: &str) -> Result<U256, BindError> {
        self.typed(name, "uint", AbiValue::as_uint)
    }

    pub fn bool_field(&self, name: &str) -> Result<bool, BindError> {
        self.typed(name, "bool", AbiValue::as_bool)
    }

    /// A `uint` field narrowed to `u16`; overflow is a decoding error.
    pub fn u16_field(&self, name: &str) -> Result<u16, BindError> {
        let u = self.uint_field(name)?;
        u16::try_from(u)
            .map_err(|e| BindError::decoding(format!("event `{}` field `{name}`", self.name), e))
    }

    /// A `uint` field narrowed to `u8`; overflow is a decoding error.
    pub fn u8_field(&self, name: &str) -> Result<u8, BindError> {
        let u = self.uint_field(name)?;
        u8::try_from(u)
            .map_err(|e| BindError::decoding(format!("event `{}` field `{name}`", self.name), e))
    }
}

/// Decode a raw log entry against the event its `topics[0]` matched.
///
/// A shortfall of topics against the event's indexed-field count is a
/// [`BindError::Validation`] identifying the malformed entry — callers abort
/// the whole batch rather than deliver a partial one.
pub fn decode_event(event: &Event, entry: &FilterChange) -> Result<DecodedEvent, BindError> {
    let indexed_count = event.inputs.iter().filter(|p| p.indexed).count();
    if entry.topics.len() < indexed_count + 1 {
        return Err(BindError::Validation {
            event: event.name.clone(),
            block_number: entry.block_number.to::<u64>(),
            log_index: entry.log_index.to::<u64>(),
            expected: indexed_count + 1,
            got: entry.topics.len(),
        });
    }

    // Non-indexed fields: one ABI-encoded tuple in `data`, declared order.
    let data_params: Vec<_> = event.inputs.iter().filter(|p| !p.indexed).collect();
    let mut data_values = decode_data_fields(event, &data_params, &entry.data)?.into_iter();

    // Reassemble in declaration order, pulling indexed values from topics.
    let mut fields = Vec::with_capacity(event.inputs.len());
    let mut topic_idx = 1;
    for (i, param) in event.inputs.iter().enumerate() {
        let name = if param.name.is_empty() {
            format!("arg{i}")
        } else {
            param.name.clone()
        };
        let value = if param.indexed {
            let topic = entry.topics[topic_idx];
            topic_idx += 1;
            let ty = param.resolve().map_err(|e| {
                BindError::decoding(format!("event `{}` field `{name}`", event.name), e)
            })?;
            decode_topic(&event.name, &name, topic, &ty)?
        } else {
            // decode_data_fields yielded exactly one value per data param
            match data_values.next() {
                Some(v) => v,
                None => {
                    return Err(BindError::decoding(
                        format!("event `{}` field `{name}`", event.name),
                        "data payload shorter than declared non-indexed fields",
                    ))
                }
            }
        };
        fields.push((name, value));
    }

    Ok(DecodedEvent {
        name: event.name.clone(),
        fields,
    })
}

fn decode_data_fields(
    event: &Event,
    params: &[&alloy_json_abi::EventParam],
    data: &[u8],
) -> Result<Vec<AbiValue>, BindError> {
    if params.is_empty() {
        return Ok(Vec::new());
    }

    let mut types = Vec::with_capacity(params.len());
    for param in params {
        let ty = param.resolve().map_err(|e| {
            BindError::decoding(format!("event `{}` field `{}`", event.name, param.name), e)
        })?;
        types.push(ty);
    }

    let decoded = DynSolType::Tuple(types)
        .abi_decode_params(data)
        .map_err(|e| {
            BindError::decoding(
                format!("event `{}` data ({} bytes)", event.name, data.len()),
                e,
            )
        })?;

    Ok(match decoded {
        DynSolValue::Tuple(vals) => vals.into_iter().map(convert::from_dyn).collect(),
        other => vec![convert::from_dyn(other)],
    })
}

/// Decode one indexed topic (always a 32-byte word).
///
/// Value types (uint, int, bool, address, bytesN) are padded into the word
/// and recoverable. Reference types (string, bytes, arrays, tuples) are
/// stored as the keccak256 of their encoding — the original value is gone,
/// so the raw hash is returned as fixed bytes.
fn decode_topic(
    event: &str,
    field: &str,
    topic: B256,
    ty: &DynSolType,
) -> Result<AbiValue, BindError> {
    match ty {
        DynSolType::String
        | DynSolType::Bytes
        | DynSolType::Array(_)
        | DynSolType::FixedArray(..)
        | DynSolType::Tuple(_) => Ok(AbiValue::FixedBytes(topic)),
        _ => ty
            .abi_decode(topic.as_slice())
            .map(convert::from_dyn)
            .map_err(|e| {
                BindError::decoding(format!("event `{event}` indexed field `{field}`"), e)
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AbiSchema;
    use serde_json::json;

    const ABI: &str = r#"[
        {"type":"event","name":"Transfer","anonymous":false,"inputs":[
            {"name":"from","type":"address","indexed":true},
            {"name":"to","type":"address","indexed":true},
            {"name":"value","type":"uint256","indexed":false}]},
        {"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[
            {"name":"previousOwner","type":"address","indexed":true},
            {"name":"newOwner","type":"address","indexed":true}]}
    ]"#;

    fn entry(topics: Vec<&str>, data: &str) -> FilterChange {
        serde_json::from_value(json!({
            "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
            "topics": topics,
            "data": data,
            "blockNumber": "0x3e8",
            "transactionHash": "0x6afc8cd6d2b9e87f0f1c8d2f4a8c6b3b61b92e1f9c39d10d38e7f4d0b8d9a111",
            "transactionIndex": "0x0",
            "blockHash": "0x23f9cbdfae01d9fdc1e88add34a4c4e04b1ab7a9ac4d09d5aa60fa3c02b0e5ac",
            "logIndex": "0x2",
            "removed": false
        }))
        .unwrap()
    }

    #[test]
    fn decode_transfer_log() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let event = schema.event("Transfer").unwrap();
        let entry = entry(
            vec![
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
                "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b",
            ],
            // value = 1000000000000000000
            "0x0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        );

        let decoded = decode_event(event, &entry).unwrap();
        assert_eq!(decoded.name, "Transfer");
        assert_eq!(
            decoded.address_field("from").unwrap(),
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(
            decoded.uint_field("value").unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn short_topics_is_validation_error() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let event = schema.event("OwnershipTransferred").unwrap();
        // requires 1 + 2 topics, only 2 supplied
        let entry = entry(
            vec![
                "0x8be0079c531659141344cd1fd0a4f28419497f9722a3daafe3b4186f6b6457e0",
                "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            ],
            "0x",
        );

        let err = decode_event(event, &entry).unwrap_err();
        match err {
            BindError::Validation {
                event,
                expected,
                got,
                log_index,
                ..
            } => {
                assert_eq!(event, "OwnershipTransferred");
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
                assert_eq!(log_index, 2);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn garbage_data_is_decoding_error() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let event = schema.event("Transfer").unwrap();
        let entry = entry(
            vec![
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
                "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b",
            ],
            "0x0badc0de",
        );
        assert!(matches!(
            decode_event(event, &entry),
            Err(BindError::Decoding { .. })
        ));
    }
}
