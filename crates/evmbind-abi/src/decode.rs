//! Result decoding: raw return bytes → typed values.

use alloy_dyn_abi::{DynSolType, DynSolValue, Specifier};
use alloy_primitives::{Address, U256};
use evmbind_core::{AbiValue, BindError};

use crate::convert;
use crate::schema::AbiSchema;

/// The decoded output tuple of one view-function call, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct Returns(Vec<AbiValue>);

impl Returns {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AbiValue> {
        self.0.get(index)
    }

    fn expect(&self, index: usize, wanted: &str) -> Result<&AbiValue, BindError> {
        self.0.get(index).ok_or_else(|| {
            BindError::decoding(
                format!("return value {index}"),
                format!("expected {wanted}, but only {} values returned", self.0.len()),
            )
        })
    }

    fn mismatch(index: usize, wanted: &str, got: &AbiValue) -> BindError {
        BindError::decoding(
            format!("return value {index}"),
            format!("expected {wanted}, got {}", got.type_name()),
        )
    }

    pub fn uint(&self, index: usize) -> Result<U256, BindError> {
        let v = self.expect(index, "uint")?;
        v.as_uint().ok_or_else(|| Self::mismatch(index, "uint", v))
    }

    /// A `uint` narrowed to `u64`; overflow is a decoding error.
    pub fn u64(&self, index: usize) -> Result<u64, BindError> {
        let u = self.uint(index)?;
        u64::try_from(u).map_err(|e| BindError::decoding(format!("return value {index}"), e))
    }

    /// A `uint` narrowed to `u16`; overflow is a decoding error.
    pub fn u16(&self, index: usize) -> Result<u16, BindError> {
        let u = self.uint(index)?;
        u16::try_from(u).map_err(|e| BindError::decoding(format!("return value {index}"), e))
    }

    /// A `uint` narrowed to `u8`; overflow is a decoding error.
    pub fn u8(&self, index: usize) -> Result<u8, BindError> {
        let u = self.uint(index)?;
        u8::try_from(u).map_err(|e| BindError::decoding(format!("return value {index}"), e))
    }

    pub fn address(&self, index: usize) -> Result<Address, BindError> {
        let v = self.expect(index, "address")?;
        v.as_address()
            .ok_or_else(|| Self::mismatch(index, "address", v))
    }

    pub fn boolean(&self, index: usize) -> Result<bool, BindError> {
        let v = self.expect(index, "bool")?;
        v.as_bool().ok_or_else(|| Self::mismatch(index, "bool", v))
    }

    pub fn string(&self, index: usize) -> Result<String, BindError> {
        let v = self.expect(index, "string")?;
        v.as_str()
            .map(str::to_owned)
            .ok_or_else(|| Self::mismatch(index, "string", v))
    }

    pub fn tuple(&self, index: usize) -> Result<&[AbiValue], BindError> {
        let v = self.expect(index, "tuple")?;
        v.as_tuple()
            .ok_or_else(|| Self::mismatch(index, "tuple", v))
    }
}

impl AbiSchema {
    /// Decode the raw bytes returned by `eth_call` against the function's
    /// declared output tuple.
    ///
    /// Length or shape mismatches fail with [`BindError::Decoding`].
    pub fn decode_result(&self, function: &str, data: &[u8]) -> Result<Returns, BindError> {
        let func = self.function(function).ok_or_else(|| {
            BindError::decoding(format!("`{function}`"), "function not declared in ABI schema")
        })?;

        if func.outputs.is_empty() {
            return Ok(Returns(Vec::new()));
        }

        let mut output_types = Vec::with_capacity(func.outputs.len());
        for param in &func.outputs {
            let ty = param.resolve().map_err(|e| {
                BindError::decoding(format!("`{function}` output `{}`", param.name), e)
            })?;
            output_types.push(ty);
        }

        let decoded = DynSolType::Tuple(output_types)
            .abi_decode_params(data)
            .map_err(|e| {
                BindError::decoding(
                    format!("`{function}` result ({} bytes)", data.len()),
                    e,
                )
            })?;

        let values = match decoded {
            DynSolValue::Tuple(vals) => vals,
            other => vec![other],
        };

        Ok(Returns(values.into_iter().map(convert::from_dyn).collect()))
    }
}
