//! Conversions between [`AbiValue`] and alloy's `DynSolValue`.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::B256;
use evmbind_core::AbiValue;

/// Convert a decoded `DynSolValue` into an [`AbiValue`].
pub fn from_dyn(val: DynSolValue) -> AbiValue {
    match val {
        DynSolValue::Bool(b) => AbiValue::Bool(b),
        DynSolValue::Uint(u, _) => AbiValue::Uint(u),
        DynSolValue::Int(i, _) => AbiValue::Int(i),
        DynSolValue::Address(a) => AbiValue::Address(a),
        DynSolValue::FixedBytes(word, _) => AbiValue::FixedBytes(word),
        DynSolValue::Bytes(b) => AbiValue::Bytes(b),
        DynSolValue::String(s) => AbiValue::Str(s),
        DynSolValue::Array(vals) | DynSolValue::FixedArray(vals) => {
            AbiValue::Array(vals.into_iter().map(from_dyn).collect())
        }
        DynSolValue::Tuple(fields) => {
            AbiValue::Tuple(fields.into_iter().map(from_dyn).collect())
        }
        // Function selectors never appear in the interfaces we bind; keep the
        // raw bytes rather than failing.
        DynSolValue::Function(f) => AbiValue::Bytes(f.as_slice().to_vec()),
    }
}

/// Convert an [`AbiValue`] into the `DynSolValue` the ABI expects.
///
/// Fails when the value's family does not match the declared type, e.g. a
/// string where the schema declares `uint256`.
pub fn to_dyn(val: &AbiValue, expected: &DynSolType) -> Result<DynSolValue, String> {
    match (val, expected) {
        (AbiValue::Bool(b), DynSolType::Bool) => Ok(DynSolValue::Bool(*b)),
        (AbiValue::Uint(u), DynSolType::Uint(bits)) => Ok(DynSolValue::Uint(*u, *bits)),
        (AbiValue::Int(i), DynSolType::Int(bits)) => Ok(DynSolValue::Int(*i, *bits)),
        (AbiValue::Address(a), DynSolType::Address) => Ok(DynSolValue::Address(*a)),
        (AbiValue::Str(s), DynSolType::String) => Ok(DynSolValue::String(s.clone())),
        (AbiValue::Bytes(b), DynSolType::Bytes) => Ok(DynSolValue::Bytes(b.clone())),

        (AbiValue::FixedBytes(word), DynSolType::FixedBytes(n)) => {
            Ok(DynSolValue::FixedBytes(*word, *n))
        }
        (AbiValue::Bytes(b), DynSolType::FixedBytes(n)) => {
            if b.len() > *n {
                return Err(format!("bytes{n}: got {} bytes", b.len()));
            }
            let mut word = B256::ZERO;
            word[..b.len()].copy_from_slice(b);
            Ok(DynSolValue::FixedBytes(word, *n))
        }

        (AbiValue::Array(elems), DynSolType::Array(inner)) => {
            let vals: Result<Vec<_>, _> = elems.iter().map(|e| to_dyn(e, inner)).collect();
            Ok(DynSolValue::Array(vals?))
        }
        (AbiValue::Array(elems), DynSolType::FixedArray(inner, len)) => {
            if elems.len() != *len {
                return Err(format!(
                    "fixed array length mismatch: expected {len}, got {}",
                    elems.len()
                ));
            }
            let vals: Result<Vec<_>, _> = elems.iter().map(|e| to_dyn(e, inner)).collect();
            Ok(DynSolValue::FixedArray(vals?))
        }
        (AbiValue::Tuple(fields), DynSolType::Tuple(types)) => {
            if fields.len() != types.len() {
                return Err(format!(
                    "tuple arity mismatch: expected {}, got {}",
                    types.len(),
                    fields.len()
                ));
            }
            let vals: Result<Vec<_>, _> = fields
                .iter()
                .zip(types.iter())
                .map(|(v, t)| to_dyn(v, t))
                .collect();
            Ok(DynSolValue::Tuple(vals?))
        }

        _ => Err(format!("cannot encode {} as {expected}", val.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    #[test]
    fn roundtrip_uint() {
        let dyn_val = to_dyn(&AbiValue::Uint(U256::from(42u64)), &DynSolType::Uint(256)).unwrap();
        assert_eq!(from_dyn(dyn_val), AbiValue::Uint(U256::from(42u64)));
    }

    #[test]
    fn roundtrip_address() {
        let addr: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let dyn_val = to_dyn(&AbiValue::Address(addr), &DynSolType::Address).unwrap();
        assert_eq!(from_dyn(dyn_val), AbiValue::Address(addr));
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let err = to_dyn(&AbiValue::Str("hi".into()), &DynSolType::Uint(256)).unwrap_err();
        assert!(err.contains("string"));
    }
}
