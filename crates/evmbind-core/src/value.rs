//! Dynamic ABI values.
//!
//! [`AbiValue`] is the typed-but-dynamic currency between contract façades
//! and the ABI codec: call arguments are built from it and decoded results
//! and event fields come back as it. Façades convert to concrete Rust types
//! at their own seams.

use alloy_primitives::{Address, B256, I256, U256};

/// A single ABI-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum AbiValue {
    Address(Address),
    Uint(U256),
    Int(I256),
    Bool(bool),
    /// `bytes1`..`bytes32`, left-aligned in a 32-byte word.
    FixedBytes(B256),
    Bytes(Vec<u8>),
    Str(String),
    Array(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[AbiValue]> {
        match self {
            Self::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// The ABI type family, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Address(_) => "address",
            Self::Uint(_) => "uint",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::FixedBytes(_) => "fixed bytes",
            Self::Bytes(_) => "bytes",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Tuple(_) => "tuple",
        }
    }
}

impl From<Address> for AbiValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<U256> for AbiValue {
    fn from(u: U256) -> Self {
        Self::Uint(u)
    }
}

impl From<u64> for AbiValue {
    fn from(u: u64) -> Self {
        Self::Uint(U256::from(u))
    }
}

impl From<bool> for AbiValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for AbiValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for AbiValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}
