//! Call encoding: typed arguments → calldata bytes.

use alloy_dyn_abi::{DynSolValue, Specifier};
use evmbind_core::{AbiValue, BindError};

use crate::convert;
use crate::schema::AbiSchema;

impl AbiSchema {
    /// Encode a view-function call to calldata: the 4-byte selector followed
    /// by the ABI-encoded argument tuple.
    ///
    /// Arity or type mismatches against the schema's declared inputs fail
    /// with [`BindError::Encoding`] before anything touches the network.
    pub fn encode_call(
        &self,
        function: &str,
        args: &[AbiValue],
    ) -> Result<Vec<u8>, BindError> {
        let func = self.function(function).ok_or_else(|| {
            BindError::encoding(format!("`{function}`"), "function not declared in ABI schema")
        })?;

        if args.len() != func.inputs.len() {
            return Err(BindError::encoding(
                format!("`{function}`"),
                format!(
                    "argument count mismatch: schema declares {}, got {}",
                    func.inputs.len(),
                    args.len()
                ),
            ));
        }

        let mut values = Vec::with_capacity(args.len());
        for (param, arg) in func.inputs.iter().zip(args) {
            let ty = param.resolve().map_err(|e| {
                BindError::encoding(format!("`{function}` param `{}`", param.name), e)
            })?;
            let value = convert::to_dyn(arg, &ty).map_err(|e| {
                BindError::encoding(format!("`{function}` param `{}`", param.name), e)
            })?;
            values.push(value);
        }

        let mut calldata = func.selector().to_vec();
        calldata.extend_from_slice(&DynSolValue::Tuple(values).abi_encode_params());
        Ok(calldata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, U256};

    const ABI: &str = r#"[
        {"type":"function","name":"balanceOf","stateMutability":"view",
            "inputs":[{"name":"account","type":"address"}],
            "outputs":[{"name":"","type":"uint256"}]},
        {"type":"function","name":"allowance","stateMutability":"view",
            "inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],
            "outputs":[{"name":"","type":"uint256"}]},
        {"type":"function","name":"decimals","stateMutability":"view",
            "inputs":[],"outputs":[{"name":"","type":"uint8"}]}
    ]"#;

    fn holder() -> Address {
        "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse().unwrap()
    }

    #[test]
    fn encode_balance_of() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let calldata = schema
            .encode_call("balanceOf", &[holder().into()])
            .unwrap();
        // keccak256("balanceOf(address)")[..4] = 0x70a08231
        assert_eq!(hex::encode(&calldata[..4]), "70a08231");
        assert_eq!(calldata.len(), 4 + 32);
        // address is right-aligned in the 32-byte word
        assert_eq!(&calldata[16..36], holder().as_slice());
    }

    #[test]
    fn encode_no_args() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let calldata = schema.encode_call("decimals", &[]).unwrap();
        assert_eq!(calldata.len(), 4);
    }

    #[test]
    fn arity_mismatch_is_encoding_error() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let err = schema.encode_call("allowance", &[holder().into()]).unwrap_err();
        assert!(matches!(err, BindError::Encoding { .. }));
    }

    #[test]
    fn type_mismatch_is_encoding_error() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let err = schema
            .encode_call("balanceOf", &[AbiValue::Uint(U256::from(1u64))])
            .unwrap_err();
        assert!(matches!(err, BindError::Encoding { .. }));
    }

    #[test]
    fn unknown_function_is_encoding_error() {
        let schema = AbiSchema::parse(ABI).unwrap();
        let err = schema.encode_call("transfer", &[]).unwrap_err();
        assert!(matches!(err, BindError::Encoding { .. }));
    }
}
