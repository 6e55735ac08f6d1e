//! The fungible-token (ERC-20) capability.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::handle::ContractHandle;

/// ERC-20 view functions and events, as embedded at build time.
pub const ERC20_ABI: &str = r#"[
{"type":"function","name":"name","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"symbol","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"decimals","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint8"}]},
{"type":"function","name":"totalSupply","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"allowance","stateMutability":"view","inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
{"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

/// Fungible-token view functions.
///
/// All amounts are raw integer quantities; see [`scale_amount`] for the
/// explicit, separately-fallible human-readable scaling step.
#[derive(Clone)]
pub struct Erc20 {
    handle: ContractHandle,
}

impl Erc20 {
    /// Bind the standard ERC-20 interface at `address`. Parses the embedded
    /// schema; no network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(ERC20_ABI)?);
        Ok(Self::with_schema(client, address, schema))
    }

    /// Bind against an already-parsed schema. Used by concrete contract
    /// bindings so every capability shares the deployed contract's schema.
    pub fn with_schema(
        client: Arc<EthClient>,
        address: Address,
        schema: Arc<AbiSchema>,
    ) -> Self {
        Self {
            handle: ContractHandle::new(client, address, schema),
        }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// The name of the token.
    pub async fn name(&self) -> Result<String, BindError> {
        self.handle.call_view("name", &[]).await?.string(0)
    }

    /// The symbol of the token.
    pub async fn symbol(&self) -> Result<String, BindError> {
        self.handle.call_view("symbol", &[]).await?.string(0)
    }

    /// The decimal places of the token.
    pub async fn decimals(&self) -> Result<u8, BindError> {
        self.handle.call_view("decimals", &[]).await?.u8(0)
    }

    /// Total supply, as a raw quantity.
    pub async fn total_supply(&self) -> Result<U256, BindError> {
        self.handle.call_view("totalSupply", &[]).await?.uint(0)
    }

    /// The raw amount of tokens owned by `account`.
    pub async fn balance_of(&self, account: Address) -> Result<U256, BindError> {
        self.handle
            .call_view("balanceOf", &[account.into()])
            .await?
            .uint(0)
    }

    /// The raw remaining amount `spender` may move on behalf of `owner`.
    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, BindError> {
        self.handle
            .call_view("allowance", &[owner.into(), spender.into()])
            .await?
            .uint(0)
    }
}

/// Scale a raw token amount into its human-readable value:
/// `raw / 10^decimals`.
///
/// Deliberately a separate step: `decimals` is itself a remote call that can
/// fail independently, so callers fetch it first via [`Erc20::decimals`].
pub fn scale_amount(raw: U256, decimals: u8) -> f64 {
    let raw: f64 = raw.to_string().parse().unwrap_or(f64::INFINITY);
    raw / 10f64.powi(i32::from(decimals))
}

/// Typed callbacks for fungible-token events.
pub trait Erc20Events {
    /// `value` tokens moved from `from` to `to`.
    fn transfer(&mut self, from: Address, to: Address, value: U256);

    /// The allowance of `spender` for `owner` was set to `value`.
    fn approval(&mut self, owner: Address, spender: Address, value: U256);
}

/// Decode and dispatch the fungible-token events of a raw log batch, in
/// node order. Entries whose signature this capability does not recognize
/// are skipped; a malformed matched entry aborts the whole batch.
pub fn dispatch_erc20_events<S: Erc20Events + ?Sized>(
    schema: &AbiSchema,
    entries: &[FilterChange],
    sink: &mut S,
) -> Result<(), BindError> {
    for entry in entries {
        let Some(topic0) = entry.event_signature() else {
            continue;
        };
        let Some(event) = schema.event_for_topic0(topic0) else {
            tracing::trace!(%topic0, "skipping log with unknown event signature");
            continue;
        };
        match event.name.as_str() {
            "Transfer" => {
                let decoded = decode_event(event, entry)?;
                sink.transfer(
                    decoded.address_field("from")?,
                    decoded.address_field("to")?,
                    decoded.uint_field("value")?,
                );
            }
            "Approval" => {
                let decoded = decode_event(event, entry)?;
                sink.approval(
                    decoded.address_field("owner")?,
                    decoded.address_field("spender")?,
                    decoded.uint_field("value")?,
                );
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::log_entry;

    fn transfer_entry(value_hex: &str) -> FilterChange {
        log_entry(
            &[
                "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
                "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
                "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b",
            ],
            value_hex,
        )
    }

    #[derive(Default)]
    struct Recorder {
        transfers: Vec<(Address, Address, U256)>,
        approvals: Vec<(Address, Address, U256)>,
    }

    impl Erc20Events for Recorder {
        fn transfer(&mut self, from: Address, to: Address, value: U256) {
            self.transfers.push((from, to, value));
        }

        fn approval(&mut self, owner: Address, spender: Address, value: U256) {
            self.approvals.push((owner, spender, value));
        }
    }

    #[test]
    fn transfer_log_fires_exactly_one_callback() {
        let schema = AbiSchema::parse(ERC20_ABI).unwrap();
        // value = 1000000000000000000
        let entry = transfer_entry(
            "0x0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        );

        let mut sink = Recorder::default();
        dispatch_erc20_events(&schema, &[entry], &mut sink).unwrap();

        assert_eq!(sink.transfers.len(), 1);
        assert!(sink.approvals.is_empty());
        let (from, to, value) = sink.transfers[0];
        assert_eq!(
            from,
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse::<Address>().unwrap()
        );
        assert_eq!(
            to,
            "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B".parse::<Address>().unwrap()
        );
        assert_eq!(value, U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn unknown_signature_is_skipped_silently() {
        let schema = AbiSchema::parse(ERC20_ABI).unwrap();
        let mut entry = transfer_entry("0x");
        entry.topics[0] = alloy_primitives::B256::repeat_byte(0x42);

        let mut sink = Recorder::default();
        dispatch_erc20_events(&schema, &[entry], &mut sink).unwrap();
        assert!(sink.transfers.is_empty());
        assert!(sink.approvals.is_empty());
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let schema = AbiSchema::parse(ERC20_ABI).unwrap();
        let mut sink = Recorder::default();
        dispatch_erc20_events(&schema, &[], &mut sink).unwrap();
        assert!(sink.transfers.is_empty());
    }

    #[test]
    fn malformed_entry_aborts_the_batch() {
        let schema = AbiSchema::parse(ERC20_ABI).unwrap();
        let good = transfer_entry(
            "0x0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        );
        let mut bad = good.clone();
        bad.topics.truncate(2); // Transfer needs 3

        let mut sink = Recorder::default();
        let err = dispatch_erc20_events(&schema, &[bad, good], &mut sink).unwrap_err();
        assert!(matches!(err, BindError::Validation { .. }));
        // the later, well-formed entry was not delivered either
        assert!(sink.transfers.is_empty());
    }

    #[test]
    fn scale_amount_uses_decimals() {
        let raw = U256::from(1_500_000_000_000_000_000u64);
        let scaled = scale_amount(raw, 18);
        assert!((scaled - 1.5).abs() < 1e-12);
    }
}
