//! The pause-control capability.

use std::sync::Arc;

use alloy_primitives::Address;
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::handle::ContractHandle;

pub const PAUSABLE_ABI: &str = r#"[
{"type":"function","name":"paused","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"bool"}]},
{"type":"event","name":"Paused","anonymous":false,"inputs":[{"name":"account","type":"address","indexed":false}]},
{"type":"event","name":"Unpaused","anonymous":false,"inputs":[{"name":"account","type":"address","indexed":false}]}
]"#;

/// Pause-control view functions.
#[derive(Clone)]
pub struct Pausable {
    handle: ContractHandle,
}

impl Pausable {
    /// Bind the pause-control interface at `address`. No network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(PAUSABLE_ABI)?);
        Ok(Self::with_schema(client, address, schema))
    }

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

    /// Whether the contract is currently paused.
    pub async fn paused(&self) -> Result<bool, BindError> {
        self.handle.call_view("paused", &[]).await?.boolean(0)
    }
}

/// Typed callbacks for pause-control events.
pub trait PausableEvents {
    /// The pause was triggered by `account`.
    fn paused(&mut self, account: Address);

    /// The pause was lifted by `account`.
    fn unpaused(&mut self, account: Address);
}

/// Decode and dispatch the pause-control events of a raw log batch.
pub fn dispatch_pausable_events<S: PausableEvents + ?Sized>(
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
            "Paused" => {
                let decoded = decode_event(event, entry)?;
                sink.paused(decoded.address_field("account")?);
            }
            "Unpaused" => {
                let decoded = decode_event(event, entry)?;
                sink.unpaused(decoded.address_field("account")?);
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

    #[derive(Default)]
    struct Recorder {
        paused_by: Vec<Address>,
        unpaused_by: Vec<Address>,
    }

    impl PausableEvents for Recorder {
        fn paused(&mut self, account: Address) {
            self.paused_by.push(account);
        }

        fn unpaused(&mut self, account: Address) {
            self.unpaused_by.push(account);
        }
    }

    #[test]
    fn account_is_carried_in_data_not_topics() {
        let schema = AbiSchema::parse(PAUSABLE_ABI).unwrap();
        let paused = log_entry(
            &["0x62e78cea01bee320cd4e420270b5ea74000d11b0c9f74754ebdbfc544b05a258"],
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
        );
        let unpaused = log_entry(
            &["0x5db9ee0a495bf2e6ff9c91a7834c1ba4fdd244a5e8aa4e537bd38aeae4b073aa"],
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
        );

        let mut sink = Recorder::default();
        dispatch_pausable_events(&schema, &[paused, unpaused], &mut sink).unwrap();
        assert_eq!(sink.paused_by.len(), 1);
        assert_eq!(sink.unpaused_by.len(), 1);
        assert_eq!(
            sink.paused_by[0],
            "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse::<Address>().unwrap()
        );
    }
}
