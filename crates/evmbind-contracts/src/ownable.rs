//! The ownership capability.

use std::sync::Arc;

use alloy_primitives::Address;
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::handle::ContractHandle;

pub const OWNABLE_ABI: &str = r#"[
{"type":"function","name":"owner","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
{"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]}
]"#;

/// Ownership view functions.
#[derive(Clone)]
pub struct Ownable {
    handle: ContractHandle,
}

impl Ownable {
    /// Bind the ownership interface at `address`. No network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(OWNABLE_ABI)?);
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

    /// The current owner of the contract.
    pub async fn owner(&self) -> Result<Address, BindError> {
        self.handle.call_view("owner", &[]).await?.address(0)
    }
}

/// Typed callbacks for ownership events.
pub trait OwnableEvents {
    /// Ownership moved from `previous_owner` to `new_owner`.
    fn ownership_transferred(&mut self, previous_owner: Address, new_owner: Address);
}

/// Decode and dispatch the ownership events of a raw log batch.
pub fn dispatch_ownable_events<S: OwnableEvents + ?Sized>(
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
        if event.name == "OwnershipTransferred" {
            let decoded = decode_event(event, entry)?;
            sink.ownership_transferred(
                decoded.address_field("previousOwner")?,
                decoded.address_field("newOwner")?,
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{address_topic, log_entry};

    #[derive(Default)]
    struct Recorder {
        handovers: Vec<(Address, Address)>,
    }

    impl OwnableEvents for Recorder {
        fn ownership_transferred(&mut self, previous_owner: Address, new_owner: Address) {
            self.handovers.push((previous_owner, new_owner));
        }
    }

    #[test]
    fn ownership_transferred_decodes_both_topics() {
        let schema = AbiSchema::parse(OWNABLE_ABI).unwrap();
        let entry = log_entry(
            &[
                "0x8be0079c531659141344cd1fd0a4f28419497f9722a3daafe3b4186f6b6457e0",
                &address_topic("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
                &address_topic("0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"),
            ],
            "0x",
        );

        let mut sink = Recorder::default();
        dispatch_ownable_events(&schema, &[entry], &mut sink).unwrap();
        assert_eq!(sink.handovers.len(), 1);
        assert_eq!(
            sink.handovers[0].1,
            "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B".parse::<Address>().unwrap()
        );
    }
}
