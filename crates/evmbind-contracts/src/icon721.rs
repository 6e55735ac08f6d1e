//! Binding for the ICON721 collection.

use std::sync::Arc;

use alloy_primitives::Address;
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::enumerable::Erc721Enumerable;
use crate::erc721::Erc721Events;
use crate::handle::ContractHandle;
use crate::ownable::{Ownable, OwnableEvents};

/// The deployed ICON721 surface: the enumerable non-fungible-token and
/// ownership interfaces plus the per-wallet allocation view.
pub const ICON721_ABI: &str = r#"[
{"type":"function","name":"name","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"symbol","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"tokenURI","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"ownerOf","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"getApproved","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"isApprovedForAll","stateMutability":"view","inputs":[{"name":"owner","type":"address"},{"name":"operator","type":"address"}],"outputs":[{"name":"","type":"bool"}]},
{"type":"function","name":"totalSupply","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"tokenByIndex","stateMutability":"view","inputs":[{"name":"index","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"tokenOfOwnerByIndex","stateMutability":"view","inputs":[{"name":"owner","type":"address"},{"name":"index","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"owner","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"infoWallet","stateMutability":"view","inputs":[{"name":"wallet","type":"address"}],"outputs":[{"name":"allocated","type":"uint16"},{"name":"remainingAllocation","type":"uint16"}]},
{"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"tokenId","type":"uint256","indexed":true}]},
{"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"approved","type":"address","indexed":true},{"name":"tokenId","type":"uint256","indexed":true}]},
{"type":"event","name":"ApprovalForAll","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"operator","type":"address","indexed":true},{"name":"approved","type":"bool","indexed":false}]},
{"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]}
]"#;

/// Mint allocation of one wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletAllocation {
    pub allocated: u16,
    pub remaining_allocation: u16,
}

/// The ICON721 collection: enumerable non-fungible-token and ownership
/// capabilities over one shared schema, plus the allocation view.
#[derive(Clone)]
pub struct Icon721 {
    enumerable: Erc721Enumerable,
    ownable: Ownable,
    handle: ContractHandle,
}

impl Icon721 {
    /// Bind the ICON721 contract at `address`. Parses the embedded schema
    /// once; no network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(ICON721_ABI)?);
        Ok(Self {
            enumerable: Erc721Enumerable::with_schema(client.clone(), address, schema.clone()),
            ownable: Ownable::with_schema(client.clone(), address, schema.clone()),
            handle: ContractHandle::new(client, address, schema),
        })
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// The enumerable non-fungible-token views.
    pub fn erc721(&self) -> &Erc721Enumerable {
        &self.enumerable
    }

    /// The ownership views.
    pub fn ownable(&self) -> &Ownable {
        &self.ownable
    }

    /// The schema shared by every capability of this binding.
    pub fn schema(&self) -> &Arc<AbiSchema> {
        self.handle.schema()
    }

    /// The mint allocation of `wallet`.
    pub async fn info_wallet(&self, wallet: Address) -> Result<WalletAllocation, BindError> {
        let returns = self.handle.call_view("infoWallet", &[wallet.into()]).await?;
        Ok(WalletAllocation {
            allocated: returns.u16(0)?,
            remaining_allocation: returns.u16(1)?,
        })
    }
}

/// Typed callbacks for the full ICON721 event surface. The surface is
/// exactly the union of its capabilities, so the trait adds no methods.
pub trait Icon721Events: Erc721Events + OwnableEvents {}

impl<T: Erc721Events + OwnableEvents + ?Sized> Icon721Events for T {}

/// Decode and dispatch the ICON721 events of a raw log batch, in node
/// order across all capabilities.
pub fn dispatch_icon721_events<S: Icon721Events + ?Sized>(
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
        let decoded = decode_event(event, entry)?;
        match event.name.as_str() {
            "Transfer" => sink.transfer(
                decoded.address_field("from")?,
                decoded.address_field("to")?,
                decoded.uint_field("tokenId")?,
            ),
            "Approval" => sink.approval(
                decoded.address_field("owner")?,
                decoded.address_field("approved")?,
                decoded.uint_field("tokenId")?,
            ),
            "ApprovalForAll" => sink.approval_for_all(
                decoded.address_field("owner")?,
                decoded.address_field("operator")?,
                decoded.bool_field("approved")?,
            ),
            "OwnershipTransferred" => sink.ownership_transferred(
                decoded.address_field("previousOwner")?,
                decoded.address_field("newOwner")?,
            ),
            _ => {}
        }
    }
    Ok(())
}
