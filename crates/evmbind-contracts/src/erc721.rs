//! The non-fungible-token (ERC-721) capability.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::handle::ContractHandle;

/// ERC-721 view functions (including the metadata extension) and events.
pub const ERC721_ABI: &str = r#"[
{"type":"function","name":"name","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"symbol","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"tokenURI","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"ownerOf","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"getApproved","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"isApprovedForAll","stateMutability":"view","inputs":[{"name":"owner","type":"address"},{"name":"operator","type":"address"}],"outputs":[{"name":"","type":"bool"}]},
{"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"tokenId","type":"uint256","indexed":true}]},
{"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"approved","type":"address","indexed":true},{"name":"tokenId","type":"uint256","indexed":true}]},
{"type":"event","name":"ApprovalForAll","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"operator","type":"address","indexed":true},{"name":"approved","type":"bool","indexed":false}]}
]"#;

/// Non-fungible-token view functions.
#[derive(Clone)]
pub struct Erc721 {
    handle: ContractHandle,
}

impl Erc721 {
    /// Bind the standard ERC-721 interface at `address`. No network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(ERC721_ABI)?);
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

    /// The collection name.
    pub async fn name(&self) -> Result<String, BindError> {
        self.handle.call_view("name", &[]).await?.string(0)
    }

    /// The collection symbol.
    pub async fn symbol(&self) -> Result<String, BindError> {
        self.handle.call_view("symbol", &[]).await?.string(0)
    }

    /// The metadata URI for `token_id`.
    pub async fn token_uri(&self, token_id: U256) -> Result<String, BindError> {
        self.handle
            .call_view("tokenURI", &[token_id.into()])
            .await?
            .string(0)
    }

    /// The number of tokens in `owner`'s account.
    pub async fn balance_of(&self, owner: Address) -> Result<U256, BindError> {
        self.handle
            .call_view("balanceOf", &[owner.into()])
            .await?
            .uint(0)
    }

    /// The owner of `token_id`.
    pub async fn owner_of(&self, token_id: U256) -> Result<Address, BindError> {
        self.handle
            .call_view("ownerOf", &[token_id.into()])
            .await?
            .address(0)
    }

    /// The account approved for `token_id`.
    pub async fn get_approved(&self, token_id: U256) -> Result<Address, BindError> {
        self.handle
            .call_view("getApproved", &[token_id.into()])
            .await?
            .address(0)
    }

    /// Whether `operator` may manage all of `owner`'s assets.
    pub async fn is_approved_for_all(
        &self,
        owner: Address,
        operator: Address,
    ) -> Result<bool, BindError> {
        self.handle
            .call_view("isApprovedForAll", &[owner.into(), operator.into()])
            .await?
            .boolean(0)
    }
}

/// Typed callbacks for non-fungible-token events.
pub trait Erc721Events {
    /// `token_id` was transferred from `from` to `to`.
    fn transfer(&mut self, from: Address, to: Address, token_id: U256);

    /// `owner` enabled `approved` to manage `token_id`.
    fn approval(&mut self, owner: Address, approved: Address, token_id: U256);

    /// `owner` enabled or disabled `operator` for all of its assets.
    fn approval_for_all(&mut self, owner: Address, operator: Address, approved: bool);
}

/// Decode and dispatch the non-fungible-token events of a raw log batch.
pub fn dispatch_erc721_events<S: Erc721Events + ?Sized>(
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
                    decoded.uint_field("tokenId")?,
                );
            }
            "Approval" => {
                let decoded = decode_event(event, entry)?;
                sink.approval(
                    decoded.address_field("owner")?,
                    decoded.address_field("approved")?,
                    decoded.uint_field("tokenId")?,
                );
            }
            "ApprovalForAll" => {
                let decoded = decode_event(event, entry)?;
                sink.approval_for_all(
                    decoded.address_field("owner")?,
                    decoded.address_field("operator")?,
                    decoded.bool_field("approved")?,
                );
            }
            _ => {}
        }
    }
    Ok(())
}
