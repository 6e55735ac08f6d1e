//! The enumerable extension of the non-fungible-token capability.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evmbind_abi::AbiSchema;
use evmbind_core::BindError;
use evmbind_rpc::EthClient;

use crate::erc721::Erc721;
use crate::handle::ContractHandle;

/// The ERC-721 surface plus the enumeration extension.
pub const ERC721_ENUMERABLE_ABI: &str = r#"[
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
{"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"tokenId","type":"uint256","indexed":true}]},
{"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"approved","type":"address","indexed":true},{"name":"tokenId","type":"uint256","indexed":true}]},
{"type":"event","name":"ApprovalForAll","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"operator","type":"address","indexed":true},{"name":"approved","type":"bool","indexed":false}]}
]"#;

/// Non-fungible-token views plus collection enumeration.
///
/// Holds the base capability explicitly; the base views are reached through
/// [`Erc721Enumerable::erc721`]. Events are the base set, so event dispatch
/// goes through [`crate::erc721::dispatch_erc721_events`].
#[derive(Clone)]
pub struct Erc721Enumerable {
    erc721: Erc721,
    handle: ContractHandle,
}

impl Erc721Enumerable {
    /// Bind the enumerable ERC-721 interface at `address`. No network
    /// activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(ERC721_ENUMERABLE_ABI)?);
        Ok(Self::with_schema(client, address, schema))
    }

    pub fn with_schema(
        client: Arc<EthClient>,
        address: Address,
        schema: Arc<AbiSchema>,
    ) -> Self {
        Self {
            erc721: Erc721::with_schema(client.clone(), address, schema.clone()),
            handle: ContractHandle::new(client, address, schema),
        }
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// The base non-fungible-token views.
    pub fn erc721(&self) -> &Erc721 {
        &self.erc721
    }

    /// The number of tokens tracked by the contract.
    pub async fn total_supply(&self) -> Result<U256, BindError> {
        self.handle.call_view("totalSupply", &[]).await?.uint(0)
    }

    /// The token at `index` in the global enumeration.
    pub async fn token_by_index(&self, index: U256) -> Result<U256, BindError> {
        self.handle
            .call_view("tokenByIndex", &[index.into()])
            .await?
            .uint(0)
    }

    /// The token at `index` of the tokens owned by `owner`.
    pub async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, BindError> {
        self.handle
            .call_view("tokenOfOwnerByIndex", &[owner.into(), index.into()])
            .await?
            .uint(0)
    }
}
