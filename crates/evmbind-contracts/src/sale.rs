//! Binding for the 2021-Q4 box sale.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{AbiValue, BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::handle::ContractHandle;
use crate::ownable::{Ownable, OwnableEvents};
use crate::pausable::{Pausable, PausableEvents};

/// The deployed sale surface: the ownership and pause-control interfaces
/// plus the sale views and the purchase event.
pub const BOX_SALE_ABI: &str = r#"[
{"type":"function","name":"_icon721Contract","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"_paymentContract","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"boxLevelOf","stateMutability":"view","inputs":[{"name":"tokenId","type":"uint256"}],"outputs":[{"name":"","type":"uint8"}]},
{"type":"function","name":"info","stateMutability":"view","inputs":[],"outputs":[{"name":"paymentContract","type":"address"},{"name":"icon721Contract","type":"address"},{"name":"common","type":"tuple","components":[{"name":"price","type":"uint256"},{"name":"totalSupply","type":"uint16"},{"name":"stock","type":"uint16"}]},{"name":"rare","type":"tuple","components":[{"name":"price","type":"uint256"},{"name":"totalSupply","type":"uint16"},{"name":"stock","type":"uint16"}]},{"name":"legendary","type":"tuple","components":[{"name":"price","type":"uint256"},{"name":"totalSupply","type":"uint16"},{"name":"stock","type":"uint16"}]}]},
{"type":"function","name":"infoWallet","stateMutability":"view","inputs":[{"name":"wallet","type":"address"}],"outputs":[{"name":"common","type":"uint16"},{"name":"rare","type":"uint16"},{"name":"legendary","type":"uint16"}]},
{"type":"function","name":"paused","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"bool"}]},
{"type":"function","name":"owner","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
{"type":"event","name":"Bought","anonymous":false,"inputs":[{"name":"user","type":"address","indexed":true},{"name":"level","type":"uint8","indexed":false},{"name":"amount","type":"uint16","indexed":false},{"name":"startTokenId","type":"uint256","indexed":false},{"name":"toTokenId","type":"uint256","indexed":false}]},
{"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]},
{"type":"event","name":"Paused","anonymous":false,"inputs":[{"name":"account","type":"address","indexed":false}]},
{"type":"event","name":"Unpaused","anonymous":false,"inputs":[{"name":"account","type":"address","indexed":false}]}
]"#;

/// The three purchasable box tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxLevel {
    Common,
    Rare,
    Legendary,
}

impl TryFrom<u8> for BoxLevel {
    type Error = BindError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Self::Common),
            1 => Ok(Self::Rare),
            2 => Ok(Self::Legendary),
            other => Err(BindError::decoding(
                "box level",
                format!("unknown tier {other}"),
            )),
        }
    }
}

/// Price and stock of one box tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxInfo {
    /// Raw price in payment-token units.
    pub price: U256,
    pub total_supply: u16,
    pub stock: u16,
}

impl BoxInfo {
    fn from_fields(fields: &[AbiValue]) -> Result<Self, BindError> {
        let mismatch = || BindError::decoding("box tier tuple", "expected (uint256,uint16,uint16)");
        if fields.len() != 3 {
            return Err(mismatch());
        }
        let price = fields[0].as_uint().ok_or_else(mismatch)?;
        let total_supply = fields[1]
            .as_uint()
            .and_then(|u| u16::try_from(u).ok())
            .ok_or_else(mismatch)?;
        let stock = fields[2]
            .as_uint()
            .and_then(|u| u16::try_from(u).ok())
            .ok_or_else(mismatch)?;
        Ok(Self {
            price,
            total_supply,
            stock,
        })
    }
}

/// The full sale snapshot returned by the `info` view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleInfo {
    /// The fungible token the sale is paid in.
    pub payment_token: Address,
    /// The collection the sold boxes mint into.
    pub collection: Address,
    pub common: BoxInfo,
    pub rare: BoxInfo,
    pub legendary: BoxInfo,
}

impl SaleInfo {
    /// The tier record for `level`.
    pub fn tier(&self, level: BoxLevel) -> BoxInfo {
        match level {
            BoxLevel::Common => self.common,
            BoxLevel::Rare => self.rare,
            BoxLevel::Legendary => self.legendary,
        }
    }
}

/// Per-tier purchase counts of one wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletPurchases {
    pub common: u16,
    pub rare: u16,
    pub legendary: u16,
}

/// The box sale: ownership and pause-control capabilities over one shared
/// schema, plus the sale views.
#[derive(Clone)]
pub struct BoxSale {
    ownable: Ownable,
    pausable: Pausable,
    handle: ContractHandle,
}

impl BoxSale {
    /// Bind the sale contract at `address`. Parses the embedded schema
    /// once; no network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(BOX_SALE_ABI)?);
        Ok(Self {
            ownable: Ownable::with_schema(client.clone(), address, schema.clone()),
            pausable: Pausable::with_schema(client.clone(), address, schema.clone()),
            handle: ContractHandle::new(client, address, schema),
        })
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// The ownership views.
    pub fn ownable(&self) -> &Ownable {
        &self.ownable
    }

    /// The pause-control views.
    pub fn pausable(&self) -> &Pausable {
        &self.pausable
    }

    /// The schema shared by every capability of this binding.
    pub fn schema(&self) -> &Arc<AbiSchema> {
        self.handle.schema()
    }

    /// The collection contract the sold boxes mint into.
    pub async fn collection_contract(&self) -> Result<Address, BindError> {
        self.handle
            .call_view("_icon721Contract", &[])
            .await?
            .address(0)
    }

    /// The fungible token the sale is paid in.
    pub async fn payment_contract(&self) -> Result<Address, BindError> {
        self.handle
            .call_view("_paymentContract", &[])
            .await?
            .address(0)
    }

    /// The tier a sold token belongs to.
    pub async fn box_level_of(&self, token_id: U256) -> Result<BoxLevel, BindError> {
        let raw = self
            .handle
            .call_view("boxLevelOf", &[token_id.into()])
            .await?
            .u8(0)?;
        BoxLevel::try_from(raw)
    }

    /// The full sale snapshot: contracts plus price and stock per tier.
    pub async fn info(&self) -> Result<SaleInfo, BindError> {
        let returns = self.handle.call_view("info", &[]).await?;
        Ok(SaleInfo {
            payment_token: returns.address(0)?,
            collection: returns.address(1)?,
            common: BoxInfo::from_fields(returns.tuple(2)?)?,
            rare: BoxInfo::from_fields(returns.tuple(3)?)?,
            legendary: BoxInfo::from_fields(returns.tuple(4)?)?,
        })
    }

    /// The per-tier purchase counts of `wallet`.
    pub async fn info_wallet(&self, wallet: Address) -> Result<WalletPurchases, BindError> {
        let returns = self.handle.call_view("infoWallet", &[wallet.into()]).await?;
        Ok(WalletPurchases {
            common: returns.u16(0)?,
            rare: returns.u16(1)?,
            legendary: returns.u16(2)?,
        })
    }
}

/// Typed callbacks for the full sale event surface.
pub trait BoxSaleEvents: PausableEvents + OwnableEvents {
    /// `user` bought `amount` boxes of `level`, minting the token range
    /// `start_token_id..=to_token_id`.
    fn bought(
        &mut self,
        user: Address,
        level: BoxLevel,
        amount: u16,
        start_token_id: U256,
        to_token_id: U256,
    );
}

/// Decode and dispatch the sale events of a raw log batch, in node order
/// across all capabilities.
pub fn dispatch_box_sale_events<S: BoxSaleEvents + ?Sized>(
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
            "Bought" => {
                let level = BoxLevel::try_from(decoded.u8_field("level")?)?;
                sink.bought(
                    decoded.address_field("user")?,
                    level,
                    decoded.u16_field("amount")?,
                    decoded.uint_field("startTokenId")?,
                    decoded.uint_field("toTokenId")?,
                );
            }
            "OwnershipTransferred" => sink.ownership_transferred(
                decoded.address_field("previousOwner")?,
                decoded.address_field("newOwner")?,
            ),
            "Paused" => sink.paused(decoded.address_field("account")?),
            "Unpaused" => sink.unpaused(decoded.address_field("account")?),
            _ => {}
        }
    }
    Ok(())
}
