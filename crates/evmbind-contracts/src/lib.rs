//! # evmbind-contracts
//!
//! Capability components and contract façades.
//!
//! Each base capability — fungible token ([`Erc20`]), non-fungible token
//! ([`Erc721`]) with its enumerable extension ([`Erc721Enumerable`]),
//! ownership ([`Ownable`]) and pause control ([`Pausable`]) — is an
//! independent component exposing view functions through the shared
//! call-view entry point, plus a typed event sink trait and a dispatch
//! function over raw log batches.
//!
//! Concrete bindings ([`AdeneToken`], [`Icon721`], [`BoxSale`]) hold the
//! subset of capabilities their deployed contract implements, share one
//! embedded ABI schema across all of them, and add contract-specific views.
//! Construction performs no network activity.

pub mod adene;
pub mod enumerable;
pub mod erc20;
pub mod erc721;
pub mod handle;
pub mod icon721;
pub mod ownable;
pub mod pausable;
pub mod sale;

#[cfg(test)]
pub(crate) mod testutil;

pub use adene::{dispatch_adene_events, AdeneEvents, AdeneToken};
pub use enumerable::Erc721Enumerable;
pub use erc20::{dispatch_erc20_events, scale_amount, Erc20, Erc20Events};
pub use erc721::{dispatch_erc721_events, Erc721, Erc721Events};
pub use handle::ContractHandle;
pub use icon721::{dispatch_icon721_events, Icon721, Icon721Events, WalletAllocation};
pub use ownable::{dispatch_ownable_events, Ownable, OwnableEvents};
pub use pausable::{dispatch_pausable_events, Pausable, PausableEvents};
pub use sale::{
    dispatch_box_sale_events, BoxInfo, BoxLevel, BoxSale, BoxSaleEvents, SaleInfo, WalletPurchases,
};
