//! Binding for the ADENE reflection token.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use evmbind_abi::{decode_event, AbiSchema};
use evmbind_core::{BindError, FilterChange};
use evmbind_rpc::EthClient;

use crate::erc20::{Erc20, Erc20Events};
use crate::handle::ContractHandle;
use crate::ownable::{Ownable, OwnableEvents};

/// The deployed ADENE surface: the fungible-token and ownership interfaces
/// plus the reflection and liquidity views and events.
pub const ADENE_ABI: &str = r#"[
{"type":"function","name":"name","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"symbol","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"string"}]},
{"type":"function","name":"decimals","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint8"}]},
{"type":"function","name":"totalSupply","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"allowance","stateMutability":"view","inputs":[{"name":"owner","type":"address"},{"name":"spender","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"owner","stateMutability":"view","inputs":[],"outputs":[{"name":"","type":"address"}]},
{"type":"function","name":"reflectionFromToken","stateMutability":"view","inputs":[{"name":"tAmount","type":"uint256"},{"name":"deductTransferFee","type":"bool"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"tokenFromReflection","stateMutability":"view","inputs":[{"name":"rAmount","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}]},
{"type":"function","name":"isExcludedFromFee","stateMutability":"view","inputs":[{"name":"account","type":"address"}],"outputs":[{"name":"","type":"bool"}]},
{"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
{"type":"event","name":"Approval","anonymous":false,"inputs":[{"name":"owner","type":"address","indexed":true},{"name":"spender","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]},
{"type":"event","name":"OwnershipTransferred","anonymous":false,"inputs":[{"name":"previousOwner","type":"address","indexed":true},{"name":"newOwner","type":"address","indexed":true}]},
{"type":"event","name":"MinTokensBeforeSwapUpdated","anonymous":false,"inputs":[{"name":"minTokensBeforeSwap","type":"uint256","indexed":false}]},
{"type":"event","name":"SwapAndLiquifyEnabledUpdated","anonymous":false,"inputs":[{"name":"enabled","type":"bool","indexed":false}]},
{"type":"event","name":"SwapAndLiquify","anonymous":false,"inputs":[{"name":"tokensSwapped","type":"uint256","indexed":false},{"name":"ethReceived","type":"uint256","indexed":false},{"name":"tokensIntoLiquidity","type":"uint256","indexed":false}]}
]"#;

/// The ADENE token: fungible-token and ownership capabilities over one
/// shared schema, plus the reflection views.
#[derive(Clone)]
pub struct AdeneToken {
    erc20: Erc20,
    ownable: Ownable,
    handle: ContractHandle,
}

impl AdeneToken {
    /// Bind the ADENE contract at `address`. Parses the embedded schema
    /// once; no network activity.
    pub fn connect(client: Arc<EthClient>, address: Address) -> Result<Self, BindError> {
        let schema = Arc::new(AbiSchema::parse(ADENE_ABI)?);
        Ok(Self {
            erc20: Erc20::with_schema(client.clone(), address, schema.clone()),
            ownable: Ownable::with_schema(client.clone(), address, schema.clone()),
            handle: ContractHandle::new(client, address, schema),
        })
    }

    pub fn address(&self) -> Address {
        self.handle.address()
    }

    /// The fungible-token views.
    pub fn erc20(&self) -> &Erc20 {
        &self.erc20
    }

    /// The ownership views.
    pub fn ownable(&self) -> &Ownable {
        &self.ownable
    }

    /// The schema shared by every capability of this binding.
    pub fn schema(&self) -> &Arc<AbiSchema> {
        self.handle.schema()
    }

    /// The reflection-space equivalent of `t_amount` tokens, optionally
    /// after the transfer fee.
    pub async fn reflection_from_token(
        &self,
        t_amount: U256,
        deduct_transfer_fee: bool,
    ) -> Result<U256, BindError> {
        self.handle
            .call_view(
                "reflectionFromToken",
                &[t_amount.into(), deduct_transfer_fee.into()],
            )
            .await?
            .uint(0)
    }

    /// The token-space equivalent of `r_amount` reflections.
    pub async fn token_from_reflection(&self, r_amount: U256) -> Result<U256, BindError> {
        self.handle
            .call_view("tokenFromReflection", &[r_amount.into()])
            .await?
            .uint(0)
    }

    /// Whether `account` is excluded from the transfer fee.
    pub async fn is_excluded_from_fee(&self, account: Address) -> Result<bool, BindError> {
        self.handle
            .call_view("isExcludedFromFee", &[account.into()])
            .await?
            .boolean(0)
    }
}

/// Typed callbacks for the full ADENE event surface.
pub trait AdeneEvents: Erc20Events + OwnableEvents {
    /// The auto-liquidity threshold was changed.
    fn min_tokens_before_swap_updated(&mut self, min_tokens_before_swap: U256);

    /// Auto-liquidity was switched on or off.
    fn swap_and_liquify_enabled_updated(&mut self, enabled: bool);

    /// Tokens were swapped and paired into liquidity.
    fn swap_and_liquify(
        &mut self,
        tokens_swapped: U256,
        eth_received: U256,
        tokens_into_liquidity: U256,
    );
}

/// Decode and dispatch the ADENE events of a raw log batch, in node order
/// across all capabilities.
pub fn dispatch_adene_events<S: AdeneEvents + ?Sized>(
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
                decoded.uint_field("value")?,
            ),
            "Approval" => sink.approval(
                decoded.address_field("owner")?,
                decoded.address_field("spender")?,
                decoded.uint_field("value")?,
            ),
            "OwnershipTransferred" => sink.ownership_transferred(
                decoded.address_field("previousOwner")?,
                decoded.address_field("newOwner")?,
            ),
            "MinTokensBeforeSwapUpdated" => sink.min_tokens_before_swap_updated(
                decoded.uint_field("minTokensBeforeSwap")?,
            ),
            "SwapAndLiquifyEnabledUpdated" => {
                sink.swap_and_liquify_enabled_updated(decoded.bool_field("enabled")?)
            }
            "SwapAndLiquify" => sink.swap_and_liquify(
                decoded.uint_field("tokensSwapped")?,
                decoded.uint_field("ethReceived")?,
                decoded.uint_field("tokensIntoLiquidity")?,
            ),
            _ => {}
        }
    }
    Ok(())
}
