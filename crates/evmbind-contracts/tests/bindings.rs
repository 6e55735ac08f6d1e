//! End-to-end binding tests over a scripted in-process node.

use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use serde_json::{json, Value};

use evmbind_contracts::{
    dispatch_adene_events, scale_amount, AdeneEvents, AdeneToken, BoxLevel, BoxSale, Erc20,
    Erc20Events, Icon721, OwnableEvents,
};
use evmbind_core::{BindError, JsonRpcRequest, JsonRpcResponse};
use evmbind_rpc::{EthClient, FilterQuery, RpcTransport, TopicFilter};

/// A scripted node: `eth_call` results keyed by exact calldata, one shot of
/// filter changes, and a compliant filter lifecycle.
struct ScriptedNode {
    calls: Vec<(String, String)>,
    changes: Value,
    sent: Mutex<Vec<JsonRpcRequest>>,
}

impl ScriptedNode {
    fn new() -> Self {
        Self {
            calls: Vec::new(),
            changes: json!([]),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Serve `result_hex` whenever `calldata` is observed in an `eth_call`.
    fn on_call(mut self, calldata: &[u8], result_hex: &str) -> Self {
        self.calls
            .push((format!("0x{}", hex::encode(calldata)), result_hex.to_owned()));
        self
    }

    fn with_changes(mut self, changes: Value) -> Self {
        self.changes = changes;
        self
    }

    fn ok(id: u64, result: Value) -> JsonRpcResponse {
        serde_json::from_value(json!({"jsonrpc": "2.0", "id": id, "result": result}))
            .expect("valid response JSON")
    }
}

#[async_trait]
impl RpcTransport for ScriptedNode {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, BindError> {
        self.sent.lock().unwrap().push(req.clone());

        match req.method.as_str() {
            "eth_call" => {
                let data = req.params[0]["data"].as_str().unwrap_or_default();
                let result = self
                    .calls
                    .iter()
                    .find(|(calldata, _)| calldata == data)
                    .map(|(_, r)| r.clone())
                    .ok_or_else(|| BindError::network(format!("unscripted call {data}")))?;
                Ok(Self::ok(req.id, json!(result)))
            }
            "eth_newFilter" => Ok(Self::ok(req.id, json!("0xf1"))),
            "eth_getFilterChanges" => Ok(Self::ok(req.id, self.changes.clone())),
            "eth_uninstallFilter" => Ok(Self::ok(req.id, json!(true))),
            other => Err(BindError::network(format!("unscripted method {other}"))),
        }
    }

    fn url(&self) -> &str {
        "scripted://"
    }
}

fn word(n: u64) -> String {
    format!("{n:064x}")
}

fn address_word(addr: Address) -> String {
    format!("{:0>64}", hex::encode(addr))
}

fn contract() -> Address {
    Address::repeat_byte(0xc0)
}

#[tokio::test]
async fn erc20_views_round_trip() {
    let holder: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
        .parse()
        .unwrap();

    // Schema only, to precompute the expected calldata.
    let probe = evmbind_abi::AbiSchema::parse(evmbind_contracts::erc20::ERC20_ABI).unwrap();
    let balance_calldata = probe.encode_call("balanceOf", &[holder.into()]).unwrap();
    let decimals_calldata = probe.encode_call("decimals", &[]).unwrap();

    let node = ScriptedNode::new()
        // 1.5 tokens at 18 decimals
        .on_call(&balance_calldata, &format!("0x{}", word(1_500_000_000_000_000_000)))
        .on_call(&decimals_calldata, &format!("0x{}", word(18)));
    let client = Arc::new(EthClient::new(Arc::new(node)));

    let token = Erc20::connect(client, contract()).unwrap();
    let raw = token.balance_of(holder).await.unwrap();
    let decimals = token.decimals().await.unwrap();

    assert_eq!(raw, U256::from(1_500_000_000_000_000_000u64));
    assert_eq!(decimals, 18);
    assert!((scale_amount(raw, decimals) - 1.5).abs() < 1e-12);
}

#[tokio::test]
async fn adene_reflection_views() {
    let probe = evmbind_abi::AbiSchema::parse(evmbind_contracts::adene::ADENE_ABI).unwrap();
    let calldata = probe
        .encode_call(
            "reflectionFromToken",
            &[U256::from(1000u64).into(), true.into()],
        )
        .unwrap();

    let node = ScriptedNode::new().on_call(&calldata, &format!("0x{}", word(987)));
    let client = Arc::new(EthClient::new(Arc::new(node)));

    let adene = AdeneToken::connect(client, contract()).unwrap();
    let r_space = adene
        .reflection_from_token(U256::from(1000u64), true)
        .await
        .unwrap();
    assert_eq!(r_space, U256::from(987u64));
}

#[tokio::test]
async fn box_sale_info_decodes_nested_tiers() {
    let payment = Address::repeat_byte(0x11);
    let collection = Address::repeat_byte(0x22);

    let probe = evmbind_abi::AbiSchema::parse(evmbind_contracts::sale::BOX_SALE_ABI).unwrap();
    let calldata = probe.encode_call("info", &[]).unwrap();

    // Two addresses then three static (uint256,uint16,uint16) tiers.
    let result = format!(
        "0x{}{}{}{}{}{}{}{}{}{}{}",
        address_word(payment),
        address_word(collection),
        word(100), // common price
        word(500), // common total supply
        word(93),  // common stock
        word(250),
        word(200),
        word(40),
        word(1000),
        word(50),
        word(0),
    );

    let node = ScriptedNode::new().on_call(&calldata, &result);
    let client = Arc::new(EthClient::new(Arc::new(node)));

    let sale = BoxSale::connect(client, contract()).unwrap();
    let info = sale.info().await.unwrap();

    assert_eq!(info.payment_token, payment);
    assert_eq!(info.collection, collection);
    assert_eq!(info.common.price, U256::from(100u64));
    assert_eq!(info.common.stock, 93);
    assert_eq!(info.tier(BoxLevel::Legendary).stock, 0);
    assert_eq!(info.tier(BoxLevel::Rare).total_supply, 200);
}

#[tokio::test]
async fn icon721_wallet_allocation() {
    let wallet: Address = "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B"
        .parse()
        .unwrap();

    let probe = evmbind_abi::AbiSchema::parse(evmbind_contracts::icon721::ICON721_ABI).unwrap();
    let calldata = probe.encode_call("infoWallet", &[wallet.into()]).unwrap();

    let node = ScriptedNode::new()
        .on_call(&calldata, &format!("0x{}{}", word(5), word(3)));
    let client = Arc::new(EthClient::new(Arc::new(node)));

    let icon = Icon721::connect(client, contract()).unwrap();
    let allocation = icon.info_wallet(wallet).await.unwrap();
    assert_eq!(allocation.allocated, 5);
    assert_eq!(allocation.remaining_allocation, 3);
}

#[derive(Default)]
struct AdeneRecorder {
    transfers: Vec<U256>,
    handovers: usize,
}

impl Erc20Events for AdeneRecorder {
    fn transfer(&mut self, _from: Address, _to: Address, value: U256) {
        self.transfers.push(value);
    }

    fn approval(&mut self, _owner: Address, _spender: Address, _value: U256) {}
}

impl OwnableEvents for AdeneRecorder {
    fn ownership_transferred(&mut self, _previous_owner: Address, _new_owner: Address) {
        self.handovers += 1;
    }
}

impl AdeneEvents for AdeneRecorder {
    fn min_tokens_before_swap_updated(&mut self, _min_tokens_before_swap: U256) {}
    fn swap_and_liquify_enabled_updated(&mut self, _enabled: bool) {}
    fn swap_and_liquify(&mut self, _swapped: U256, _eth: U256, _liquidity: U256) {}
}

#[tokio::test]
async fn filter_poll_dispatch_uninstall() {
    let from = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
    let to = "0xAb5801a7D398351b8bE11C439e05C5B3259aeC9B";
    let changes = json!([{
        "address": format!("{:#x}", contract()),
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            format!("0x{}", address_word(from.parse().unwrap())),
            format!("0x{}", address_word(to.parse().unwrap())),
        ],
        "data": format!("0x{}", word(7_000)),
        "blockNumber": "0x4cb2f",
        "transactionHash": "0x784d1b56b4ea4a1fb8cbf11f2dba3b4998cb1a472a939d1b3a4cbf371dbee884",
        "transactionIndex": "0x1",
        "blockHash": "0x8243343df08b9751f5ca0c5f8c9c0460d8a9b6351066fae0acbd4d3e776de8bb",
        "logIndex": "0x2",
        "removed": false
    }]);

    let node = ScriptedNode::new().with_changes(changes);
    let node = Arc::new(node);
    let client = Arc::new(EthClient::new(node.clone() as Arc<dyn RpcTransport>));

    let adene = AdeneToken::connect(client.clone(), contract()).unwrap();
    let topic0 = adene.schema().event_topic0("Transfer").unwrap();

    let query = FilterQuery::new("1000", "2000")
        .address(contract())
        .topic(TopicFilter::Exact(topic0));
    let id = client.new_filter(&query).await.unwrap();

    let entries = client.filter_changes(&id).await.unwrap();
    assert_eq!(entries.len(), 1);

    let mut sink = AdeneRecorder::default();
    dispatch_adene_events(adene.schema(), &entries, &mut sink).unwrap();
    assert_eq!(sink.transfers, vec![U256::from(7_000u64)]);
    assert_eq!(sink.handovers, 0);

    client.uninstall_filter(&id).await.unwrap();

    // The filter request carried the verbatim block bounds.
    let sent = node.sent.lock().unwrap();
    let new_filter = sent
        .iter()
        .find(|req| req.method == "eth_newFilter")
        .unwrap();
    assert_eq!(new_filter.params[0]["fromBlock"], json!("1000"));
    assert_eq!(new_filter.params[0]["toBlock"], json!("2000"));
}
