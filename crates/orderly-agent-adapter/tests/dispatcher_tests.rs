/*
[INPUT]:  Mock JSON-RPC node and crafted request envelopes
[OUTPUT]: Test results for transaction dispatch and chain fallback
[POS]:    Integration tests - eth_sendTransaction path
[UPDATE]: When broadcast or chain resolution behavior changes
*/

mod common;

use std::sync::Arc;

use common::{JsonRpcError, JsonRpcResult, TEST_PRIVATE_KEY, setup_mock_server};
use orderly_agent_adapter::{
    Chain,
    ChainRegistry,
    RequestDispatcher,
    RequestEnvelope,
    WalletIdentity,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method};
use wiremock::{Mock, MockServer};

const TX_HASH: &str = "0x88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b";

fn dispatcher_against(server: &MockServer, default_chain: Chain) -> RequestDispatcher {
    let identity = WalletIdentity::from_private_key(TEST_PRIVATE_KEY).expect("identity");
    let rpc_url = Url::parse(&server.uri()).expect("server url");
    let registry = ChainRegistry::new(default_chain).with_endpoint(default_chain, rpc_url);
    RequestDispatcher::new(Arc::new(identity), registry)
}

/// Mount the node calls the provider's filler pipeline may make for a
/// fully specified legacy transaction.
async fn mount_node(server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_string_contains("eth_chainId"))
        .respond_with(JsonRpcResult(json!("0x1")))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("eth_getTransactionCount"))
        .respond_with(JsonRpcResult(json!("0x0")))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("eth_estimateGas"))
        .respond_with(JsonRpcResult(json!("0x5208")))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("eth_maxPriorityFeePerGas"))
        .respond_with(JsonRpcResult(json!("0x3b9aca00")))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("eth_feeHistory"))
        .respond_with(JsonRpcResult(json!({
            "oldestBlock": "0x1",
            "baseFeePerGas": ["0x3b9aca00", "0x3b9aca00"],
            "gasUsedRatio": [0.5],
            "reward": [["0x3b9aca00"]]
        })))
        .mount(server)
        .await;
}

fn send_transaction_envelope(id: u64, chain_id: &str) -> RequestEnvelope {
    RequestEnvelope {
        id,
        chain_id: chain_id.to_string(),
        method: "eth_sendTransaction".to_string(),
        params: json!([{
            "from": common::TEST_ADDRESS,
            "to": "0x000000000000000000000000000000000000dEaD",
            "value": "0x1",
            "gas": "0x5208",
            "gasPrice": "0x3b9aca00"
        }]),
    }
}

#[tokio::test]
async fn test_send_transaction_returns_node_hash() {
    let server = setup_mock_server().await;
    mount_node(&server).await;
    Mock::given(method("POST"))
        .and(body_string_contains("eth_sendRawTransaction"))
        .respond_with(JsonRpcResult(json!(TX_HASH)))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_against(&server, Chain::Ethereum);
    let reply = dispatcher
        .dispatch(&send_transaction_envelope(11, "eip155:1"))
        .await;

    assert_eq!(reply.id, 11);
    assert!(reply.is_success(), "broadcast failed: {reply:?}");
    assert_eq!(reply.result, Some(json!(TX_HASH)));
}

#[tokio::test]
async fn test_unknown_chain_falls_back_to_default_endpoint() {
    let server = setup_mock_server().await;
    mount_node(&server).await;
    Mock::given(method("POST"))
        .and(body_string_contains("eth_sendRawTransaction"))
        .respond_with(JsonRpcResult(json!(TX_HASH)))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = dispatcher_against(&server, Chain::Ethereum);

    // Chain 999999 is not in the registry: the default chain's endpoint
    // (the mock server) must receive the broadcast.
    let reply = dispatcher
        .dispatch(&send_transaction_envelope(12, "eip155:999999"))
        .await;

    assert!(reply.is_success(), "fallback broadcast failed: {reply:?}");
    assert_eq!(reply.result, Some(json!(TX_HASH)));
}

#[tokio::test]
async fn test_node_rejection_becomes_error_reply() {
    let server = setup_mock_server().await;
    mount_node(&server).await;
    Mock::given(method("POST"))
        .and(body_string_contains("eth_sendRawTransaction"))
        .respond_with(JsonRpcError {
            code: -32003,
            message: "insufficient funds",
        })
        .mount(&server)
        .await;

    let dispatcher = dispatcher_against(&server, Chain::Ethereum);
    let reply = dispatcher
        .dispatch(&send_transaction_envelope(13, "eip155:1"))
        .await;

    assert_eq!(reply.id, 13);
    let error = reply.error.expect("error reply");
    assert_eq!(error.code, -32000);
    assert!(error.message.contains("insufficient funds"));
}
