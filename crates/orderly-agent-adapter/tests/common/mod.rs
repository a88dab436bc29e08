/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for orderly-agent-adapter tests

use serde_json::Value;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

/// A well-known test private key and its address
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
#[allow(dead_code)]
pub const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Respond to a JSON-RPC request with a fixed result, echoing the
/// caller's request id.
#[allow(dead_code)]
pub struct JsonRpcResult(pub Value);

impl Respond for JsonRpcResult {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body.get("id").cloned().unwrap_or_else(|| Value::from(0));
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": self.0.clone(),
        }))
    }
}

/// Respond to a JSON-RPC request with an error object, echoing the
/// caller's request id.
#[allow(dead_code)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: &'static str,
}

impl Respond for JsonRpcError {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body.get("id").cloned().unwrap_or_else(|| Value::from(0));
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {"code": self.code, "message": self.message},
        }))
    }
}

/// ABI-encode a uint value as a 32-byte 0x-hex word
#[allow(dead_code)]
pub fn abi_word(value: u128) -> String {
    format!("0x{value:064x}")
}
