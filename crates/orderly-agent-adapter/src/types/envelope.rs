/*
[INPUT]:  Inbound signing requests and dispatcher outcomes
[OUTPUT]: Reply-channel envelopes compatible with the pairing protocol
[POS]:    Data layer - request/response wire schema
[UPDATE]: When the reply envelope or error code contract changes
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed error code carried by every failed reply
pub const REQUEST_ERROR_CODE: i64 = -32000;

pub const JSONRPC_VERSION: &str = "2.0";

/// One inbound signing request: identifier, target chain, method, params
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: u64,
    #[serde(rename = "chainId", default)]
    pub chain_id: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Reply envelope: identifier plus either a result value or an error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: u64,
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    pub code: i64,
    pub message: String,
}

impl ResponseEnvelope {
    pub fn result(id: u64, value: Value) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(value),
            error: None,
        }
    }

    pub fn error(id: u64, code: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(ResponseError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
