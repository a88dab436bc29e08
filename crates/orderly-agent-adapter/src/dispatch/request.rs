/*
[INPUT]:  Method name and ordered JSON parameter list
[OUTPUT]: Typed WalletRequest variants, one per supported method
[POS]:    Dispatch layer - request parsing and validation
[UPDATE]: When supporting new methods or changing parameter positions
*/

use alloy::dyn_abi::TypedData;
use alloy::primitives::{Bytes, TxKind};
use alloy::rpc::types::TransactionRequest;
use serde_json::Value;

use crate::error::{AgentError, Result};

/// One inbound signing request, resolved to a variant at parse time
#[derive(Debug, Clone)]
pub enum WalletRequest {
    PersonalSign { message: Bytes },
    EthSign { message: Bytes },
    SignTypedData { payload: TypedData },
    SendTransaction { tx: TransactionRequest },
    SwitchChain { chain_id: String },
}

impl WalletRequest {
    /// Parse a method name and its parameter list.
    ///
    /// Unknown methods fail with `UnsupportedMethod`; malformed parameters
    /// for a known method fail with `InvalidParams`.
    pub fn parse(method: &str, params: &Value) -> Result<Self> {
        match method {
            "personal_sign" => Ok(Self::PersonalSign {
                message: hex_message(param(params, 0)?)?,
            }),
            "eth_sign" => Ok(Self::EthSign {
                message: hex_message(param(params, 1)?)?,
            }),
            "eth_signTypedData" | "eth_signTypedData_v3" | "eth_signTypedData_v4" => {
                Ok(Self::SignTypedData {
                    payload: typed_data_payload(param(params, 1)?)?,
                })
            }
            "eth_sendTransaction" => Ok(Self::SendTransaction {
                tx: transaction_call(param(params, 0)?)?,
            }),
            "wallet_switchEthereumChain" => Ok(Self::SwitchChain {
                chain_id: switch_chain_target(param(params, 0)?)?,
            }),
            other => Err(AgentError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

fn param(params: &Value, index: usize) -> Result<&Value> {
    params
        .get(index)
        .ok_or_else(|| AgentError::InvalidParams(format!("missing param {index}")))
}

fn hex_message(value: &Value) -> Result<Bytes> {
    let text = value
        .as_str()
        .ok_or_else(|| AgentError::InvalidParams("message must be a hex string".to_string()))?;
    text.parse()
        .map_err(|e| AgentError::InvalidParams(format!("invalid hex message: {e}")))
}

/// Parse an EIP-712 payload, accepting both an object and a JSON string.
///
/// Any `EIP712Domain` self-reference in `types` is stripped before the
/// payload is handed to the signer.
fn typed_data_payload(value: &Value) -> Result<TypedData> {
    let mut data: Value = match value.as_str() {
        Some(text) => serde_json::from_str(text).map_err(|e| {
            AgentError::InvalidParams(format!("typed data payload is not valid JSON: {e}"))
        })?,
        None => value.clone(),
    };

    if let Some(types) = data.get_mut("types").and_then(Value::as_object_mut) {
        types.remove("EIP712Domain");
    }

    serde_json::from_value(data)
        .map_err(|e| AgentError::InvalidParams(format!("invalid typed data payload: {e}")))
}

fn transaction_call(value: &Value) -> Result<TransactionRequest> {
    let tx: TransactionRequest = serde_json::from_value(value.clone())
        .map_err(|e| AgentError::InvalidParams(format!("invalid transaction object: {e}")))?;

    match tx.to {
        Some(TxKind::Call(_)) => Ok(tx),
        _ => Err(AgentError::InvalidParams(
            "transaction must name a destination".to_string(),
        )),
    }
}

fn switch_chain_target(value: &Value) -> Result<String> {
    value
        .get("chainId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AgentError::InvalidParams("missing chainId".to_string()))
}
