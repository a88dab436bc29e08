/*
[INPUT]:  Request envelopes (id, target chain, method, params)
[OUTPUT]: Reply envelopes - signature strings, tx hashes, or errors
[POS]:    Dispatch layer - routes each request to its signing operation
[UPDATE]: When the per-method contract or chain resolution changes
*/

use std::sync::Arc;

use alloy::rpc::types::TransactionRequest;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::rpc;
use crate::types::{ChainRegistry, REQUEST_ERROR_CODE, RequestEnvelope, ResponseEnvelope};
use crate::wallet::WalletIdentity;

use super::request::WalletRequest;

const MESSAGE_PREVIEW_MAX_CHARS: usize = 80;

/// Routes inbound signing requests to the correct operation.
///
/// Holds the one wallet identity and the chain registry; every request is
/// resolved against that identity and the chain named in the envelope.
/// Failures never escape as errors - they become error replies carrying
/// the fixed code and the underlying message.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    identity: Arc<WalletIdentity>,
    registry: ChainRegistry,
}

impl RequestDispatcher {
    pub fn new(identity: Arc<WalletIdentity>, registry: ChainRegistry) -> Self {
        Self { identity, registry }
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    /// Checksummed address of the active identity
    pub fn account(&self) -> String {
        self.identity.checksum_address()
    }

    /// Process one request and produce its reply envelope
    pub async fn dispatch(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        match self.execute(envelope).await {
            Ok(result) => ResponseEnvelope::result(envelope.id, result),
            Err(err) => {
                error!(
                    id = envelope.id,
                    method = %envelope.method,
                    error = %err,
                    "request failed"
                );
                ResponseEnvelope::error(envelope.id, REQUEST_ERROR_CODE, err.to_string())
            }
        }
    }

    async fn execute(&self, envelope: &RequestEnvelope) -> Result<Value> {
        let request = WalletRequest::parse(&envelope.method, &envelope.params)?;

        match request {
            WalletRequest::PersonalSign { message } | WalletRequest::EthSign { message } => {
                if let Ok(text) = std::str::from_utf8(&message) {
                    debug!(
                        preview = %truncate_preview(text, MESSAGE_PREVIEW_MAX_CHARS),
                        "message preview"
                    );
                }
                let signature = self.identity.sign_message(&message).await?;
                Ok(Value::String(signature))
            }
            WalletRequest::SignTypedData { payload } => {
                debug!(primary_type = %payload.primary_type, "signing typed data");
                let signature = self.identity.sign_typed_data(&payload).await?;
                Ok(Value::String(signature))
            }
            WalletRequest::SendTransaction { tx } => {
                let (chain, endpoint) = self.registry.resolve_caip2(&envelope.chain_id);
                let tx = self.sanitize_transaction(tx);
                info!(
                    chain = %chain,
                    to = ?tx.to,
                    "broadcasting transaction"
                );
                let hash = rpc::broadcast(endpoint, &self.identity, tx).await?;
                info!(%hash, "transaction broadcast");
                Ok(Value::String(hash))
            }
            WalletRequest::SwitchChain { chain_id } => {
                info!(chain_id, "chain switch acknowledged");
                Ok(Value::Null)
            }
        }
    }

    /// Rebuild the transaction from the identity, keeping only the fields
    /// a dApp may supply; nonce and chain id always come from the node.
    fn sanitize_transaction(&self, tx: TransactionRequest) -> TransactionRequest {
        TransactionRequest {
            from: Some(self.identity.address()),
            to: tx.to,
            value: tx.value,
            input: tx.input,
            gas: tx.gas,
            gas_price: tx.gas_price,
            max_fee_per_gas: tx.max_fee_per_gas,
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
            ..Default::default()
        }
    }
}

fn truncate_preview(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
