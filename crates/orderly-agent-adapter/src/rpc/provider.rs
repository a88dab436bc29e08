/*
[INPUT]:  RPC endpoint URL, owner address, transaction request
[OUTPUT]: Connected providers, native balances, broadcast tx hashes
[POS]:    RPC layer - per-chain provider construction and core reads
[UPDATE]: When provider setup or broadcast behavior changes
*/

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use tracing::debug;
use url::Url;

use crate::error::{AgentError, Result};
use crate::wallet::WalletIdentity;

/// Read-only provider for one chain endpoint.
///
/// Providers are constructed per call site; the dispatcher resolves the
/// endpoint from the request's chain, never from a cached connection.
pub fn read_provider(endpoint: &Url) -> impl Provider + Clone {
    ProviderBuilder::new().connect_http(endpoint.clone())
}

/// Provider that fills and signs transactions from the identity's key
pub fn wallet_provider(endpoint: &Url, identity: &WalletIdentity) -> impl Provider + Clone {
    let wallet = EthereumWallet::from(identity.signer().clone());
    ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(endpoint.clone())
}

/// Query the native token balance of an address
pub async fn native_balance(provider: &impl Provider, owner: Address) -> Result<U256> {
    provider
        .get_balance(owner)
        .await
        .map_err(|e| AgentError::Rpc(format!("balance query failed: {e}")))
}

/// Broadcast a transaction from the identity and return its hash.
///
/// The only operation in this crate with an external, irreversible effect.
pub async fn broadcast(
    endpoint: &Url,
    identity: &WalletIdentity,
    tx: TransactionRequest,
) -> Result<String> {
    debug!(endpoint = %endpoint, "connecting wallet provider for broadcast");
    let provider = wallet_provider(endpoint, identity);

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| AgentError::Broadcast(e.to_string()))?;

    Ok(pending.tx_hash().to_string())
}
