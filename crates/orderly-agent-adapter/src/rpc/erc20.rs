/*
[INPUT]:  Token contract address and owner address
[OUTPUT]: Raw token balance with its decimals
[POS]:    RPC layer - read-only ERC-20 contract access
[UPDATE]: When new token reads are needed
*/

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use alloy::sol;

use crate::error::{AgentError, Result};

sol! {
    #[sol(rpc)]
    contract Erc20 {
        function balanceOf(address owner) external view returns (uint256);
        function decimals() external view returns (uint8);
    }
}

/// Raw token balance paired with the token's decimals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    pub raw: U256,
    pub decimals: u8,
}

/// Read an ERC-20 balance and the token's decimals
pub async fn token_balance<P: Provider + Clone>(
    provider: &P,
    token: Address,
    owner: Address,
) -> Result<TokenBalance> {
    let erc20 = Erc20::new(token, provider.clone());

    let raw = erc20
        .balanceOf(owner)
        .call()
        .await
        .map_err(|e| AgentError::Rpc(format!("balanceOf call failed: {e}")))?;
    let decimals = erc20
        .decimals()
        .call()
        .await
        .map_err(|e| AgentError::Rpc(format!("decimals call failed: {e}")))?;

    Ok(TokenBalance { raw, decimals })
}
