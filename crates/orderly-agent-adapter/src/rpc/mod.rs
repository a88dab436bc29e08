/*
[INPUT]:  Chain endpoints and the signing identity
[OUTPUT]: Balance reads, token reads, and transaction broadcast
[POS]:    RPC layer - module wiring
[UPDATE]: When provider construction or chain operations change
*/

pub mod erc20;
pub mod provider;

pub use erc20::{TokenBalance, token_balance};
pub use provider::{broadcast, native_balance, read_provider, wallet_provider};
