/*
[INPUT]:  Wallet file path or raw private key
[OUTPUT]: Process-wide signing identity
[POS]:    Wallet layer - module wiring
[UPDATE]: When identity loading or signing surface changes
*/

pub mod identity;

pub use identity::WalletIdentity;
