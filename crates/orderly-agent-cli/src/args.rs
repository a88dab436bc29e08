/*
[INPUT]:  Command-line arguments
[OUTPUT]: Parsed argument structs for both binaries
[POS]:    CLI layer - flag definitions
[UPDATE]: When changing CLI flags or defaults
*/

use std::path::PathBuf;

use clap::Parser;
use orderly_agent_adapter::Chain;

/// Arguments for the `graduate` binary
#[derive(Parser, Debug)]
#[command(
    name = "graduate",
    version,
    about = "Orderly One DEX graduation checker",
    after_help = "Example:\n  graduate --wallet secrets/wallet.json --name \"Arthur\" --dry-run"
)]
pub struct GraduateArgs {
    /// Path to wallet JSON file
    #[arg(short = 'w', long = "wallet", value_name = "PATH")]
    pub wallet: PathBuf,

    /// DEX name
    #[arg(short = 'n', long = "name", value_name = "NAME", default_value = "My DEX")]
    pub name: String,

    /// Chain to use (ethereum|base|arbitrum|optimism)
    #[arg(long = "chain", value_name = "CHAIN", default_value = "base")]
    pub chain: Chain,

    /// Check balances only, don't suggest execution
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Tracing filter, e.g. info or orderly_agent_adapter=debug
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

/// Arguments for the `wallet-signer` binary
#[derive(Parser, Debug)]
#[command(
    name = "wallet-signer",
    version,
    about = "Pairs a wallet with a dApp and auto-signs incoming requests",
    after_help = "Steps:\n  \
        1. Open the DEX frontend and click Connect\n  \
        2. Choose the pairing option and copy the wc: URI\n  \
        3. Run: wallet-signer --wallet secrets/wallet.json --uri \"wc:...\""
)]
pub struct SignerArgs {
    /// Path to wallet JSON file
    #[arg(short = 'w', long = "wallet", value_name = "PATH")]
    pub wallet: PathBuf,

    /// Pairing URI copied from the dApp
    #[arg(short = 'u', long = "uri", value_name = "URI")]
    pub uri: Option<String>,

    /// Fallback chain for requests naming an unknown chain
    #[arg(long = "chain", value_name = "CHAIN", default_value = "ethereum")]
    pub chain: Chain,

    /// Tracing filter, e.g. info or orderly_agent_adapter=debug
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}
