/*
[INPUT]:  CLI arguments, wallet JSON file, optional pairing URI
[OUTPUT]: Long-running auto-signing session against the relay
[POS]:    Binary entry point - wallet signer
[UPDATE]: When changing the pairing flow or shutdown handling
*/

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tokio_util::sync::CancellationToken;
use tracing::info;

use orderly_agent_adapter::{
    ChainRegistry,
    PairingUri,
    RequestDispatcher,
    SessionSocket,
    SignerService,
    WalletIdentity,
    default_relay_url,
};
use orderly_agent_cli::{SignerArgs, init_tracing, setup_signal_handlers};

#[tokio::main]
async fn main() -> Result<()> {
    let args = SignerArgs::parse();
    init_tracing(&args.log_level)?;

    let identity = WalletIdentity::from_file(&args.wallet).context("load wallet")?;

    println!("{}", style("Wallet Auto-Signer").bold().cyan());
    println!("{}", style("==================").dim());
    println!();
    println!("Address: {}", style(identity.checksum_address()).cyan());

    let pairing = args
        .uri
        .as_deref()
        .map(str::parse::<PairingUri>)
        .transpose()
        .context("parse pairing URI")?;

    let relay_url = match &pairing {
        Some(uri) => uri.relay_url.clone(),
        None => default_relay_url().context("default relay URL")?,
    };

    let registry = ChainRegistry::new(args.chain);
    let dispatcher = RequestDispatcher::new(Arc::new(identity), registry);

    let socket = SessionSocket::new();
    socket.connect(&relay_url).await.context("connect to relay")?;
    info!(relay = %relay_url, "socket connected");

    if pairing.is_none() {
        println!("\nNo URI provided. Waiting for a connection...");
        println!("Get a pairing URI from the dApp and run:");
        println!(
            "  wallet-signer --wallet {} --uri \"wc:...\"",
            args.wallet.display()
        );
    }

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    println!("\nListening for requests... (Ctrl+C to stop)");
    let mut service = SignerService::new(socket, dispatcher);
    service.run(pairing, shutdown).await.context("signer session")?;

    println!("Shutting down...");
    Ok(())
}
