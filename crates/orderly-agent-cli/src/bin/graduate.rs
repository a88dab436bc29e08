/*
[INPUT]:  CLI arguments, wallet JSON file
[OUTPUT]: Balance report, broker availability, graduation steps
[POS]:    Binary entry point - graduation checker
[UPDATE]: When changing output format or the graduation flow
*/

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing::info;

use orderly_agent_adapter::{
    GRADUATION_COST_ORDER_USD,
    GRADUATION_COST_USDC,
    GraduationOutcome,
    GraduationSummary,
    Graduator,
    WalletIdentity,
};
use orderly_agent_cli::{GraduateArgs, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = GraduateArgs::parse();
    init_tracing(&args.log_level)?;

    let identity = WalletIdentity::from_file(&args.wallet).context("load wallet")?;

    println!("{}", style("Orderly One DEX Graduation").bold().cyan());
    println!("{}", style("==========================").dim());
    println!();
    println!("Wallet: {}", style(identity.checksum_address()).cyan());
    println!("Chain:  {}", args.chain.name());
    println!("DEX:    {}", args.name);

    let graduator =
        Graduator::new(identity, args.name.as_str(), args.chain).context("initialize graduator")?;

    info!(chain = %args.chain, dry_run = args.dry_run, "running graduation checks");
    println!("\nChecking balances...");
    let summary = graduator.graduate(args.dry_run).await.context("graduation check")?;

    print_report(&graduator, &summary);

    println!(
        "\nResult:\n{}",
        serde_json::to_string_pretty(&summary.outcome).context("serialize outcome")?
    );

    Ok(())
}

fn print_report(graduator: &Graduator, summary: &GraduationSummary) {
    let balances = &summary.balances;
    println!("  ETH:   {}", balances.eth_display());
    println!("  ORDER: {}", balances.order_display());

    println!("\n{}", style("Requirements").bold());
    println!(
        "  Graduation: ${GRADUATION_COST_USDC} USDC or ${GRADUATION_COST_ORDER_USD} worth of ORDER (25% discount)"
    );
    println!(
        "  ETH (gas): {} need ~0.001, have {}",
        if balances.has_gas() {
            style("ok").green()
        } else {
            style("insufficient").red()
        },
        balances.eth_display()
    );

    let broker = &summary.broker;
    if broker.available {
        println!(
            "  Broker id: \"{}\" is {}",
            broker.broker_id,
            style("available").green()
        );
    } else {
        println!(
            "  Broker id: \"{}\" is {}",
            broker.broker_id,
            style("already taken").red()
        );
        if let Some(suggestion) = &broker.suggestion {
            println!("             try \"{suggestion}\" instead");
        }
    }

    match &summary.outcome {
        GraduationOutcome::InsufficientGas { wallet, chain } => {
            println!("\n{}", style("Insufficient ETH for gas").red().bold());
            println!("To proceed, send ~0.01 ETH to {wallet} on {chain}");
        }
        GraduationOutcome::DryRun { .. } => {
            println!("\n{}", style("Dry run - not executing graduation").dim());
            println!("Ready to graduate. Run without --dry-run to proceed.");
        }
        GraduationOutcome::ManualRequired {
            broker_id,
            wallet,
            chain,
        } => {
            println!("\n{}", style("Manual steps required").bold());
            println!("  1. Go to https://dex.orderly.network");
            println!("  2. Connect wallet {wallet} on {chain}");
            println!("  3. Create a DEX named \"{}\"", graduator.dex_name());
            println!("  4. Graduate with ORDER tokens");
            println!("  5. Your broker id will be: {broker_id}");
        }
    }
}
