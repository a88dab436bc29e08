/*
[INPUT]:  Wallet identity, target chain, DEX name
[OUTPUT]: Balance report, broker availability, graduation outcome
[POS]:    Graduation layer - orchestrates the pre-graduation checks
[UPDATE]: When graduation requirements or platform pricing change
*/

use alloy::primitives::{U256, utils::format_units};
use serde::Serialize;
use tracing::{info, warn};

use crate::broker::{BrokerAvailability, BrokerClient, broker_id_from_name};
use crate::error::Result;
use crate::rpc;
use crate::types::{Chain, ChainRegistry};
use crate::wallet::WalletIdentity;

/// Standard graduation price in USDC
pub const GRADUATION_COST_USDC: u64 = 1_000;
/// Discounted price when paying in ORDER tokens (USD worth)
pub const GRADUATION_COST_ORDER_USD: u64 = 750;

/// Minimum native balance considered enough for gas (0.001 ETH)
const MIN_GAS_WEI: u64 = 1_000_000_000_000_000;

const NATIVE_DECIMALS: u8 = 18;

/// Balances relevant to graduation on one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub eth_wei: U256,
    pub order_raw: U256,
    pub order_decimals: u8,
}

impl BalanceReport {
    pub fn has_gas(&self) -> bool {
        self.eth_wei >= U256::from(MIN_GAS_WEI)
    }

    /// Native balance rendered to 4 decimal places
    pub fn eth_display(&self) -> String {
        format_fixed(self.eth_wei, NATIVE_DECIMALS, 4)
    }

    /// ORDER balance rendered to 2 decimal places
    pub fn order_display(&self) -> String {
        format_fixed(self.order_raw, self.order_decimals, 2)
    }
}

/// What the graduation check concluded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GraduationOutcome {
    /// Not enough native balance to pay for gas
    InsufficientGas { wallet: String, chain: String },
    /// Dry run requested; all checks passed
    DryRun { broker_id: String, ready: bool },
    /// Checks passed; graduation itself runs through the platform UI
    ManualRequired {
        broker_id: String,
        wallet: String,
        chain: String,
    },
}

#[derive(Debug, Clone)]
pub struct GraduationSummary {
    pub balances: BalanceReport,
    pub broker: BrokerAvailability,
    pub outcome: GraduationOutcome,
}

/// Runs the graduation checks for one wallet, chain, and DEX name
#[derive(Debug)]
pub struct Graduator {
    identity: WalletIdentity,
    dex_name: String,
    chain: Chain,
    registry: ChainRegistry,
    broker: BrokerClient,
}

impl Graduator {
    pub fn new(identity: WalletIdentity, dex_name: impl Into<String>, chain: Chain) -> Result<Self> {
        Ok(Self::with_clients(
            identity,
            dex_name,
            chain,
            ChainRegistry::new(chain),
            BrokerClient::new()?,
        ))
    }

    /// Construct with explicit registry and broker client (tests)
    pub fn with_clients(
        identity: WalletIdentity,
        dex_name: impl Into<String>,
        chain: Chain,
        registry: ChainRegistry,
        broker: BrokerClient,
    ) -> Self {
        Self {
            identity,
            dex_name: dex_name.into(),
            chain,
            registry,
            broker,
        }
    }

    pub fn wallet_address(&self) -> String {
        self.identity.checksum_address()
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn dex_name(&self) -> &str {
        &self.dex_name
    }

    /// Query native and ORDER balances on the selected chain
    pub async fn check_balances(&self) -> Result<BalanceReport> {
        let provider = rpc::read_provider(self.registry.endpoint(self.chain));
        let owner = self.identity.address();

        let eth_wei = rpc::native_balance(&provider, owner).await?;
        let order = rpc::token_balance(&provider, self.chain.order_token(), owner).await?;

        Ok(BalanceReport {
            eth_wei,
            order_raw: order.raw,
            order_decimals: order.decimals,
        })
    }

    /// Check broker-id availability; advisory only.
    ///
    /// A failed lookup logs a warning and reports the id available - the
    /// platform has no reservation protocol either way.
    pub async fn check_broker_availability(&self) -> BrokerAvailability {
        match self.broker.check_name(&self.dex_name).await {
            Ok(availability) => availability,
            Err(err) => {
                warn!(error = %err, "could not verify broker id availability");
                BrokerAvailability {
                    broker_id: broker_id_from_name(&self.dex_name),
                    available: true,
                    suggestion: None,
                }
            }
        }
    }

    /// Run all checks and decide the outcome
    pub async fn graduate(&self, dry_run: bool) -> Result<GraduationSummary> {
        let balances = self.check_balances().await?;
        info!(
            eth = %balances.eth_display(),
            order = %balances.order_display(),
            chain = %self.chain,
            "balances fetched"
        );

        let broker = self.check_broker_availability().await;

        let outcome = if !balances.has_gas() {
            GraduationOutcome::InsufficientGas {
                wallet: self.wallet_address(),
                chain: self.chain.name().to_string(),
            }
        } else if dry_run {
            GraduationOutcome::DryRun {
                broker_id: broker.broker_id.clone(),
                ready: true,
            }
        } else {
            GraduationOutcome::ManualRequired {
                broker_id: broker.broker_id.clone(),
                wallet: self.wallet_address(),
                chain: self.chain.name().to_string(),
            }
        };

        Ok(GraduationSummary {
            balances,
            broker,
            outcome,
        })
    }
}

fn format_fixed(raw: U256, decimals: u8, places: usize) -> String {
    let units = format_units(raw, decimals).unwrap_or_else(|_| "0".to_string());
    match units.parse::<f64>() {
        Ok(value) => format!("{value:.places$}"),
        Err(_) => units,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(eth_wei: u128, order_raw: u128, order_decimals: u8) -> BalanceReport {
        BalanceReport {
            eth_wei: U256::from(eth_wei),
            order_raw: U256::from(order_raw),
            order_decimals,
        }
    }

    #[test]
    fn test_gas_floor_boundary() {
        assert!(report(1_000_000_000_000_000, 0, 18).has_gas());
        assert!(!report(999_999_999_999_999, 0, 18).has_gas());
    }

    #[test]
    fn test_balance_display_formatting() {
        let balances = report(2_000_000_000_000_000_000, 1_234_560_000_000_000_000_000, 18);
        assert_eq!(balances.eth_display(), "2.0000");
        assert_eq!(balances.order_display(), "1234.56");
    }

    #[test]
    fn test_zero_balance_display() {
        let balances = report(0, 0, 18);
        assert_eq!(balances.eth_display(), "0.0000");
        assert_eq!(balances.order_display(), "0.00");
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = GraduationOutcome::DryRun {
            broker_id: "arthur".to_string(),
            ready: true,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "dry_run");
        assert_eq!(json["broker_id"], "arthur");
        assert_eq!(json["ready"], true);
    }
}
