/*
[INPUT]:  Chain identifiers (CLI keys, numeric ids, CAIP-2 strings)
[OUTPUT]: RPC endpoints and ORDER token addresses per chain
[POS]:    Data layer - static chain configuration
[UPDATE]: When adding supported chains or rotating RPC endpoints
*/

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use alloy::primitives::{Address, address};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AgentError;

/// Chains the wallet operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    Ethereum,
    Base,
    Arbitrum,
    Optimism,
}

impl Chain {
    pub const ALL: [Chain; 4] = [
        Chain::Ethereum,
        Chain::Base,
        Chain::Arbitrum,
        Chain::Optimism,
    ];

    /// EIP-155 chain id
    pub fn id(self) -> u64 {
        match self {
            Chain::Ethereum => 1,
            Chain::Base => 8453,
            Chain::Arbitrum => 42161,
            Chain::Optimism => 10,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Chain::Ethereum => "Ethereum",
            Chain::Base => "Base",
            Chain::Arbitrum => "Arbitrum",
            Chain::Optimism => "Optimism",
        }
    }

    /// Lowercase key used on the command line and in serialized config
    pub fn key(self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Base => "base",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
        }
    }

    /// Built-in public RPC endpoint
    pub fn rpc_url(self) -> &'static str {
        match self {
            Chain::Ethereum => "https://eth.llamarpc.com",
            Chain::Base => "https://mainnet.base.org",
            Chain::Arbitrum => "https://arb1.arbitrum.io/rpc",
            Chain::Optimism => "https://mainnet.optimism.io",
        }
    }

    /// ORDER token contract on this chain
    pub fn order_token(self) -> Address {
        match self {
            Chain::Ethereum => address!("0xabd4c63d2616a5201454168269031355f4764337"),
            Chain::Base => address!("0x4E200fE2f3eFb977d5fd9c430A41531FB04d97B8"),
            Chain::Arbitrum => address!("0x4E200fE2f3eFb977d5fd9c430A41531FB04d97B8"),
            Chain::Optimism => address!("0x4E200fE2f3eFb977d5fd9c430A41531FB04d97B8"),
        }
    }

    pub fn from_id(id: u64) -> Option<Chain> {
        Chain::ALL.into_iter().find(|chain| chain.id() == id)
    }

    /// CAIP-2 identifier, e.g. `eip155:8453`
    pub fn caip2(self) -> String {
        format!("eip155:{}", self.id())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chain::ALL
            .into_iter()
            .find(|chain| chain.key() == s.to_ascii_lowercase())
            .ok_or_else(|| AgentError::Config(format!("unknown chain: {s}")))
    }
}

/// Mapping from chain to RPC endpoint URL.
///
/// Seeded with the built-in endpoints; individual endpoints can be
/// overridden (tests point them at a mock server). Requests naming a chain
/// outside the registry resolve to the default chain's endpoint.
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    endpoints: HashMap<Chain, Url>,
    default_chain: Chain,
}

impl ChainRegistry {
    pub fn new(default_chain: Chain) -> Self {
        let endpoints = Chain::ALL
            .into_iter()
            .map(|chain| {
                let url = Url::parse(chain.rpc_url()).expect("built-in RPC endpoint is valid");
                (chain, url)
            })
            .collect();
        Self {
            endpoints,
            default_chain,
        }
    }

    pub fn with_endpoint(mut self, chain: Chain, url: Url) -> Self {
        self.endpoints.insert(chain, url);
        self
    }

    pub fn default_chain(&self) -> Chain {
        self.default_chain
    }

    pub fn endpoint(&self, chain: Chain) -> &Url {
        &self.endpoints[&chain]
    }

    /// Resolve a CAIP-2 chain id (`eip155:<id>`) to a registered chain.
    ///
    /// Unknown or malformed ids fall back to the default chain rather than
    /// failing the request.
    pub fn resolve_caip2(&self, chain_id: &str) -> (Chain, &Url) {
        let chain = parse_caip2(chain_id)
            .and_then(Chain::from_id)
            .unwrap_or(self.default_chain);
        (chain, self.endpoint(chain))
    }
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new(Chain::Ethereum)
    }
}

fn parse_caip2(chain_id: &str) -> Option<u64> {
    let (namespace, reference) = chain_id.split_once(':')?;
    if namespace != "eip155" {
        return None;
    }
    reference.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ids() {
        assert_eq!(Chain::Ethereum.id(), 1);
        assert_eq!(Chain::Base.id(), 8453);
        assert_eq!(Chain::Arbitrum.id(), 42161);
        assert_eq!(Chain::Optimism.id(), 10);
    }

    #[test]
    fn test_chain_from_id() {
        assert_eq!(Chain::from_id(8453), Some(Chain::Base));
        assert_eq!(Chain::from_id(10), Some(Chain::Optimism));
        assert_eq!(Chain::from_id(137), None);
    }

    #[test]
    fn test_chain_from_str() {
        assert_eq!("base".parse::<Chain>().unwrap(), Chain::Base);
        assert_eq!("Ethereum".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert!("polygon".parse::<Chain>().is_err());
    }

    #[test]
    fn test_caip2_roundtrip() {
        assert_eq!(Chain::Base.caip2(), "eip155:8453");
        assert_eq!(parse_caip2("eip155:42161"), Some(42161));
        assert_eq!(parse_caip2("solana:mainnet"), None);
        assert_eq!(parse_caip2("8453"), None);
    }

    #[test]
    fn test_registry_resolves_known_chain() {
        let registry = ChainRegistry::default();
        let (chain, url) = registry.resolve_caip2("eip155:8453");
        assert_eq!(chain, Chain::Base);
        assert_eq!(url.as_str(), "https://mainnet.base.org/");
    }

    #[test]
    fn test_registry_falls_back_to_default_chain() {
        let registry = ChainRegistry::default();
        let (chain, _) = registry.resolve_caip2("eip155:137");
        assert_eq!(chain, Chain::Ethereum);

        let (chain, _) = registry.resolve_caip2("not-a-caip-id");
        assert_eq!(chain, Chain::Ethereum);
    }

    #[test]
    fn test_registry_endpoint_override() {
        let override_url = Url::parse("http://localhost:8545").unwrap();
        let registry =
            ChainRegistry::default().with_endpoint(Chain::Base, override_url.clone());
        assert_eq!(registry.endpoint(Chain::Base), &override_url);
        assert_eq!(
            registry.endpoint(Chain::Ethereum).as_str(),
            "https://eth.llamarpc.com/"
        );
    }
}
