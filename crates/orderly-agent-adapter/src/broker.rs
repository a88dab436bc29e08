/*
[INPUT]:  DEX name and the platform's public broker listing
[OUTPUT]: Derived broker id and advisory availability
[POS]:    HTTP layer - broker-name lookup client
[UPDATE]: When the broker API endpoint or response format changes
*/

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::{AgentError, Result};

const BROKER_API_BASE_URL: &str = "https://api-evm.orderly.org";
const BROKER_LIST_ENDPOINT: &str = "/v1/public/broker/name";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// One registered broker row from the public listing
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BrokerRecord {
    pub broker_id: String,
    #[serde(default)]
    pub broker_name: String,
}

#[derive(Debug, Deserialize)]
struct BrokerListResponse {
    success: bool,
    #[serde(default)]
    data: BrokerRows,
}

#[derive(Debug, Default, Deserialize)]
struct BrokerRows {
    #[serde(default)]
    rows: Vec<BrokerRecord>,
}

/// Result of an availability check.
///
/// Availability is advisory only: the platform has no reservation
/// protocol, so a free id can still be taken by the time graduation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerAvailability {
    pub broker_id: String,
    pub available: bool,
    pub suggestion: Option<String>,
}

/// Client for the DEX platform's public broker-name API
#[derive(Debug)]
pub struct BrokerClient {
    http_client: Client,
    base_url: Url,
}

impl BrokerClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, BROKER_API_BASE_URL)
    }

    /// Create a new client pointed at an explicit base URL (tests)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Fetch the full broker listing
    ///
    /// GET /v1/public/broker/name
    pub async fn list_brokers(&self) -> Result<Vec<BrokerRecord>> {
        let url = self.base_url.join(BROKER_LIST_ENDPOINT)?;
        let response: BrokerListResponse =
            self.http_client.get(url).send().await?.json().await?;

        if !response.success {
            return Err(AgentError::InvalidResponse(
                "broker listing reported failure".to_string(),
            ));
        }

        Ok(response.data.rows)
    }

    /// Check whether the broker id derived from a DEX name is unclaimed.
    ///
    /// A taken id comes back with a timestamp-suffixed suggestion.
    pub async fn check_name(&self, dex_name: &str) -> Result<BrokerAvailability> {
        let broker_id = broker_id_from_name(dex_name);
        let rows = self.list_brokers().await?;

        let taken = rows.iter().any(|row| row.broker_id == broker_id);
        let suggestion = taken.then(|| format!("{broker_id}_{}", collision_suffix()));

        Ok(BrokerAvailability {
            broker_id,
            available: !taken,
            suggestion,
        })
    }
}

/// Derive a broker id from a DEX display name: lowercase, with every
/// byte outside `[a-z0-9]` replaced by an underscore.
pub fn broker_id_from_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn collision_suffix() -> String {
    base36(Utc::now().timestamp_millis().max(0) as u64)
}

fn base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.iter().rev().map(|&b| b as char).collect()
}
