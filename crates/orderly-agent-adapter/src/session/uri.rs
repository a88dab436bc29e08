/*
[INPUT]:  Pairing URI string copied from the dApp (wc:<topic>@<version>?...)
[OUTPUT]: Parsed topic, protocol version, relay URL, symmetric key
[POS]:    Session layer - pairing URI parsing
[UPDATE]: When the pairing URI format gains parameters
*/

use std::str::FromStr;

use url::Url;

use crate::error::{AgentError, Result};

pub const DEFAULT_RELAY_URL: &str = "wss://relay.walletconnect.org";

/// Relay endpoint used when the pairing URI does not name one
pub fn default_relay_url() -> Result<Url> {
    Ok(Url::parse(DEFAULT_RELAY_URL)?)
}

/// A parsed pairing URI
#[derive(Debug, Clone, PartialEq)]
pub struct PairingUri {
    pub topic: String,
    pub version: u8,
    pub relay_url: Url,
    pub sym_key: Option<String>,
}

impl FromStr for PairingUri {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s
            .trim()
            .strip_prefix("wc:")
            .ok_or_else(|| AgentError::Pairing("pairing URI must start with wc:".to_string()))?;

        let (head, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (topic, version) = head
            .split_once('@')
            .ok_or_else(|| AgentError::Pairing("pairing URI missing @version".to_string()))?;

        if topic.is_empty() {
            return Err(AgentError::Pairing("pairing URI has empty topic".to_string()));
        }
        let version = version
            .parse()
            .map_err(|_| AgentError::Pairing(format!("invalid pairing version: {version}")))?;

        let mut relay_url = None;
        let mut sym_key = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "relay-url" => relay_url = Some(Url::parse(&value)?),
                "symKey" => sym_key = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(Self {
            topic: topic.to_string(),
            version,
            relay_url: match relay_url {
                Some(url) => url,
                None => default_relay_url()?,
            },
            sym_key,
        })
    }
}
