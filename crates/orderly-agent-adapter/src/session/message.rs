/*
[INPUT]:  Raw relay payloads and dispatcher replies
[OUTPUT]: Typed session events and outbound relay messages
[POS]:    Session layer - wire schema for the pairing protocol
[UPDATE]: When adding event kinds or changing the approval payload
*/

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{Chain, RequestEnvelope, ResponseEnvelope};

/// Methods the dispatcher implements; only these are advertised during
/// session approval, so dApps cannot negotiate a method that would
/// always error.
pub const SUPPORTED_METHODS: [&str; 7] = [
    "personal_sign",
    "eth_sign",
    "eth_signTypedData",
    "eth_signTypedData_v3",
    "eth_signTypedData_v4",
    "eth_sendTransaction",
    "wallet_switchEthereumChain",
];

pub const SUPPORTED_EVENTS: [&str; 2] = ["accountsChanged", "chainChanged"];

/// Inbound session events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionProposal(SessionProposal),
    SessionRequest(SessionRequest),
    SessionDelete { topic: String },
    #[serde(other)]
    Other,
}

/// A dApp asking to establish a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProposal {
    pub id: u64,
    pub topic: String,
    #[serde(default)]
    pub proposer: ProposerMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposerMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
}

/// A signing request arriving on an established session topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub topic: String,
    pub id: u64,
    #[serde(rename = "chainId", default)]
    pub chain_id: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl SessionRequest {
    /// View the request as a dispatcher envelope
    pub fn envelope(&self) -> RequestEnvelope {
        RequestEnvelope {
            id: self.id,
            chain_id: self.chain_id.clone(),
            method: self.method.clone(),
            params: self.params.clone(),
        }
    }
}

/// Outbound relay messages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    Subscribe {
        id: String,
        topic: String,
    },
    SessionApprove {
        id: String,
        proposal_id: u64,
        topic: String,
        namespaces: Namespaces,
    },
    SessionReject {
        id: String,
        proposal_id: u64,
        topic: String,
        reason: String,
    },
    SessionResponse {
        id: String,
        topic: String,
        response: ResponseEnvelope,
    },
}

/// Namespaces granted to an approved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespaces {
    pub eip155: NamespaceEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    pub chains: Vec<String>,
    pub methods: Vec<String>,
    pub events: Vec<String>,
    pub accounts: Vec<String>,
}

/// Build the approved namespaces for one wallet account: every supported
/// chain, every implemented method.
pub fn approved_namespaces(account: &str) -> Namespaces {
    Namespaces {
        eip155: NamespaceEntry {
            chains: Chain::ALL.iter().map(|chain| chain.caip2()).collect(),
            methods: SUPPORTED_METHODS.iter().map(|m| m.to_string()).collect(),
            events: SUPPORTED_EVENTS.iter().map(|e| e.to_string()).collect(),
            accounts: Chain::ALL
                .iter()
                .map(|chain| format!("{}:{account}", chain.caip2()))
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_request_event_parses() {
        let raw = r#"{
            "type": "session_request",
            "topic": "t1",
            "id": 42,
            "chainId": "eip155:8453",
            "method": "personal_sign",
            "params": ["0x48656c6c6f"]
        }"#;
        let event: SessionEvent = serde_json::from_str(raw).unwrap();
        match event {
            SessionEvent::SessionRequest(request) => {
                assert_eq!(request.topic, "t1");
                assert_eq!(request.id, 42);
                assert_eq!(request.chain_id, "eip155:8453");
                let envelope = request.envelope();
                assert_eq!(envelope.method, "personal_sign");
                assert_eq!(envelope.params[0], "0x48656c6c6f");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_session_proposal_event_parses() {
        let raw = r#"{
            "type": "session_proposal",
            "id": 1,
            "topic": "t2",
            "proposer": {"name": "Example DEX", "url": "https://dex.example.org"}
        }"#;
        let event: SessionEvent = serde_json::from_str(raw).unwrap();
        match event {
            SessionEvent::SessionProposal(proposal) => {
                assert_eq!(proposal.proposer.name, "Example DEX");
                assert_eq!(proposal.topic, "t2");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event_maps_to_other() {
        let event: SessionEvent =
            serde_json::from_str(r#"{"type": "session_ping", "topic": "t"}"#).unwrap();
        assert_eq!(event, SessionEvent::Other);
    }

    #[test]
    fn test_approved_namespaces_cover_all_chains() {
        let namespaces = approved_namespaces("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(namespaces.eip155.chains.len(), Chain::ALL.len());
        assert!(namespaces.eip155.chains.contains(&"eip155:1".to_string()));
        assert!(
            namespaces
                .eip155
                .accounts
                .contains(&"eip155:8453:0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string())
        );
        assert!(
            namespaces
                .eip155
                .methods
                .contains(&"eth_sendTransaction".to_string())
        );
        // Methods the dispatcher rejects are not advertised.
        assert!(
            !namespaces
                .eip155
                .methods
                .contains(&"eth_signTransaction".to_string())
        );
    }

    #[test]
    fn test_outbound_message_serializes_with_tag() {
        let message = OutboundMessage::Subscribe {
            id: "m1".to_string(),
            topic: "t1".to_string(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "subscribe");
        assert_eq!(json["topic"], "t1");
    }
}
