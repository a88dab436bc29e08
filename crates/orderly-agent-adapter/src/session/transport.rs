/*
[INPUT]:  Session events from the relay, replies from the dispatcher
[OUTPUT]: Transport abstraction decoupling the listener from the socket
[POS]:    Session layer - transport trait and test double
[UPDATE]: When the listener needs new transport operations
*/

use std::collections::VecDeque;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ResponseEnvelope;

use super::message::{Namespaces, SessionEvent, SessionProposal};
use super::uri::PairingUri;

/// Trait for the peer-session transport.
///
/// The listener only ever sees this surface; the WebSocket relay client
/// implements it for production and `MockSessionTransport` for tests.
#[async_trait]
pub trait SessionTransport: Send {
    /// Receive the next inbound event; `None` means the transport closed
    async fn next_event(&mut self) -> Option<SessionEvent>;

    /// Subscribe to the pairing topic from a pairing URI
    async fn pair(&mut self, uri: &PairingUri) -> Result<()>;

    /// Approve a session proposal with the granted namespaces
    async fn approve_session(
        &mut self,
        proposal: &SessionProposal,
        namespaces: Namespaces,
    ) -> Result<()>;

    /// Reject a session proposal
    async fn reject_session(&mut self, proposal: &SessionProposal, reason: &str) -> Result<()>;

    /// Deliver a reply envelope on a session topic
    async fn respond(&mut self, topic: &str, response: ResponseEnvelope) -> Result<()>;
}

/// Mock transport for testing the listener without a relay.
///
/// Events are drained from a queue; everything sent is recorded.
#[derive(Debug, Default)]
pub struct MockSessionTransport {
    events: VecDeque<SessionEvent>,
    pub paired_topics: Vec<String>,
    pub approvals: Vec<(u64, Namespaces)>,
    pub rejections: Vec<(u64, String)>,
    pub responses: Vec<(String, ResponseEnvelope)>,
}

impl MockSessionTransport {
    pub fn new(events: impl IntoIterator<Item = SessionEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SessionTransport for MockSessionTransport {
    async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }

    async fn pair(&mut self, uri: &PairingUri) -> Result<()> {
        self.paired_topics.push(uri.topic.clone());
        Ok(())
    }

    async fn approve_session(
        &mut self,
        proposal: &SessionProposal,
        namespaces: Namespaces,
    ) -> Result<()> {
        self.approvals.push((proposal.id, namespaces));
        Ok(())
    }

    async fn reject_session(&mut self, proposal: &SessionProposal, reason: &str) -> Result<()> {
        self.rejections.push((proposal.id, reason.to_string()));
        Ok(())
    }

    async fn respond(&mut self, topic: &str, response: ResponseEnvelope) -> Result<()> {
        self.responses.push((topic.to_string(), response));
        Ok(())
    }
}
