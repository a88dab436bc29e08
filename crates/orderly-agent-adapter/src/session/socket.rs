/*
[INPUT]:  Relay WebSocket URL and outbound session messages
[OUTPUT]: Parsed session events via channel, JSON frames to the relay
[POS]:    Session layer - relay socket I/O pump
[UPDATE]: When adding outbound message kinds or changing connection logic
*/

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::error::{AgentError, Result};
use crate::types::ResponseEnvelope;

use super::message::{Namespaces, OutboundMessage, SessionEvent, SessionProposal};
use super::transport::SessionTransport;
use super::uri::PairingUri;

/// WebSocket client for the session relay.
///
/// One spawned task pumps the socket in both directions; events arrive on
/// an mpsc channel, outbound messages leave through another. The listener
/// consumes this through the `SessionTransport` trait.
#[derive(Debug)]
pub struct SessionSocket {
    event_tx: mpsc::Sender<SessionEvent>,
    event_rx: mpsc::Receiver<SessionEvent>,
    outbound_tx: Arc<Mutex<Option<mpsc::Sender<WsMessage>>>>,
}

impl SessionSocket {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            event_tx: tx,
            event_rx: rx,
            outbound_tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Connect to the relay and start the I/O pump
    pub async fn connect(&self, relay_url: &Url) -> Result<()> {
        let (ws_stream, _response) = connect_async(relay_url.as_str())
            .await
            .map_err(|e| AgentError::Pairing(format!("relay connect failed: {e}")))?;
        let (mut write, mut read) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::channel(100);
        let outbound_state = self.outbound_tx.clone();

        {
            let mut guard = outbound_state.lock().await;
            if guard.is_some() {
                return Err(AgentError::Pairing("relay already connected".to_string()));
            }
            *guard = Some(outbound_tx);
        }
        info!(relay = %relay_url, "relay connected");

        let event_tx = self.event_tx.clone();
        let outbound_state_for_task = outbound_state.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        match outbound {
                            Some(message) => {
                                if write.send(message).await.is_err() {
                                    break;
                                }
                            }
                            None => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                        }
                    }
                    incoming = read.next() => {
                        match incoming {
                            Some(Ok(WsMessage::Close(_))) => {
                                let _ = write.send(WsMessage::Close(None)).await;
                                break;
                            }
                            Some(Ok(WsMessage::Ping(_))) | Some(Ok(WsMessage::Pong(_))) => {}
                            Some(Ok(message)) => {
                                if let Some(parsed) = Self::parse_event(message)
                                    && event_tx.send(parsed).await.is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) | None => {
                                break;
                            }
                        }
                    }
                }
            }

            let mut guard = outbound_state_for_task.lock().await;
            *guard = None;
        });

        Ok(())
    }

    async fn send_outbound(&self, message: &OutboundMessage) -> Result<()> {
        let sender = {
            let guard = self.outbound_tx.lock().await;
            guard
                .clone()
                .ok_or_else(|| AgentError::Pairing("relay not connected".to_string()))?
        };

        let frame = serde_json::to_string(message)?;
        sender
            .send(WsMessage::Text(frame.into()))
            .await
            .map_err(|_| AgentError::Pairing("relay send channel closed".to_string()))?;

        Ok(())
    }

    fn parse_event(message: WsMessage) -> Option<SessionEvent> {
        let text: String = match message {
            WsMessage::Text(text) => text.to_string(),
            WsMessage::Binary(bytes) => String::from_utf8(bytes.to_vec()).ok()?,
            _ => return Some(SessionEvent::Other),
        };

        match serde_json::from_str::<SessionEvent>(&text) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!(error = %err, bytes = text.len(), "session event parse failed");
                Some(SessionEvent::Other)
            }
        }
    }

    fn message_id() -> String {
        Uuid::new_v4().to_string()
    }
}

impl Default for SessionSocket {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionTransport for SessionSocket {
    async fn next_event(&mut self) -> Option<SessionEvent> {
        self.event_rx.recv().await
    }

    async fn pair(&mut self, uri: &PairingUri) -> Result<()> {
        self.send_outbound(&OutboundMessage::Subscribe {
            id: Self::message_id(),
            topic: uri.topic.clone(),
        })
        .await
    }

    async fn approve_session(
        &mut self,
        proposal: &SessionProposal,
        namespaces: Namespaces,
    ) -> Result<()> {
        self.send_outbound(&OutboundMessage::SessionApprove {
            id: Self::message_id(),
            proposal_id: proposal.id,
            topic: proposal.topic.clone(),
            namespaces,
        })
        .await
    }

    async fn reject_session(&mut self, proposal: &SessionProposal, reason: &str) -> Result<()> {
        self.send_outbound(&OutboundMessage::SessionReject {
            id: Self::message_id(),
            proposal_id: proposal.id,
            topic: proposal.topic.clone(),
            reason: reason.to_string(),
        })
        .await
    }

    async fn respond(&mut self, topic: &str, response: ResponseEnvelope) -> Result<()> {
        self.send_outbound(&OutboundMessage::SessionResponse {
            id: Self::message_id(),
            topic: topic.to_string(),
            response,
        })
        .await
    }
}
