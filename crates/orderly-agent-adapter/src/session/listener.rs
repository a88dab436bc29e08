/*
[INPUT]:  Session events from the transport, shutdown signal
[OUTPUT]: Approved sessions and signed replies, one request at a time
[POS]:    Session layer - the auto-signing listener loop
[UPDATE]: When changing approval policy or the request lifecycle
*/

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::dispatch::RequestDispatcher;
use crate::error::Result;

use super::message::{SessionEvent, SessionProposal, SessionRequest, approved_namespaces};
use super::transport::SessionTransport;
use super::uri::PairingUri;

pub const REJECTION_REASON: &str = "USER_REJECTED";

/// Event-driven listener pairing the wallet with a dApp and auto-signing
/// every request.
///
/// One request-response cycle completes before the next event is taken;
/// there is no buffering of in-flight requests.
pub struct SignerService<T: SessionTransport> {
    transport: T,
    dispatcher: RequestDispatcher,
}

impl<T: SessionTransport> SignerService<T> {
    pub fn new(transport: T, dispatcher: RequestDispatcher) -> Self {
        Self {
            transport,
            dispatcher,
        }
    }

    /// Access the underlying transport (tests inspect the mock this way)
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run until the transport closes or the shutdown token fires.
    ///
    /// Per-request failures become error replies; only pairing the
    /// initial topic can fail the whole run.
    pub async fn run(
        &mut self,
        pairing: Option<PairingUri>,
        shutdown: CancellationToken,
    ) -> Result<()> {
        if let Some(uri) = pairing {
            self.transport.pair(&uri).await?;
            info!(topic = %uri.topic, "pairing initiated, waiting for session approval");
        }

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("shutdown signal received");
                    break;
                }
                event = self.transport.next_event() => {
                    match event {
                        Some(event) => self.handle_event(event).await,
                        None => {
                            info!("session transport closed");
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SessionProposal(proposal) => self.handle_proposal(proposal).await,
            SessionEvent::SessionRequest(request) => self.handle_request(request).await,
            SessionEvent::SessionDelete { topic } => {
                info!(topic, "session deleted");
            }
            SessionEvent::Other => {
                debug!("ignoring unrecognized session event");
            }
        }
    }

    async fn handle_proposal(&mut self, proposal: SessionProposal) {
        info!(
            proposer = %proposal.proposer.name,
            url = %proposal.proposer.url,
            "session proposal received"
        );

        let namespaces = approved_namespaces(&self.dispatcher.account());
        match self.transport.approve_session(&proposal, namespaces).await {
            Ok(()) => {
                info!(topic = %proposal.topic, "session approved");
            }
            Err(err) => {
                error!(error = %err, "failed to approve session");
                if let Err(err) = self
                    .transport
                    .reject_session(&proposal, REJECTION_REASON)
                    .await
                {
                    warn!(error = %err, "failed to deliver session rejection");
                }
            }
        }
    }

    async fn handle_request(&mut self, request: SessionRequest) {
        info!(
            id = request.id,
            method = %request.method,
            chain = %request.chain_id,
            "sign request received"
        );

        let response = self.dispatcher.dispatch(&request.envelope()).await;
        if response.is_success() {
            info!(id = request.id, "request signed");
        }

        if let Err(err) = self.transport.respond(&request.topic, response).await {
            error!(error = %err, "failed to deliver response");
        }
    }
}
