/*
[INPUT]:  Pairing URIs and relay traffic
[OUTPUT]: Session events in, approvals and signed replies out
[POS]:    Session layer - module wiring
[UPDATE]: When the pairing flow or transport surface changes
*/

pub mod listener;
pub mod message;
pub mod socket;
pub mod transport;
pub mod uri;

pub use listener::{REJECTION_REASON, SignerService};
pub use message::{
    NamespaceEntry,
    Namespaces,
    OutboundMessage,
    ProposerMetadata,
    SUPPORTED_EVENTS,
    SUPPORTED_METHODS,
    SessionEvent,
    SessionProposal,
    SessionRequest,
    approved_namespaces,
};
pub use socket::SessionSocket;
pub use transport::{MockSessionTransport, SessionTransport};
pub use uri::{DEFAULT_RELAY_URL, PairingUri, default_relay_url};
