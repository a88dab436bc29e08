/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Orderly agent adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod broker;
pub mod dispatch;
pub mod error;
pub mod graduation;
pub mod rpc;
pub mod session;
pub mod types;
pub mod wallet;

// Re-export commonly used types from broker
pub use broker::{
    BrokerAvailability,
    BrokerClient,
    BrokerRecord,
    ClientConfig,
    broker_id_from_name,
};

// Re-export commonly used types from dispatch
pub use dispatch::{RequestDispatcher, WalletRequest};

// Re-export error types
pub use error::{AgentError, Result};

// Re-export graduation types
pub use graduation::{
    GRADUATION_COST_ORDER_USD,
    GRADUATION_COST_USDC,
    BalanceReport,
    GraduationOutcome,
    GraduationSummary,
    Graduator,
};

// Re-export commonly used types from session
pub use session::{
    MockSessionTransport,
    PairingUri,
    SessionEvent,
    SessionProposal,
    SessionRequest,
    SessionSocket,
    SessionTransport,
    SignerService,
    default_relay_url,
};

// Re-export all shared types
pub use types::*;

// Re-export the wallet identity
pub use wallet::WalletIdentity;
