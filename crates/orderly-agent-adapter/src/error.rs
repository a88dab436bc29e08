/*
[INPUT]:  Error sources (startup config, request dispatch, RPC, HTTP, pairing)
[OUTPUT]: Structured error types with fatality and reply-code helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Orderly agent adapter
#[derive(Error, Debug)]
pub enum AgentError {
    /// Startup configuration is missing or malformed (wallet file, key material)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request named a method the dispatcher does not implement
    #[error("Unsupported method: {method}")]
    UnsupportedMethod { method: String },

    /// Request parameters are missing or malformed
    #[error("Invalid request params: {0}")]
    InvalidParams(String),

    /// Underlying key-signing call rejected
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Network rejected a submitted transaction
    #[error("Broadcast failed: {0}")]
    Broadcast(String),

    /// Session negotiation rejected or transport unavailable
    #[error("Pairing failed: {0}")]
    Pairing(String),

    /// Chain RPC read failed
    #[error("RPC error: {0}")]
    Rpc(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl AgentError {
    /// Check if the error must terminate the process.
    ///
    /// Only startup configuration errors are fatal; every per-request
    /// error is converted into an error reply and the listener keeps going.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AgentError::Config(_))
    }

    /// Check if the error came from parsing the request itself
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            AgentError::UnsupportedMethod { .. } | AgentError::InvalidParams(_)
        )
    }
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AgentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_fatality() {
        assert!(AgentError::Config("missing wallet".into()).is_fatal());
        assert!(!AgentError::Signing("rejected".into()).is_fatal());
        assert!(!AgentError::Broadcast("nonce too low".into()).is_fatal());
    }

    #[test]
    fn test_unsupported_method_message() {
        let err = AgentError::UnsupportedMethod {
            method: "totally_unknown".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported method: totally_unknown");
        assert!(err.is_request_error());
    }

    #[test]
    fn test_request_error_classification() {
        assert!(AgentError::InvalidParams("missing param 0".into()).is_request_error());
        assert!(!AgentError::Pairing("relay closed".into()).is_request_error());
    }
}
