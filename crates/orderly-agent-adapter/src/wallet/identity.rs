/*
[INPUT]:  Wallet JSON file with a privateKey field
[OUTPUT]: Signatures (EIP-191, EIP-712) and the derived address
[POS]:    Wallet layer - the single signing identity
[UPDATE]: When the wallet file format or signing surface changes
*/

use std::path::Path;
use std::str::FromStr;

use alloy::dyn_abi::TypedData;
use alloy::primitives::Address;
use alloy::signers::Signer;
use alloy::signers::local::PrivateKeySigner;
use serde::Deserialize;

use crate::error::{AgentError, Result};

/// Wallet file schema; extra fields are ignored
#[derive(Debug, Deserialize)]
struct WalletFile {
    #[serde(rename = "privateKey")]
    private_key: Option<String>,
}

/// The one signing identity active for the process lifetime.
///
/// Loaded once at startup and read-only afterwards. The private key is
/// held by the inner signer and never logged or written back out.
#[derive(Debug, Clone)]
pub struct WalletIdentity {
    signer: PrivateKeySigner,
    address: Address,
}

impl WalletIdentity {
    /// Load the identity from a wallet JSON file.
    ///
    /// A missing file, unreadable JSON, or absent `privateKey` field is a
    /// fatal startup error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AgentError::Config(format!(
                "Wallet file not found: {}",
                path.display()
            )));
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| AgentError::Config(format!("Failed to read wallet file: {e}")))?;
        let wallet: WalletFile = serde_json::from_str(&raw)
            .map_err(|e| AgentError::Config(format!("Wallet file is not valid JSON: {e}")))?;

        let private_key = wallet
            .private_key
            .ok_or_else(|| AgentError::Config("Wallet JSON must contain privateKey".to_string()))?;

        Self::from_private_key(&private_key)
    }

    /// Create the identity from a hex-encoded private key.
    ///
    /// Supports both "0x"-prefixed and non-prefixed hex strings.
    pub fn from_private_key(private_key_hex: &str) -> Result<Self> {
        let trimmed = private_key_hex.trim();
        let private_key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let signer = PrivateKeySigner::from_str(private_key_hex)
            .map_err(|e| AgentError::Config(format!("Invalid private key: {e}")))?;
        let address = signer.address();

        Ok(Self { signer, address })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// EIP-55 checksummed address string
    pub fn checksum_address(&self) -> String {
        self.address.to_checksum(None)
    }

    /// Expose the local signer for provider wallet construction
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign raw bytes under EIP-191 and return the 0x-hex signature
    pub async fn sign_message(&self, message: &[u8]) -> Result<String> {
        let signature = self
            .signer
            .sign_message(message)
            .await
            .map_err(|e| AgentError::Signing(e.to_string()))?;

        // alloy's Signature as_bytes() returns [r, s, v]
        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }

    /// Sign an EIP-712 typed-data payload and return the 0x-hex signature
    pub async fn sign_typed_data(&self, payload: &TypedData) -> Result<String> {
        let hash = payload
            .eip712_signing_hash()
            .map_err(|e| AgentError::Signing(format!("typed data hashing failed: {e}")))?;
        let signature = self
            .signer
            .sign_hash(&hash)
            .await
            .map_err(|e| AgentError::Signing(e.to_string()))?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::path::PathBuf;

    use alloy::primitives::Signature;
    use uuid::Uuid;

    // A well-known test private key
    const TEST_PK: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TEST_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn temp_wallet_file(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("agent-wallet-test-{}.json", Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_private_key_derives_address() {
        let identity = WalletIdentity::from_private_key(TEST_PK).unwrap();
        assert_eq!(identity.checksum_address(), TEST_ADDRESS);
    }

    #[test]
    fn test_from_private_key_no_prefix() {
        let identity = WalletIdentity::from_private_key(&TEST_PK[2..]).unwrap();
        assert_eq!(identity.checksum_address(), TEST_ADDRESS);
    }

    #[test]
    fn test_from_file_happy_path() {
        let path = temp_wallet_file(&format!(
            r#"{{"privateKey": "{TEST_PK}", "address": "{TEST_ADDRESS}"}}"#
        ));
        let identity = WalletIdentity::from_file(&path).unwrap();
        assert_eq!(identity.checksum_address(), TEST_ADDRESS);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_file_missing_file() {
        let err = WalletIdentity::from_file("/nonexistent/wallet.json").unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_from_file_missing_private_key() {
        let path = temp_wallet_file(r#"{"address": "0x00"}"#);
        let err = WalletIdentity::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("privateKey"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_from_file_malformed_json() {
        let path = temp_wallet_file("not json at all");
        let err = WalletIdentity::from_file(&path).unwrap_err();
        assert!(err.is_fatal());
        fs::remove_file(path).unwrap();
    }

    #[tokio::test]
    async fn test_sign_message_shape() {
        let identity = WalletIdentity::from_private_key(TEST_PK).unwrap();
        let signature = identity.sign_message(b"hello").await.unwrap();

        assert!(signature.starts_with("0x"));
        assert_eq!(signature.len(), 132); // 0x + 65 bytes * 2
    }

    #[tokio::test]
    async fn test_sign_message_deterministic_and_recoverable() {
        let identity = WalletIdentity::from_private_key(TEST_PK).unwrap();

        let first = identity.sign_message(b"Hello").await.unwrap();
        let second = identity.sign_message(b"Hello").await.unwrap();
        assert_eq!(first, second);

        let signature: Signature = first.parse().unwrap();
        let recovered = signature.recover_address_from_msg(b"Hello").unwrap();
        assert_eq!(recovered, identity.address());
    }
}
