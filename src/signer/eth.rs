//! Local secp256k1 signer backed by a hex private key.
//!
//! # Security
//! - The key is parsed once and held only inside the alloy signer
//! - Keys are never logged or serialized

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, Signer};
use async_trait::async_trait;

use crate::signer::types::{OrchestrationSigner, SignerError, SignerResult};

/// Ethereum signer for orchestration authorizations and instructions.
#[derive(Clone)]
pub struct EthSigner {
    signer: PrivateKeySigner,
}

impl EthSigner {
    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn new(private_key_hex: &str) -> SignerResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SignerError::InvalidKey(format!("{}", e)))?;

        tracing::info!(address = %signer.address(), "EthSigner initialized");

        Ok(Self { signer })
    }
}

#[async_trait]
impl OrchestrationSigner for EthSigner {
    fn address(&self) -> Address {
        self.signer.address()
    }

    async fn sign_hash(&self, hash: B256) -> SignerResult<Signature> {
        self.signer
            .sign_hash(&hash)
            .await
            .map_err(|e| SignerError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for EthSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthSigner")
            .field("address", &self.signer.address())
            .finish()
    }
}
