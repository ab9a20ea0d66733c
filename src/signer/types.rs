//! Signer capability and error definitions.

use alloy::primitives::{Address, B256};
use alloy::signers::Signature;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while constructing a signer or producing signatures.
#[derive(Debug, Error)]
pub enum SignerError {
    /// Invalid private key format or derivation error.
    #[error("Invalid private key format: {0}")]
    InvalidKey(String),

    /// The underlying signer refused or failed to sign.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for signer operations.
pub type SignerResult<T> = Result<T, SignerError>;

/// Capability to authorize and sign orchestration payloads.
///
/// The orchestration client only ever needs a prehashed 32-byte digest signed;
/// typed-data hashing happens on the client side so any key backend (local key,
/// remote KMS) can sit behind this trait.
#[async_trait]
pub trait OrchestrationSigner: Send + Sync {
    /// Address controlled by this signer.
    fn address(&self) -> Address;

    /// Sign a 32-byte digest without any message prefix.
    async fn sign_hash(&self, hash: B256) -> SignerResult<Signature>;
}
