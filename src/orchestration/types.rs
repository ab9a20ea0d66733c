//! Orchestration API wire types and error definitions.
//!
//! All payloads are JSON with camelCase keys. Amounts and salts are `U256`
//! (serialized as 0x-prefixed hex), addresses as hex strings.

use alloy::primitives::{Address, Bytes, U256};
use alloy::signers::Signature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const ETHEREUM: ChainId = ChainId(1);
    /// Base.
    pub const BASE: ChainId = ChainId(8453);
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Request to build an unsigned settlement orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettlementOrchestrationRequest {
    /// Tokens the payer may fund the settlement with, per source chain.
    pub accepted_tokens: BTreeMap<ChainId, Vec<Address>>,
    /// Chain the funds converge on.
    pub settlement_chain: ChainId,
    /// Token delivered to the recipient.
    pub settlement_token: Address,
    /// Amount in the settlement token's base units.
    pub settlement_amount: U256,
    /// Final recipient of the settled funds.
    pub recipient_address: Address,
    /// Free-form label stored with the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// How many times the settlement may run before it closes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_runs: Option<u32>,
}

/// An EIP-7702 delegation the service needs signed before it can act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRequest {
    pub chain_id: ChainId,
    pub delegate_address: Address,
    pub nonce: u64,
}

/// An unsigned instruction as returned by the build call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionBuild {
    pub chain_id: ChainId,
    pub salt: U256,
    pub max_executions: U256,
    pub action: Address,
    pub arguments: Bytes,
    /// Delegate contract that verifies the instruction signature.
    pub delegate_address: Address,
}

/// Response of the build call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettlementOrchestrationResponse {
    /// Opaque identifier of this settlement request.
    pub request_id: String,
    /// Short-lived address generated by the service to receive funds.
    pub ephemeral_wallet_address: Address,
    #[serde(default)]
    pub authorizations: Vec<AuthorizationRequest>,
    #[serde(default)]
    pub instructions: Vec<InstructionBuild>,
    #[serde(default)]
    pub completion_instructions: Vec<InstructionBuild>,
}

/// A signed EIP-7702 authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedAuthorization {
    #[serde(flatten)]
    pub authorization: AuthorizationRequest,
    pub signature: Signature,
}

/// An instruction with its EIP-712 signature attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInstruction {
    #[serde(flatten)]
    pub instruction: InstructionBuild,
    pub signature: Signature,
}

/// Signed orchestration ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrchestrationRequest {
    pub request_id: String,
    pub ephemeral_wallet_address: Address,
    pub authorizations: Vec<SignedAuthorization>,
    pub instructions: Vec<SignedInstruction>,
    pub completion_instructions: Vec<SignedInstruction>,
}

impl NewOrchestrationRequest {
    /// Total number of signed instructions (primary + completion).
    pub fn instruction_count(&self) -> usize {
        self.instructions.len() + self.completion_instructions.len()
    }
}

/// Side of the settlement to list requests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListDirection {
    From,
    To,
}

impl ListDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListDirection::From => "from",
            ListDirection::To => "to",
        }
    }
}

/// Filter and paging for the list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOrchestrationsQuery {
    pub direction: ListDirection,
    /// Request statuses to include, e.g. `pending` or `paid`. Empty means all.
    pub statuses: Vec<String>,
    pub per_page: u32,
    /// Zero-based page index.
    pub page: u32,
}

impl Default for ListOrchestrationsQuery {
    fn default() -> Self {
        Self {
            direction: ListDirection::From,
            statuses: vec![
                "pending".to_string(),
                "inProgress".to_string(),
                "paid".to_string(),
            ],
            per_page: 10,
            page: 0,
        }
    }
}

impl ListOrchestrationsQuery {
    /// Query string pairs in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("direction", self.direction.as_str().to_string())];
        if !self.statuses.is_empty() {
            pairs.push(("statuses", self.statuses.join(",")));
        }
        pairs.push(("perPage", self.per_page.to_string()));
        pairs.push(("page", self.page.to_string()));
        pairs
    }
}

/// Errors returned by the orchestration client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL could not be used.
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A caller-supplied argument was rejected before sending.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Connection or transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Local signing of the orchestration failed.
    #[error(transparent)]
    Signer(#[from] crate::signer::SignerError),
}

/// Result type for orchestration API operations.
pub type ApiResult<T> = Result<T, ApiError>;
