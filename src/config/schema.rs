//! Configuration schema definitions.
//!
//! Two kinds of configuration exist:
//! - `EnvConfig`: the four required values read from the process environment
//!   (`ClientConfig` is the subset needed to talk to the API at all)
//! - `SettlementProfile`: which tokens are accepted and what gets settled,
//!   optionally overridden from a TOML file

use alloy::primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

use crate::orchestration::ChainId;

/// pyUSD on Ethereum mainnet.
pub const PYUSD_ETHEREUM: Address = address!("6c3ea9036406852006290770BEdFcAbA0e23A0e8");

/// USDC on Base.
pub const USDC_BASE: Address = address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

/// Credentials and endpoint for the orchestration API.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Orchestration API base URL.
    pub api_url: String,
    /// Orchestration API key.
    pub api_key: String,
    /// Hex-encoded signing key.
    pub private_key: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Values taken from the environment. All are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub client: ClientConfig,
    /// Final recipient of the settled funds.
    pub recipient_address: Address,
}

/// Tokens accepted on one source chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AcceptedTokens {
    pub chain_id: ChainId,
    pub tokens: Vec<Address>,
}

/// What a settlement accepts and delivers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SettlementProfile {
    /// Accepted source tokens, one entry per chain.
    pub accepted_tokens: Vec<AcceptedTokens>,

    /// Chain the funds converge on.
    pub settlement_chain: ChainId,

    /// Token delivered to the recipient.
    pub settlement_token: Address,

    /// Amount in base units of the settlement token.
    pub settlement_amount: u64,

    /// On-chain decimals of the settlement token.
    pub decimals: u8,

    /// Free-text note attached to the orchestration.
    pub note: Option<String>,

    /// How many times the orchestration may run.
    pub max_runs: Option<u32>,
}

impl SettlementProfile {
    /// Settlement amount as a 256-bit integer for the wire.
    pub fn amount(&self) -> U256 {
        U256::from(self.settlement_amount)
    }
}

impl Default for SettlementProfile {
    fn default() -> Self {
        Self {
            accepted_tokens: vec![
                AcceptedTokens {
                    chain_id: ChainId::ETHEREUM,
                    tokens: vec![PYUSD_ETHEREUM],
                },
                AcceptedTokens {
                    chain_id: ChainId::BASE,
                    tokens: vec![USDC_BASE],
                },
            ],
            settlement_chain: ChainId::BASE,
            settlement_token: USDC_BASE,
            settlement_amount: 1_000_000, // 1 USDC
            decimals: 6,
            note: None,
            max_runs: None,
        }
    }
}
