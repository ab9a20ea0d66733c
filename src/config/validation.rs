//! Settlement profile validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SettlementProfile → Result<(), Vec<ValidationError>>
//! - Runs before any signer or client is constructed

use std::collections::HashSet;
use thiserror::Error;

use crate::config::schema::SettlementProfile;
use crate::orchestration::ChainId;

/// Largest decimals value accepted for a token.
pub const MAX_DECIMALS: u8 = 36;

/// A single semantic problem with a settlement profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no accepted tokens configured")]
    NoAcceptedTokens,

    #[error("chain {0} lists no accepted tokens")]
    EmptyTokenList(ChainId),

    #[error("chain {0} appears more than once in accepted tokens")]
    DuplicateChain(ChainId),

    #[error("settlement amount must be greater than zero")]
    ZeroAmount,

    #[error("decimals {0} exceeds maximum of {max}", max = MAX_DECIMALS)]
    DecimalsTooLarge(u8),

    #[error("settlement chain {0} is not among the accepted chains")]
    SettlementChainNotAccepted(ChainId),

    #[error("settlement token must not be the zero address")]
    ZeroSettlementToken,

    #[error("max_runs must be greater than zero when set")]
    ZeroMaxRuns,
}

/// Validate a settlement profile.
pub fn validate_profile(profile: &SettlementProfile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if profile.accepted_tokens.is_empty() {
        errors.push(ValidationError::NoAcceptedTokens);
    }

    let mut seen = HashSet::new();
    for entry in &profile.accepted_tokens {
        if !seen.insert(entry.chain_id) {
            errors.push(ValidationError::DuplicateChain(entry.chain_id));
        }
        if entry.tokens.is_empty() {
            errors.push(ValidationError::EmptyTokenList(entry.chain_id));
        }
    }

    if profile.settlement_amount == 0 {
        errors.push(ValidationError::ZeroAmount);
    }

    if profile.decimals > MAX_DECIMALS {
        errors.push(ValidationError::DecimalsTooLarge(profile.decimals));
    }

    if !profile.accepted_tokens.is_empty() && !seen.contains(&profile.settlement_chain) {
        errors.push(ValidationError::SettlementChainNotAccepted(
            profile.settlement_chain,
        ));
    }

    if profile.settlement_token.is_zero() {
        errors.push(ValidationError::ZeroSettlementToken);
    }

    if profile.max_runs == Some(0) {
        errors.push(ValidationError::ZeroMaxRuns);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
