//! Construction of the build request from a settlement profile.

use alloy::primitives::utils::format_units;
use alloy::primitives::Address;
use std::collections::BTreeMap;

use crate::config::SettlementProfile;
use crate::orchestration::BuildSettlementOrchestrationRequest;

/// Build the settlement request for `recipient`.
///
/// Entries for the same chain are merged, so the request holds exactly one
/// token list per accepted chain.
pub fn build_request(
    profile: &SettlementProfile,
    recipient: Address,
) -> BuildSettlementOrchestrationRequest {
    let mut accepted_tokens: BTreeMap<_, Vec<Address>> = BTreeMap::new();
    for entry in &profile.accepted_tokens {
        let tokens = accepted_tokens.entry(entry.chain_id).or_default();
        for token in &entry.tokens {
            if !tokens.contains(token) {
                tokens.push(*token);
            }
        }
    }

    BuildSettlementOrchestrationRequest {
        accepted_tokens,
        settlement_chain: profile.settlement_chain,
        settlement_token: profile.settlement_token,
        settlement_amount: profile.amount(),
        recipient_address: recipient,
        note: profile.note.clone(),
        max_runs: profile.max_runs,
    }
}

/// Human-readable settlement amount, e.g. `1.000000`.
pub fn display_amount(profile: &SettlementProfile) -> String {
    format_units(profile.amount(), profile.decimals)
        .unwrap_or_else(|_| format!("{} base units", profile.settlement_amount))
}
