//! Signing digests for orchestration payloads.
//!
//! Instructions are signed as EIP-712 typed data under the delegate contract's
//! domain; delegations are signed as EIP-7702 authorization tuples.

use alloy::eips::eip7702::Authorization;
use alloy::primitives::{B256, U256};
use alloy::sol;
use alloy::sol_types::{Eip712Domain, SolStruct};
use std::borrow::Cow;

use crate::orchestration::types::{AuthorizationRequest, InstructionBuild};

/// EIP-712 domain name of the delegate contract.
pub const DOMAIN_NAME: &str = "OtimDelegate";

/// EIP-712 domain version of the delegate contract.
pub const DOMAIN_VERSION: &str = "1";

sol! {
    /// Typed-data layout verified by the delegate contract.
    #[derive(Debug)]
    struct Instruction {
        uint256 salt;
        uint256 maxExecutions;
        address action;
        bytes arguments;
    }
}

/// Domain an instruction's signature is bound to.
pub fn instruction_domain(instruction: &InstructionBuild) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(DOMAIN_NAME)),
        Some(Cow::Borrowed(DOMAIN_VERSION)),
        Some(U256::from(instruction.chain_id.0)),
        Some(instruction.delegate_address),
        None,
    )
}

/// EIP-712 signing hash of an instruction.
pub fn instruction_signing_hash(instruction: &InstructionBuild) -> B256 {
    let typed = Instruction {
        salt: instruction.salt,
        maxExecutions: instruction.max_executions,
        action: instruction.action,
        arguments: instruction.arguments.clone(),
    };
    typed.eip712_signing_hash(&instruction_domain(instruction))
}

/// EIP-7702 signing hash of a delegation request.
pub fn authorization_signing_hash(request: &AuthorizationRequest) -> B256 {
    Authorization {
        chain_id: U256::from(request.chain_id.0),
        address: request.delegate_address,
        nonce: request.nonce,
    }
    .signature_hash()
}
