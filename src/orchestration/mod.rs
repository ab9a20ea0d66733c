//! Orchestration API subsystem.
//!
//! # Data Flow
//! ```text
//! BuildSettlementOrchestrationRequest
//!     → client.rs POST orchestration/settlement/build
//!     → BuildSettlementOrchestrationResponse (request ID, ephemeral wallet, unsigned plan)
//!     → hashing.rs (EIP-7702 / EIP-712 digests) + signer
//!     → NewOrchestrationRequest (signed)
//!     → client.rs POST orchestration/new
//!
//! request ID → client.rs GET orchestration/details/{id} → JSON
//! ListOrchestrationsQuery → client.rs GET orchestration/list → JSON
//! ```
//!
//! # Design Decisions
//! - One request per operation; no retries, no caching
//! - No timeout beyond the HTTP client's defaults
//! - The driver depends on `OrchestrationApi`, never on the HTTP client directly

pub mod api;
pub mod client;
pub mod hashing;
pub mod types;

pub use api::OrchestrationApi;
pub use client::OrchestrationClient;
pub use types::{
    ApiError, ApiResult, AuthorizationRequest, BuildSettlementOrchestrationRequest,
    BuildSettlementOrchestrationResponse, ChainId, InstructionBuild, ListDirection,
    ListOrchestrationsQuery, NewOrchestrationRequest, SignedAuthorization, SignedInstruction,
};
