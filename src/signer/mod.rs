//! Signing subsystem.
//!
//! # Data Flow
//! ```text
//! OTIM_PRIVATE_KEY (environment)
//!     → eth.rs (key parsing, address derivation)
//!     → OrchestrationSigner (hash signing)
//!     → orchestration client (EIP-7702 authorizations, EIP-712 instructions)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY come from the environment (or a local `.env` file)
//! - Never log private keys; the derived address is the only identity logged

pub mod eth;
pub mod types;

pub use eth::EthSigner;
pub use types::{OrchestrationSigner, SignerError, SignerResult};
