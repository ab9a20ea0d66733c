//! Cross-chain settlement submission against the Otim orchestration API.

pub mod config;
pub mod observability;
pub mod orchestration;
pub mod settlement;
pub mod signer;

pub use config::{ClientConfig, EnvConfig, SettlementProfile};
pub use orchestration::{OrchestrationApi, OrchestrationClient};
pub use settlement::{SettlementError, SettlementOutcome};
pub use signer::{EthSigner, OrchestrationSigner};
