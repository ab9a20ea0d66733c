//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional)
//!     → loader.rs (dotenvy, never overrides the real environment)
//! process environment
//!     → loader.rs (four required values, each checked on its own)
//!     → EnvConfig
//! profile file (TOML, optional)
//!     → loader.rs (parse & deserialize only)
//!     → CLI overrides (--amount)
//!     → validation.rs (semantic checks, once)
//!     → SettlementProfile (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Everything is loaded before any network call
//! - The .env file is loaded before logging starts so it can set `RUST_LOG`
//! - The profile defaults to the pyUSD (Ethereum) / USDC (Base) settlement
//! - Secrets are redacted from Debug output

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    client_config_from_lookup, env_config_from_lookup, load_client_config, load_env_config,
    load_env_file, load_profile, ConfigError, EnvFileStatus,
};
pub use schema::{AcceptedTokens, ClientConfig, EnvConfig, SettlementProfile};
pub use validation::{validate_profile, ValidationError};
