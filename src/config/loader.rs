//! Configuration loading from the environment and from disk.

use alloy::primitives::Address;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::schema::{ClientConfig, EnvConfig, SettlementProfile};
use crate::config::validation::ValidationError;

/// Environment variable holding the API base URL.
pub const API_URL_ENV_VAR: &str = "OTIM_API_URL";
/// Environment variable holding the API key.
pub const API_KEY_ENV_VAR: &str = "OTIM_API_KEY";
/// Environment variable holding the signing key.
pub const PRIVATE_KEY_ENV_VAR: &str = "OTIM_PRIVATE_KEY";
/// Environment variable holding the recipient address.
pub const RECIPIENT_ADDRESS_ENV_VAR: &str = "RECIPIENT_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    MissingEnv(&'static str),
    /// An environment variable is present but unusable.
    InvalidEnv { name: &'static str, reason: String },
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingEnv(name) => {
                write!(f, "{} environment variable is required", name)
            }
            ConfigError::InvalidEnv { name, reason } => {
                write!(f, "{} environment variable is invalid: {}", name, reason)
            }
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// What happened when loading the optional `KEY=value` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    Loaded,
    NotFound,
    /// The file exists but could not be read or parsed. Entries before the
    /// failing line may already be applied; later ones are not.
    Invalid(String),
}

impl EnvFileStatus {
    /// Report the outcome. Called once logging is up, since the file may
    /// itself configure `RUST_LOG`.
    pub fn log(&self, path: &Path) {
        match self {
            EnvFileStatus::Loaded => {
                tracing::debug!(path = %path.display(), "Loaded environment file");
            }
            EnvFileStatus::NotFound => {
                tracing::warn!(
                    path = %path.display(),
                    ".env file not found, using environment variables"
                );
            }
            EnvFileStatus::Invalid(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %reason,
                    "Failed to load .env file, entries after the error were ignored"
                );
            }
        }
    }
}

/// Load a `KEY=value` file into the process environment.
///
/// Variables already present in the environment are not overridden. Neither
/// a missing nor a malformed file is fatal.
pub fn load_env_file(path: &Path) -> EnvFileStatus {
    match dotenvy::from_path(path) {
        Ok(()) => EnvFileStatus::Loaded,
        Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => EnvFileStatus::NotFound,
        Err(e) => EnvFileStatus::Invalid(e.to_string()),
    }
}

/// Read the required configuration from the process environment.
pub fn load_env_config() -> Result<EnvConfig, ConfigError> {
    env_config_from_lookup(|name| std::env::var(name).ok())
}

/// Read only the API credentials from the process environment.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    client_config_from_lookup(&|name: &str| std::env::var(name).ok())
}

fn required<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv(name)),
    }
}

/// Read the API credentials through an arbitrary lookup.
pub fn client_config_from_lookup<F>(lookup: &F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    Ok(ClientConfig {
        api_url: required(lookup, API_URL_ENV_VAR)?,
        api_key: required(lookup, API_KEY_ENV_VAR)?,
        private_key: required(lookup, PRIVATE_KEY_ENV_VAR)?,
    })
}

/// Read the required configuration through an arbitrary lookup.
///
/// Each variable is checked on its own, in a fixed order, so the error names
/// exactly which one is absent. Empty values count as absent.
pub fn env_config_from_lookup<F>(lookup: F) -> Result<EnvConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let client = client_config_from_lookup(&lookup)?;
    let recipient = required(&lookup, RECIPIENT_ADDRESS_ENV_VAR)?;

    let recipient_address: Address =
        recipient
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidEnv {
                name: RECIPIENT_ADDRESS_ENV_VAR,
                reason: format!("{}", e),
            })?;

    Ok(EnvConfig {
        client,
        recipient_address,
    })
}

/// Parse a settlement profile from a TOML file.
///
/// The result is not validated; callers validate once all overrides are applied.
pub fn load_profile(path: &Path) -> Result<SettlementProfile, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}
