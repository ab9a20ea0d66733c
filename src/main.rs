//! otim-settle
//!
//! Builds, signs and submits one settlement orchestration, then prints its
//! request ID. `details` and `list` query existing requests.
//!
//! ```text
//!   .env / environment ──▶ config ──▶ EthSigner ──▶ OrchestrationClient
//!                                                        │
//!        stdout ◀── request ID ◀── submit ◀── sign ◀── build
//! ```
//!
//! Every progress message goes to stderr via tracing. Any failure is fatal.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use otim_settle::config::{self, SettlementProfile};
use otim_settle::observability::{init_logging, logging::DEFAULT_FILTER};
use otim_settle::orchestration::{ListDirection, ListOrchestrationsQuery};
use otim_settle::settlement;

#[derive(Parser)]
#[command(name = "otim-settle")]
#[command(about = "Create and inspect cross-chain settlement orchestrations", long_about = None)]
struct Cli {
    /// KEY=value file loaded into the environment before reading it.
    #[arg(long, global = true, default_value = ".env")]
    env_file: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = DEFAULT_FILTER)]
    log_level: String,

    /// TOML settlement profile (accepted tokens, settlement chain/token/amount).
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Settlement amount in base units of the settlement token.
    #[arg(long)]
    amount: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, sign and submit a settlement (the default)
    Create,
    /// Show the current state of a settlement request
    Details {
        request_id: String,
    },
    /// List settlement requests for this API key
    List {
        #[arg(long, value_enum, default_value_t = Direction::From)]
        direction: Direction,

        /// Statuses to include, comma separated.
        #[arg(long = "status", value_delimiter = ',', default_values = ["pending", "inProgress", "paid"])]
        statuses: Vec<String>,

        #[arg(long, default_value_t = 10)]
        per_page: u32,

        #[arg(long, default_value_t = 0)]
        page: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    From,
    To,
}

impl From<Direction> for ListDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::From => ListDirection::From,
            Direction::To => ListDirection::To,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut cli = Cli::parse();

    // The env file may set RUST_LOG, so it is read before logging starts.
    let env_file = config::load_env_file(&cli.env_file);
    init_logging(&cli.log_level);
    env_file.log(&cli.env_file);

    match cli.command.take().unwrap_or(Commands::Create) {
        Commands::Create => match create(&cli).await {
            Ok(request_id) => {
                println!("\n{}", request_id);
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Failed to create settlement: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Details { request_id } => report(details(&request_id).await, "get details"),
        Commands::List {
            direction,
            statuses,
            per_page,
            page,
        } => {
            let query = ListOrchestrationsQuery {
                direction: direction.into(),
                statuses,
                per_page,
                page,
            };
            report(list(&query).await, "list settlements")
        }
    }
}

async fn create(cli: &Cli) -> Result<String, Box<dyn std::error::Error>> {
    let env = config::load_env_config()?;

    let mut profile = match &cli.profile {
        Some(path) => config::load_profile(path)?,
        None => SettlementProfile::default(),
    };
    if let Some(amount) = cli.amount {
        profile.settlement_amount = amount;
    }
    config::validate_profile(&profile).map_err(config::ConfigError::Validation)?;

    tracing::info!(
        api_url = %env.client.api_url,
        recipient = %env.recipient_address,
        "Configuration loaded"
    );

    let outcome = settlement::run_from_env(&env, &profile).await?;

    tracing::info!(request_id = %outcome.request_id, "RequestID");
    tracing::info!(ephemeral_wallet = %outcome.ephemeral_wallet_address, "Ephemeral Wallet");

    Ok(outcome.request_id)
}

async fn details(request_id: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let client = config::load_client_config()?;
    Ok(settlement::details_from_env(&client, request_id).await?)
}

async fn list(query: &ListOrchestrationsQuery) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let client = config::load_client_config()?;
    Ok(settlement::list_from_env(&client, query).await?)
}

fn report(result: Result<serde_json::Value, Box<dyn std::error::Error>>, action: &str) -> ExitCode {
    let body = result.and_then(|body| Ok(serde_json::to_string_pretty(&body)?));
    match body {
        Ok(body) => {
            println!("{}", body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to {}: {}", action, e);
            ExitCode::FAILURE
        }
    }
}
