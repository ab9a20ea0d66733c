//! Settlement driver.
//!
//! Strictly sequential, terminal on the first failure:
//!
//! ```text
//! signer → client → build request → build → sign → submit → request ID
//! ```
//!
//! Nothing is retried and nothing is rolled back; a failed run is reported
//! with the stage that failed and must be re-run from the start.

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::{ClientConfig, EnvConfig, SettlementProfile};
use crate::orchestration::{ApiError, BuildSettlementOrchestrationRequest, OrchestrationApi, OrchestrationClient};
use crate::settlement::request::{build_request, display_amount};
use crate::signer::{EthSigner, SignerError};

/// A settlement failure, labelled with the stage it happened in.
#[derive(Debug, Error)]
pub enum SettlementError {
    #[error("failed to create EthSigner: {0}")]
    Signer(#[source] SignerError),

    #[error("failed to create client: {0}")]
    Client(#[source] ApiError),

    #[error("BuildSettlementOrchestration failed: {0}")]
    Build(#[source] ApiError),

    #[error("NewOrchestrationFromBuild failed: {0}")]
    Sign(#[source] ApiError),

    #[error("NewOrchestration failed: {0}")]
    Submit(#[source] ApiError),

    #[error("GetOrchestrationDetails failed: {0}")]
    Details(#[source] ApiError),

    #[error("ListOrchestrations failed: {0}")]
    List(#[source] ApiError),
}

/// Result of a completed settlement submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementOutcome {
    /// Identifier returned by the build call, unchanged.
    pub request_id: String,
    /// Wallet the service generated for this settlement.
    pub ephemeral_wallet_address: Address,
    /// Number of signed instructions submitted.
    pub instruction_count: usize,
}

/// Construct the signer and the API client. No network I/O happens here.
pub fn connect(config: &ClientConfig) -> Result<OrchestrationClient<EthSigner>, SettlementError> {
    tracing::info!("Initializing EthSigner...");
    let signer = EthSigner::new(&config.private_key).map_err(SettlementError::Signer)?;

    tracing::info!("Creating Otim client...");
    OrchestrationClient::new(signer, &config.api_url, &config.api_key)
        .map_err(SettlementError::Client)
}

/// Construct the signer and client from the environment, then settle.
pub async fn run_from_env(
    env: &EnvConfig,
    profile: &SettlementProfile,
) -> Result<SettlementOutcome, SettlementError> {
    let client = connect(&env.client)?;

    tracing::info!(
        amount = %display_amount(profile),
        settlement_chain = %profile.settlement_chain,
        settlement_token = %profile.settlement_token,
        "Building settlement orchestration request..."
    );
    let request = build_request(profile, env.recipient_address);

    run(&client, &request).await
}

/// Run build → sign → submit against an orchestration API.
pub async fn run<A>(
    api: &A,
    request: &BuildSettlementOrchestrationRequest,
) -> Result<SettlementOutcome, SettlementError>
where
    A: OrchestrationApi + ?Sized,
{
    tracing::info!("Calling BuildSettlementOrchestration API...");
    let build = api
        .build_settlement_orchestration(request)
        .await
        .map_err(SettlementError::Build)?;

    tracing::info!(
        request_id = %build.request_id,
        ephemeral_wallet = %build.ephemeral_wallet_address,
        "Build response received"
    );

    tracing::info!("Signing orchestration...");
    let signed = api
        .new_orchestration_from_build(&build)
        .await
        .map_err(SettlementError::Sign)?;

    tracing::info!(
        instructions = signed.instruction_count(),
        authorizations = signed.authorizations.len(),
        "Signed instructions successfully"
    );

    tracing::info!("Submitting signed orchestration...");
    api.new_orchestration(&signed)
        .await
        .map_err(SettlementError::Submit)?;

    tracing::info!(
        request_id = %build.request_id,
        ephemeral_wallet = %build.ephemeral_wallet_address,
        "Settlement orchestration created successfully"
    );

    Ok(SettlementOutcome {
        request_id: build.request_id,
        ephemeral_wallet_address: build.ephemeral_wallet_address,
        instruction_count: signed.instruction_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::{
        ApiResult, BuildSettlementOrchestrationResponse, ListOrchestrationsQuery,
        NewOrchestrationRequest,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Build,
        Sign,
        Submit,
    }

    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<Call>>,
        fail_at: Option<Call>,
        submitted: Mutex<Option<NewOrchestrationRequest>>,
    }

    impl FakeApi {
        fn failing_at(call: Call) -> Self {
            Self {
                fail_at: Some(call),
                ..Default::default()
            }
        }

        fn record(&self, call: Call) -> ApiResult<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail_at == Some(call) {
                return Err(ApiError::Status {
                    status: 500,
                    body: format!("{:?} exploded", call),
                });
            }
            Ok(())
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl OrchestrationApi for FakeApi {
        async fn build_settlement_orchestration(
            &self,
            _request: &BuildSettlementOrchestrationRequest,
        ) -> ApiResult<BuildSettlementOrchestrationResponse> {
            self.record(Call::Build)?;
            Ok(BuildSettlementOrchestrationResponse {
                request_id: "req-7f3a".to_string(),
                ephemeral_wallet_address: Address::repeat_byte(0xee),
                authorizations: vec![],
                instructions: vec![],
                completion_instructions: vec![],
            })
        }

        async fn new_orchestration_from_build(
            &self,
            build: &BuildSettlementOrchestrationResponse,
        ) -> ApiResult<NewOrchestrationRequest> {
            self.record(Call::Sign)?;
            Ok(NewOrchestrationRequest {
                request_id: build.request_id.clone(),
                ephemeral_wallet_address: build.ephemeral_wallet_address,
                authorizations: vec![],
                instructions: vec![],
                completion_instructions: vec![],
            })
        }

        async fn new_orchestration(&self, request: &NewOrchestrationRequest) -> ApiResult<()> {
            self.record(Call::Submit)?;
            *self.submitted.lock().unwrap() = Some(request.clone());
            Ok(())
        }

        async fn get_orchestration_details(
            &self,
            _request_id: &str,
        ) -> ApiResult<serde_json::Value> {
            unreachable!("the settlement flow never reads details")
        }

        async fn list_orchestrations(
            &self,
            _query: &ListOrchestrationsQuery,
        ) -> ApiResult<serde_json::Value> {
            unreachable!("the settlement flow never lists")
        }
    }

    fn request() -> BuildSettlementOrchestrationRequest {
        build_request(&SettlementProfile::default(), Address::repeat_byte(0x42))
    }

    #[tokio::test]
    async fn test_full_success_returns_build_request_id() {
        let api = FakeApi::default();
        let outcome = run(&api, &request()).await.unwrap();

        assert_eq!(api.calls(), vec![Call::Build, Call::Sign, Call::Submit]);
        assert_eq!(outcome.request_id, "req-7f3a");
        assert_eq!(outcome.ephemeral_wallet_address, Address::repeat_byte(0xee));

        let submitted = api.submitted.lock().unwrap().clone().unwrap();
        assert_eq!(submitted.request_id, "req-7f3a");
    }

    #[tokio::test]
    async fn test_build_failure_stops_before_signing() {
        let api = FakeApi::failing_at(Call::Build);
        let err = run(&api, &request()).await.unwrap_err();

        assert_eq!(api.calls(), vec![Call::Build]);
        assert!(matches!(err, SettlementError::Build(_)));
        assert!(err.to_string().starts_with("BuildSettlementOrchestration failed:"));
        assert!(err.to_string().contains("Build exploded"));
    }

    #[tokio::test]
    async fn test_sign_failure_stops_before_submit() {
        let api = FakeApi::failing_at(Call::Sign);
        let err = run(&api, &request()).await.unwrap_err();

        assert_eq!(api.calls(), vec![Call::Build, Call::Sign]);
        assert!(matches!(err, SettlementError::Sign(_)));
        assert!(api.submitted.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submit_failure_is_labelled() {
        let api = FakeApi::failing_at(Call::Submit);
        let err = run(&api, &request()).await.unwrap_err();

        assert_eq!(api.calls(), vec![Call::Build, Call::Sign, Call::Submit]);
        assert!(err.to_string().starts_with("NewOrchestration failed:"));
    }

    #[tokio::test]
    async fn test_bad_private_key_fails_before_client() {
        let env = EnvConfig {
            client: ClientConfig {
                api_url: "http://127.0.0.1:1".to_string(),
                api_key: "key".to_string(),
                private_key: "not-a-key".to_string(),
            },
            recipient_address: Address::ZERO,
        };
        let err = run_from_env(&env, &SettlementProfile::default()).await.unwrap_err();
        assert!(matches!(err, SettlementError::Signer(_)));
        assert!(err.to_string().starts_with("failed to create EthSigner:"));
    }

    #[tokio::test]
    async fn test_bad_url_fails_at_client_stage() {
        let env = EnvConfig {
            client: ClientConfig {
                api_url: "::not a url::".to_string(),
                api_key: "key".to_string(),
                private_key: "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                    .to_string(),
            },
            recipient_address: Address::ZERO,
        };
        let err = run_from_env(&env, &SettlementProfile::default()).await.unwrap_err();
        assert!(matches!(err, SettlementError::Client(_)));
    }
}
