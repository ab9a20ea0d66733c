//! HTTP client for the orchestration API.
//!
//! # Responsibilities
//! - Validate the API base URL at construction (no network I/O)
//! - Authenticate every request with the API key
//! - Sign build responses locally with the configured signer
//! - Map transport, status and decode failures to `ApiError`

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::orchestration::api::OrchestrationApi;
use crate::orchestration::hashing::{authorization_signing_hash, instruction_signing_hash};
use crate::orchestration::types::{
    ApiError, ApiResult, BuildSettlementOrchestrationRequest, BuildSettlementOrchestrationResponse,
    InstructionBuild, ListOrchestrationsQuery, NewOrchestrationRequest, SignedAuthorization,
    SignedInstruction,
};
use crate::signer::OrchestrationSigner;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Header carrying a per-call correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const BUILD_SETTLEMENT_PATH: &str = "orchestration/settlement/build";
const NEW_ORCHESTRATION_PATH: &str = "orchestration/new";
const DETAILS_PATH: &str = "orchestration/details";
const LIST_PATH: &str = "orchestration/list";

/// Orchestration API client bound to a signer.
pub struct OrchestrationClient<S> {
    http: Client,
    base_url: Url,
    signer: S,
}

impl<S: OrchestrationSigner> OrchestrationClient<S> {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `signer` - Signer used for authorizations and instructions
    /// * `api_url` - Base URL of the orchestration API (http or https)
    /// * `api_key` - API key sent with every request
    pub fn new(signer: S, api_url: &str, api_key: &str) -> ApiResult<Self> {
        let base_url = parse_base_url(api_url)?;

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| ApiError::Client(format!("API key is not a valid header value: {}", e)))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        tracing::debug!(base_url = %base_url, signer = %signer.address(), "Orchestration client created");

        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(path, body).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post<B>(&self, path: &str, body: &B) -> ApiResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        self.send(self.http.post(url.clone()).json(body), "POST", &url).await
    }

    async fn get_json(&self, url: Url) -> ApiResult<serde_json::Value> {
        let response = self.send(self.http.get(url.clone()), "GET", &url).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send(&self, request: RequestBuilder, method: &str, url: &Url) -> ApiResult<Response> {
        let call_id = Uuid::new_v4();

        tracing::debug!(url = %url, call_id = %call_id, "{}", method);

        let response = request
            .header(REQUEST_ID_HEADER, call_id.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url.join(path).map_err(|e| ApiError::InvalidUrl {
            url: format!("{}{}", self.base_url, path),
            reason: e.to_string(),
        })
    }

    /// URL of the details endpoint for one request. The ID is added as a
    /// single escaped path segment.
    fn details_url(&self, request_id: &str) -> ApiResult<Url> {
        let request_id = request_id.trim();
        if request_id.is_empty() {
            return Err(ApiError::InvalidRequest("request ID is empty".to_string()));
        }

        let mut url = self.endpoint(DETAILS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".to_string(),
            })?
            .push(request_id);
        Ok(url)
    }

    fn list_url(&self, query: &ListOrchestrationsQuery) -> ApiResult<Url> {
        if query.per_page == 0 {
            return Err(ApiError::InvalidRequest("perPage must be at least 1".to_string()));
        }

        let mut url = self.endpoint(LIST_PATH)?;
        url.query_pairs_mut().extend_pairs(query.query_pairs());
        Ok(url)
    }

    async fn sign_instructions(
        &self,
        instructions: &[InstructionBuild],
    ) -> ApiResult<Vec<SignedInstruction>> {
        let mut signed = Vec::with_capacity(instructions.len());
        for instruction in instructions {
            let hash = instruction_signing_hash(instruction);
            let signature = self.signer.sign_hash(hash).await?;
            signed.push(SignedInstruction {
                instruction: instruction.clone(),
                signature,
            });
        }
        Ok(signed)
    }
}

#[async_trait]
impl<S: OrchestrationSigner> OrchestrationApi for OrchestrationClient<S> {
    async fn build_settlement_orchestration(
        &self,
        request: &BuildSettlementOrchestrationRequest,
    ) -> ApiResult<BuildSettlementOrchestrationResponse> {
        self.post_json(BUILD_SETTLEMENT_PATH, request).await
    }

    async fn new_orchestration_from_build(
        &self,
        build: &BuildSettlementOrchestrationResponse,
    ) -> ApiResult<NewOrchestrationRequest> {
        let mut authorizations = Vec::with_capacity(build.authorizations.len());
        for authorization in &build.authorizations {
            let signature = self
                .signer
                .sign_hash(authorization_signing_hash(authorization))
                .await?;
            authorizations.push(SignedAuthorization {
                authorization: authorization.clone(),
                signature,
            });
        }

        Ok(NewOrchestrationRequest {
            request_id: build.request_id.clone(),
            ephemeral_wallet_address: build.ephemeral_wallet_address,
            authorizations,
            instructions: self.sign_instructions(&build.instructions).await?,
            completion_instructions: self
                .sign_instructions(&build.completion_instructions)
                .await?,
        })
    }

    async fn new_orchestration(&self, request: &NewOrchestrationRequest) -> ApiResult<()> {
        self.post(NEW_ORCHESTRATION_PATH, request).await?;
        Ok(())
    }

    async fn get_orchestration_details(&self, request_id: &str) -> ApiResult<serde_json::Value> {
        let url = self.details_url(request_id)?;
        self.get_json(url).await
    }

    async fn list_orchestrations(
        &self,
        query: &ListOrchestrationsQuery,
    ) -> ApiResult<serde_json::Value> {
        let url = self.list_url(query)?;
        self.get_json(url).await
    }
}

impl<S: OrchestrationSigner> std::fmt::Debug for OrchestrationClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrchestrationClient")
            .field("base_url", &self.base_url.as_str())
            .field("signer", &self.signer.address())
            .finish()
    }
}

/// Parse and normalise the API base URL.
///
/// A trailing slash is ensured so relative endpoint paths extend the base path
/// instead of replacing its last segment.
fn parse_base_url(api_url: &str) -> ApiResult<Url> {
    let mut url = Url::parse(api_url.trim()).map_err(|e| ApiError::InvalidUrl {
        url: api_url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl {
            url: api_url.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::types::{AuthorizationRequest, ChainId};
    use crate::signer::EthSigner;
    use alloy::primitives::{Address, Bytes, U256};

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_signer() -> EthSigner {
        EthSigner::new(TEST_PRIVATE_KEY).unwrap()
    }

    fn instruction(salt: u64) -> InstructionBuild {
        InstructionBuild {
            chain_id: ChainId::BASE,
            salt: U256::from(salt),
            max_executions: U256::from(1u64),
            action: Address::repeat_byte(0x11),
            arguments: Bytes::from_static(&[0xab]),
            delegate_address: Address::repeat_byte(0x22),
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(
            url.join(BUILD_SETTLEMENT_PATH).unwrap().as_str(),
            "https://api.example.com/v1/orchestration/settlement/build"
        );
    }

    #[test]
    fn test_client_keeps_normalised_base_url() {
        let client = OrchestrationClient::new(test_signer(), "http://localhost:8080", "key").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = OrchestrationClient::new(test_signer(), "not a url", "key").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));

        let err = OrchestrationClient::new(test_signer(), "ftp://example.com", "key").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_invalid_api_key_rejected() {
        let err = OrchestrationClient::new(test_signer(), "http://localhost:1", "bad\nkey")
            .unwrap_err();
        assert!(matches!(err, ApiError::Client(_)));
    }

    #[test]
    fn test_details_url_escapes_request_id() {
        let client = OrchestrationClient::new(test_signer(), "https://api.example.com/v1", "key").unwrap();

        let url = client.details_url("req-123").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/orchestration/details/req-123");

        let url = client.details_url("a/b?c").unwrap();
        assert_eq!(url.path(), "/v1/orchestration/details/a%2Fb%3Fc");
        assert!(url.query().is_none());
    }

    #[tokio::test]
    async fn test_empty_request_id_rejected_without_network() {
        let client = OrchestrationClient::new(test_signer(), "http://localhost:1", "key").unwrap();
        let err = client.get_orchestration_details("  ").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn test_list_url_carries_query() {
        let client = OrchestrationClient::new(test_signer(), "https://api.example.com", "key").unwrap();

        let url = client.list_url(&ListOrchestrationsQuery::default()).unwrap();
        assert_eq!(url.path(), "/orchestration/list");
        assert_eq!(
            url.query(),
            Some("direction=from&statuses=pending%2CinProgress%2Cpaid&perPage=10&page=0")
        );

        let query = ListOrchestrationsQuery {
            per_page: 0,
            ..ListOrchestrationsQuery::default()
        };
        assert!(matches!(client.list_url(&query), Err(ApiError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_sign_preserves_identity_and_order() {
        let signer = test_signer();
        let expected_signer = signer.address();
        let client = OrchestrationClient::new(signer, "http://localhost:1", "key").unwrap();

        let build = BuildSettlementOrchestrationResponse {
            request_id: "req-abc".to_string(),
            ephemeral_wallet_address: Address::repeat_byte(0x33),
            authorizations: vec![AuthorizationRequest {
                chain_id: ChainId::ETHEREUM,
                delegate_address: Address::repeat_byte(0x22),
                nonce: 4,
            }],
            instructions: vec![instruction(1), instruction(2)],
            completion_instructions: vec![instruction(3)],
        };

        let signed = client.new_orchestration_from_build(&build).await.unwrap();

        assert_eq!(signed.request_id, "req-abc");
        assert_eq!(signed.ephemeral_wallet_address, build.ephemeral_wallet_address);
        assert_eq!(signed.instruction_count(), 3);
        assert_eq!(signed.instructions[0].instruction.salt, U256::from(1u64));
        assert_eq!(signed.instructions[1].instruction.salt, U256::from(2u64));
        assert_eq!(signed.completion_instructions[0].instruction.salt, U256::from(3u64));

        for s in signed.instructions.iter().chain(&signed.completion_instructions) {
            let hash = instruction_signing_hash(&s.instruction);
            let recovered = s.signature.recover_address_from_prehash(&hash).unwrap();
            assert_eq!(recovered, expected_signer);
        }

        let auth = &signed.authorizations[0];
        let recovered = auth
            .signature
            .recover_address_from_prehash(&authorization_signing_hash(&auth.authorization))
            .unwrap();
        assert_eq!(recovered, expected_signer);
    }
}
