//! Remote operations of the orchestration service.

use async_trait::async_trait;

use crate::orchestration::types::{
    ApiResult, BuildSettlementOrchestrationRequest, BuildSettlementOrchestrationResponse,
    ListOrchestrationsQuery, NewOrchestrationRequest,
};

/// Orchestration service contract.
///
/// The driver is generic over this trait so the sequencing logic can run
/// against the HTTP client in production and against fakes in tests.
#[async_trait]
pub trait OrchestrationApi: Send + Sync {
    /// Ask the service for an unsigned settlement plan.
    async fn build_settlement_orchestration(
        &self,
        request: &BuildSettlementOrchestrationRequest,
    ) -> ApiResult<BuildSettlementOrchestrationResponse>;

    /// Turn a build response into a signed orchestration request.
    async fn new_orchestration_from_build(
        &self,
        build: &BuildSettlementOrchestrationResponse,
    ) -> ApiResult<NewOrchestrationRequest>;

    /// Submit a signed orchestration. Only success or failure is reported.
    async fn new_orchestration(&self, request: &NewOrchestrationRequest) -> ApiResult<()>;

    /// Fetch the current state of one settlement request.
    ///
    /// The body is returned as-is; its shape is owned by the service.
    async fn get_orchestration_details(&self, request_id: &str) -> ApiResult<serde_json::Value>;

    /// List settlement requests belonging to this API key.
    async fn list_orchestrations(
        &self,
        query: &ListOrchestrationsQuery,
    ) -> ApiResult<serde_json::Value>;
}
