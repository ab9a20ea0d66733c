//! Read-only queries against existing settlement requests.

use crate::config::ClientConfig;
use crate::orchestration::{ListOrchestrationsQuery, OrchestrationApi};
use crate::settlement::driver::{connect, SettlementError};

/// Fetch the current state of `request_id`.
pub async fn details<A>(api: &A, request_id: &str) -> Result<serde_json::Value, SettlementError>
where
    A: OrchestrationApi + ?Sized,
{
    tracing::info!(request_id = %request_id, "Calling GetOrchestrationDetails API...");
    api.get_orchestration_details(request_id)
        .await
        .map_err(SettlementError::Details)
}

/// List settlement requests matching `query`.
pub async fn list<A>(
    api: &A,
    query: &ListOrchestrationsQuery,
) -> Result<serde_json::Value, SettlementError>
where
    A: OrchestrationApi + ?Sized,
{
    tracing::info!(
        direction = query.direction.as_str(),
        page = query.page,
        per_page = query.per_page,
        "Calling ListOrchestrations API..."
    );
    api.list_orchestrations(query)
        .await
        .map_err(SettlementError::List)
}

/// Connect with `config`, then fetch details of `request_id`.
pub async fn details_from_env(
    config: &ClientConfig,
    request_id: &str,
) -> Result<serde_json::Value, SettlementError> {
    let client = connect(config)?;
    details(&client, request_id).await
}

/// Connect with `config`, then list settlement requests.
pub async fn list_from_env(
    config: &ClientConfig,
    query: &ListOrchestrationsQuery,
) -> Result<serde_json::Value, SettlementError> {
    let client = connect(config)?;
    list(&client, query).await
}
