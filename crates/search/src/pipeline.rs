//! Pipeline orchestration.
//!
//! Runs the curation stages sequentially for one request: validate,
//! formulate, gateway call, confidence filter, trust filter, synthesize,
//! assemble. Stateless per request; the registry is the only shared
//! (read-only) input.

use crate::answer::synthesize;
use crate::filter::{confidence_filter, trust_filter};
use crate::gateway::{GatewayQuery, SearchGateway};
use crate::query::formulate;
use crate::registry::DomainRegistry;
use crate::response::assemble;
use crate::types::{SearchRequest, SearchResponse};
use apseva_core::AppResult;
use apseva_llm::LlmClient;

/// Execute one search request end to end.
///
/// The gateway is invoked exactly once; provider failures propagate as
/// [`apseva_core::AppError::Gateway`]. An empty provider result set is not an
/// error and produces the canonical not-found response.
pub async fn run_search(
    request: &SearchRequest,
    registry: &DomainRegistry,
    gateway: &dyn SearchGateway,
    llm: Option<&dyn LlmClient>,
    model: &str,
) -> AppResult<SearchResponse> {
    request.validate()?;

    tracing::info!(
        "Searching (scope: {}, depth: {}, max_results: {})",
        request.scope.as_str(),
        request.search_depth.as_str(),
        request.max_results
    );

    let formulated = formulate(&request.query, request.scope);
    tracing::debug!("Formulated query: {}", formulated);

    let gateway_query = GatewayQuery::for_scope(&formulated, request, registry);
    let reply = gateway.search(&gateway_query).await?;

    if reply.results.is_empty() {
        tracing::info!("Provider returned no results");
        return Ok(SearchResponse::not_found(request.scope));
    }

    let curated = confidence_filter(reply.results, request.scope);
    let curated = trust_filter(curated, request.scope, registry);

    let answer = synthesize(
        &request.query,
        request.scope,
        &curated,
        reply.answer.as_deref(),
        llm,
        model,
    )
    .await;

    let response = assemble(&curated, answer, request.scope);

    tracing::info!(
        "Curated {} of the provider's results into the answer",
        response.total_results
    );

    Ok(response)
}
