//! Search gateway.
//!
//! Translates a validated request into provider call parameters and returns
//! the raw result list plus an optional provider-synthesized answer. The
//! external provider is Tavily; the trait seam exists so the pipeline can be
//! exercised against a scripted gateway in tests.

use crate::registry::DomainRegistry;
use crate::types::{RawResult, SearchDepth, SearchRequest};
use apseva_core::{AppError, AppResult};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Default Tavily API endpoint.
const TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Parameters for a single provider call.
#[derive(Debug, Clone)]
pub struct GatewayQuery {
    /// Formulated query (context suffix already applied)
    pub query: String,

    pub search_depth: SearchDepth,

    pub max_results: u8,

    /// Restrict the provider to these domains (strict scope only)
    pub include_domains: Option<Vec<String>>,

    /// Domains the provider must skip (unused by current scopes, part of the
    /// provider contract)
    pub exclude_domains: Option<Vec<String>>,
}

impl GatewayQuery {
    /// Derive provider parameters from the request scope.
    ///
    /// Strict scope restricts the provider to the domain registry; inclusive
    /// and unrestricted scopes apply no domain filters.
    pub fn for_scope(
        formulated_query: &str,
        request: &SearchRequest,
        registry: &DomainRegistry,
    ) -> Self {
        let include_domains = if request.scope.policy().restrict_to_registry {
            Some(registry.domains().to_vec())
        } else {
            None
        };

        Self {
            query: formulated_query.to_string(),
            search_depth: request.search_depth,
            max_results: request.max_results,
            include_domains,
            exclude_domains: None,
        }
    }
}

/// Raw reply from the provider.
///
/// An empty result list is a valid outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct GatewayReply {
    pub results: Vec<RawResult>,

    /// Provider-synthesized answer, when requested and available
    pub answer: Option<String>,
}

/// Seam between the pipeline and the external search provider.
///
/// Implementations make exactly one attempt per call; retry policy belongs to
/// the caller, and the pipeline deliberately has none.
#[async_trait::async_trait]
pub trait SearchGateway: Send + Sync {
    /// Execute one provider search.
    async fn search(&self, query: &GatewayQuery) -> AppResult<GatewayReply>;
}

/// Tavily search response format.
#[derive(Debug, Deserialize)]
struct TavilyReply {
    #[serde(default)]
    answer: Option<String>,

    #[serde(default)]
    results: Vec<RawResult>,
}

/// Gateway backed by the Tavily Search API.
pub struct TavilyGateway {
    /// HTTP client, built with a mandatory bounded timeout
    client: reqwest::Client,

    api_key: String,

    base_url: String,
}

impl TavilyGateway {
    /// Create a gateway with the given API key and call timeout.
    pub fn new(api_key: impl Into<String>, timeout_secs: u64) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Gateway(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: TAVILY_BASE_URL.to_string(),
        })
    }

    /// Override the API endpoint (used by tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl SearchGateway for TavilyGateway {
    async fn search(&self, query: &GatewayQuery) -> AppResult<GatewayReply> {
        tracing::info!("Dispatching search to Tavily");
        tracing::debug!("Gateway query: {:?}", query);

        let mut body = json!({
            "api_key": self.api_key,
            "query": query.query,
            "search_depth": query.search_depth.as_str(),
            "include_answer": true,
            "include_raw_content": true,
            "max_results": query.max_results,
        });
        if let Some(ref domains) = query.include_domains {
            body["include_domains"] = json!(domains);
        }
        if let Some(ref domains) = query.exclude_domains {
            body["exclude_domains"] = json!(domains);
        }

        let url = format!("{}/search", self.base_url);

        // Single attempt; transport errors and timeouts surface as-is.
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to reach Tavily: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Gateway(format!(
                "Tavily API error ({}): {}",
                status, error_text
            )));
        }

        let reply: TavilyReply = response
            .json()
            .await
            .map_err(|e| AppError::Gateway(format!("Failed to parse Tavily response: {}", e)))?;

        tracing::info!(
            "Tavily returned {} results (answer: {})",
            reply.results.len(),
            reply.answer.is_some()
        );

        Ok(GatewayReply {
            results: reply.results,
            answer: reply.answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchScope;

    #[test]
    fn test_strict_scope_includes_registry_domains() {
        let registry = DomainRegistry::default();
        let mut request = SearchRequest::new("land registration");
        request.scope = SearchScope::StrictTrusted;

        let query = GatewayQuery::for_scope("land registration", &request, &registry);

        let included = query.include_domains.expect("strict scope sets domains");
        assert_eq!(included.len(), registry.len());
        assert!(query.exclude_domains.is_none());
    }

    #[test]
    fn test_open_scopes_have_no_domain_filters() {
        let registry = DomainRegistry::default();
        for scope in [SearchScope::Inclusive, SearchScope::Unrestricted] {
            let mut request = SearchRequest::new("land registration");
            request.scope = scope;

            let query = GatewayQuery::for_scope("land registration", &request, &registry);
            assert!(query.include_domains.is_none());
            assert!(query.exclude_domains.is_none());
        }
    }

    #[test]
    fn test_tavily_reply_parsing_with_missing_fields() {
        let reply: TavilyReply = serde_json::from_str(
            r#"{"results": [{"url": "https://ap.gov.in/x", "title": "t", "content": "c"}]}"#,
        )
        .unwrap();

        assert!(reply.answer.is_none());
        assert_eq!(reply.results.len(), 1);
        assert!(reply.results[0].score.is_none());
        assert_eq!(reply.results[0].confidence(), 1.0);
    }

    #[test]
    fn test_tavily_reply_parsing_empty_object() {
        let reply: TavilyReply = serde_json::from_str("{}").unwrap();
        assert!(reply.results.is_empty());
        assert!(reply.answer.is_none());
    }
}
