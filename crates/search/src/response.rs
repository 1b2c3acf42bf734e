//! Response assembly.
//!
//! Packages the curated set, answer, and scope into the outbound contract.
//! This stage never fails: every "nothing usable" state becomes the canonical
//! not-found response.

use crate::types::{RawResult, SearchResponse, SearchScope};

/// Build the outbound response from the curated set and synthesized answer.
///
/// Sources are the curated results' non-empty URLs in curated order
/// (duplicates allowed). When no curated result carries a URL the response
/// degenerates to the canonical not-found form, exactly as when the gateway
/// returned nothing.
pub fn assemble(curated: &[RawResult], answer: String, scope: SearchScope) -> SearchResponse {
    let sources: Vec<String> = curated
        .iter()
        .filter(|result| !result.url.is_empty())
        .map(|result| result.url.clone())
        .collect();

    if sources.is_empty() {
        return SearchResponse::not_found(scope);
    }

    SearchResponse {
        answer,
        sources: Some(sources),
        scope,
        total_results: curated.len(),
    }
}
