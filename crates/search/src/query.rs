//! Query formulation.
//!
//! Expands a raw user query with scope-specific context terms before
//! dispatch. Pure function; no stemming, no translation, no failure modes.

use crate::types::SearchScope;

/// Build the search string sent to the gateway.
///
/// Strict and inclusive scopes append the fixed jurisdiction suffix to bias
/// the provider toward AP government material; unrestricted passes the query
/// through unmodified.
pub fn formulate(query: &str, scope: SearchScope) -> String {
    match scope.policy().query_suffix {
        Some(suffix) => format!("{} {}", query.trim(), suffix),
        None => query.trim().to_string(),
    }
}
