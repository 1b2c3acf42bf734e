//! Data model for the search pipeline.
//!
//! The scope → behavior mapping lives in one [`ScopePolicy`] lookup so the
//! three scopes stay behaviorally consistent across the formulator, the
//! gateway, the filters, and the synthesizer.

use apseva_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Smallest accepted `max_results` value.
pub const MIN_RESULTS: u8 = 1;

/// Largest accepted `max_results` value.
pub const MAX_RESULTS: u8 = 10;

/// Default `max_results` when the caller does not specify one.
pub const DEFAULT_MAX_RESULTS: u8 = 5;

/// Fixed context suffix appended to strict and inclusive queries to bias the
/// provider toward the target jurisdiction.
pub const QUERY_CONTEXT_SUFFIX: &str = "Andhra Pradesh AP government";

/// Canonical answer text when nothing usable was found.
pub const NOT_FOUND_MESSAGE: &str =
    "Sorry, could not find any relevant data from Andhra Pradesh government sources";

/// Breadth policy controlling which domains are eligible and how confidence
/// is judged. Immutable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchScope {
    /// Only results from the trusted domain registry
    #[serde(rename = "ap_gov_only")]
    StrictTrusted,

    /// Registry plus the open web
    #[serde(rename = "include_ap_gov")]
    Inclusive,

    /// Open web only
    #[serde(rename = "general")]
    Unrestricted,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::StrictTrusted
    }
}

impl SearchScope {
    /// Parse a scope from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ap_gov_only" => Some(Self::StrictTrusted),
            "include_ap_gov" => Some(Self::Inclusive),
            "general" => Some(Self::Unrestricted),
            _ => None,
        }
    }

    /// Get the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrictTrusted => "ap_gov_only",
            Self::Inclusive => "include_ap_gov",
            Self::Unrestricted => "general",
        }
    }

    /// Look up the behavior policy for this scope.
    pub fn policy(&self) -> ScopePolicy {
        match self {
            Self::StrictTrusted => ScopePolicy {
                restrict_to_registry: true,
                confidence_threshold: 0.5,
                query_suffix: Some(QUERY_CONTEXT_SUFFIX),
                provider_answer_allowed: false,
            },
            Self::Inclusive => ScopePolicy {
                restrict_to_registry: false,
                confidence_threshold: 0.75,
                query_suffix: Some(QUERY_CONTEXT_SUFFIX),
                provider_answer_allowed: true,
            },
            Self::Unrestricted => ScopePolicy {
                restrict_to_registry: false,
                confidence_threshold: 0.75,
                query_suffix: None,
                provider_answer_allowed: true,
            },
        }
    }
}

/// Per-scope behavior table. Pure configuration data; every stage that varies
/// by scope reads from here instead of branching on the scope itself.
#[derive(Debug, Clone, Copy)]
pub struct ScopePolicy {
    /// Whether the gateway call is restricted to the domain registry
    pub restrict_to_registry: bool,

    /// Minimum provider score a result needs to survive the confidence filter.
    /// Government sites tend to score lower, so strict scope uses 0.5.
    pub confidence_threshold: f32,

    /// Context suffix the formulator appends to the raw query
    pub query_suffix: Option<&'static str>,

    /// Whether a provider-synthesized answer may be used verbatim
    pub provider_answer_allowed: bool,
}

/// Search depth requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl Default for SearchDepth {
    fn default() -> Self {
        Self::Advanced
    }
}

impl SearchDepth {
    /// Parse a depth from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(Self::Basic),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Get the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

/// A single raw hit as returned by the search provider.
///
/// Owned solely by the pipeline invocation that fetched it. Content may be
/// truncated arbitrarily by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,

    /// Opaque relevance score supplied by the provider. Absent scores are
    /// treated as maximal confidence (1.0) — preserved source behavior, do
    /// not change without product input.
    #[serde(default)]
    pub score: Option<f32>,
}

impl RawResult {
    /// Effective confidence score, defaulting to 1.0 when the provider
    /// supplied none.
    pub fn confidence(&self) -> f32 {
        self.score.unwrap_or(1.0)
    }
}

/// Validated inbound search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,

    #[serde(default)]
    pub search_depth: SearchDepth,

    #[serde(default = "default_max_results")]
    pub max_results: u8,

    #[serde(rename = "search_scope", default)]
    pub scope: SearchScope,
}

fn default_max_results() -> u8 {
    DEFAULT_MAX_RESULTS
}

impl SearchRequest {
    /// Create a request with default depth, result count, and scope.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            search_depth: SearchDepth::default(),
            max_results: DEFAULT_MAX_RESULTS,
            scope: SearchScope::default(),
        }
    }

    /// Validate the request at the boundary.
    ///
    /// The query must be non-empty after trimming and `max_results` must fall
    /// in the accepted range. Invalid requests never reach the gateway.
    pub fn validate(&self) -> AppResult<()> {
        if self.query.trim().is_empty() {
            return Err(AppError::Validation(
                "Query parameter is required".to_string(),
            ));
        }

        if self.max_results < MIN_RESULTS || self.max_results > MAX_RESULTS {
            return Err(AppError::Validation(format!(
                "max_results must be between {} and {}, got {}",
                MIN_RESULTS, MAX_RESULTS, self.max_results
            )));
        }

        Ok(())
    }
}

/// The sole externally visible artifact of the pipeline.
///
/// Immutable once constructed; carries no relation back to the originating
/// request beyond what the caller already holds. Wire names match the
/// original service contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Natural-language answer text
    #[serde(rename = "response")]
    pub answer: String,

    /// Ordered source URLs in curated order (duplicates allowed);
    /// absent when nothing usable survived
    #[serde(rename = "source_found")]
    pub sources: Option<Vec<String>>,

    /// Scope the request was curated under
    #[serde(rename = "search_scope")]
    pub scope: SearchScope,

    /// Length of the curated result set the answer was built from
    pub total_results: usize,
}

impl SearchResponse {
    /// The canonical "not found" response: used when the gateway returned
    /// nothing, or when no curated result carried a URL.
    pub fn not_found(scope: SearchScope) -> Self {
        Self {
            answer: NOT_FOUND_MESSAGE.to_string(),
            sources: None,
            scope,
            total_results: 0,
        }
    }
}
