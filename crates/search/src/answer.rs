//! Answer synthesis.
//!
//! Turns the curated result set into a single natural-language answer. Three
//! strategies, selected by the scope policy: the provider's own answer
//! verbatim (open scopes), an LLM rewrite of the curated snippets, or plain
//! snippet concatenation. An LLM failure degrades to concatenation locally
//! rather than failing the request.

use crate::prompt::{build_synthesis_prompt, system_instruction};
use crate::types::{RawResult, SearchScope, NOT_FOUND_MESSAGE};
use apseva_llm::{LlmClient, LlmRequest};

/// How many curated results feed the concatenated answer.
pub const MAX_SNIPPET_RESULTS: usize = 3;

/// Character budget per concatenated snippet.
pub const SNIPPET_CHAR_BUDGET: usize = 300;

/// Attribution prefix for strict-scope concatenated answers.
const TRUSTED_ATTRIBUTION: &str = "Based on Andhra Pradesh government sources: ";

/// Fallback when the curated results carry no usable content.
const NO_CONTENT_MESSAGE: &str =
    "Sorry, could not find any relevant data from the specified sources";

/// Produce the final answer text for the curated result set.
///
/// Strategy selection:
/// 1. Open scopes use a provider-synthesized answer verbatim when present.
/// 2. With an LLM client configured, the curated snippets are rewritten into
///    a grounded answer; on failure this falls back to concatenation.
/// 3. Otherwise the top snippets are concatenated directly.
pub async fn synthesize(
    query: &str,
    scope: SearchScope,
    results: &[RawResult],
    provider_answer: Option<&str>,
    llm: Option<&dyn LlmClient>,
    model: &str,
) -> String {
    if results.is_empty() {
        return NOT_FOUND_MESSAGE.to_string();
    }

    if scope.policy().provider_answer_allowed {
        if let Some(answer) = provider_answer {
            if !answer.trim().is_empty() {
                tracing::debug!("Using provider-synthesized answer verbatim");
                return answer.to_string();
            }
        }
    }

    if let Some(client) = llm {
        match generate_llm_answer(client, model, query, results).await {
            Ok(answer) => return answer,
            Err(e) => {
                // Local recovery: a failed rewrite is not a pipeline failure.
                tracing::warn!("LLM answer generation failed, falling back to snippets: {}", e);
            }
        }
    }

    concat_snippets(results, scope)
}

/// Concatenate the top curated snippets into an answer.
fn concat_snippets(results: &[RawResult], scope: SearchScope) -> String {
    let parts: Vec<String> = results
        .iter()
        .take(MAX_SNIPPET_RESULTS)
        .filter(|result| !result.content.trim().is_empty())
        .map(|result| truncate_chars(&result.content, SNIPPET_CHAR_BUDGET))
        .collect();

    if parts.is_empty() {
        return NO_CONTENT_MESSAGE.to_string();
    }

    let summary = parts.join(" ");
    if scope == SearchScope::StrictTrusted {
        format!("{}{}", TRUSTED_ATTRIBUTION, summary)
    } else {
        summary
    }
}

/// Rewrite the curated results through the LLM collaborator.
///
/// Single synchronous attempt with the client's bounded timeout; the caller
/// handles failure.
async fn generate_llm_answer(
    client: &dyn LlmClient,
    model: &str,
    query: &str,
    results: &[RawResult],
) -> apseva_core::AppResult<String> {
    let user_prompt = build_synthesis_prompt(query, results)?;

    let request = LlmRequest::new(user_prompt, model)
        .with_system(system_instruction())
        .with_temperature(0.3) // Lower temperature for factual answers
        .with_max_tokens(1000);

    let response = client.complete(&request).await?;

    tracing::debug!(
        "LLM synthesis used {} tokens",
        response.usage.total_tokens
    );

    Ok(response.content)
}

/// Truncate to a character budget without splitting a UTF-8 code point.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(budget).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apseva_core::{AppError, AppResult};
    use apseva_llm::{LlmResponse, LlmUsage};

    fn result(url: &str, content: &str) -> RawResult {
        RawResult {
            url: url.to_string(),
            title: "Title".to_string(),
            content: content.to_string(),
            score: Some(0.9),
        }
    }

    /// Scripted LLM client: answers with a fixed string or always fails.
    struct ScriptedLlm {
        answer: Option<String>,
    }

    #[async_trait::async_trait]
    impl LlmClient for ScriptedLlm {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        async fn complete(&self, _request: &LlmRequest) -> AppResult<LlmResponse> {
            match &self.answer {
                Some(answer) => Ok(LlmResponse {
                    content: answer.clone(),
                    model: "scripted".to_string(),
                    usage: LlmUsage::default(),
                    done: true,
                }),
                None => Err(AppError::AnswerGeneration("model offline".to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_empty_results_yield_not_found() {
        let answer = synthesize(
            "q",
            SearchScope::StrictTrusted,
            &[],
            Some("provider answer"),
            None,
            "llama3.2",
        )
        .await;
        assert_eq!(answer, NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_provider_answer_used_verbatim_for_open_scope() {
        let results = vec![result("https://example.com", "snippet")];
        let answer = synthesize(
            "q",
            SearchScope::Unrestricted,
            &results,
            Some("Provider knows best."),
            None,
            "llama3.2",
        )
        .await;
        assert_eq!(answer, "Provider knows best.");
    }

    #[tokio::test]
    async fn test_provider_answer_ignored_for_strict_scope() {
        let results = vec![result("https://webland.ap.gov.in", "Apply at the MRO office.")];
        let answer = synthesize(
            "q",
            SearchScope::StrictTrusted,
            &results,
            Some("Provider knows best."),
            None,
            "llama3.2",
        )
        .await;

        assert!(answer.starts_with("Based on Andhra Pradesh government sources:"));
        assert!(answer.contains("Apply at the MRO office."));
    }

    #[tokio::test]
    async fn test_concat_truncates_and_joins() {
        let long = "a".repeat(400);
        let results = vec![
            result("https://a", &long),
            result("https://b", "short"),
            result("https://c", "tail"),
            result("https://d", "never included"),
        ];

        let answer = synthesize(
            "q",
            SearchScope::Unrestricted,
            &results,
            None,
            None,
            "llama3.2",
        )
        .await;

        assert!(answer.contains("..."));
        assert!(answer.contains("short"));
        assert!(answer.contains("tail"));
        assert!(!answer.contains("never included"));
    }

    #[tokio::test]
    async fn test_llm_answer_preferred_over_concat() {
        let results = vec![result("https://webland.ap.gov.in", "snippet")];
        let llm = ScriptedLlm {
            answer: Some("A step-by-step answer.".to_string()),
        };

        let answer = synthesize(
            "q",
            SearchScope::StrictTrusted,
            &results,
            None,
            Some(&llm),
            "llama3.2",
        )
        .await;
        assert_eq!(answer, "A step-by-step answer.");
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back_to_concat() {
        let results = vec![result("https://webland.ap.gov.in", "Apply online.")];
        let llm = ScriptedLlm { answer: None };

        let answer = synthesize(
            "q",
            SearchScope::StrictTrusted,
            &results,
            None,
            Some(&llm),
            "llama3.2",
        )
        .await;

        assert!(answer.starts_with("Based on Andhra Pradesh government sources:"));
        assert!(answer.contains("Apply online."));
    }

    #[tokio::test]
    async fn test_results_without_content_yield_no_content_message() {
        let results = vec![result("https://a", "  ")];
        let answer = synthesize(
            "q",
            SearchScope::Unrestricted,
            &results,
            None,
            None,
            "llama3.2",
        )
        .await;
        assert_eq!(answer, NO_CONTENT_MESSAGE);
    }

    #[test]
    fn test_truncate_chars_short_text() {
        assert_eq!(truncate_chars("short", 300), "short");
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        let text = "నమస్కారం".repeat(100);
        let truncated = truncate_chars(&text, 10);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 13);
    }
}
