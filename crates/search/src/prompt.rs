//! LLM synthesis prompt construction.
//!
//! Renders the structured prompt sent to the LLM collaborator: the system
//! instruction, the original query, and numbered result blocks with a bounded
//! per-result content budget.

use crate::answer::truncate_chars;
use crate::types::RawResult;
use apseva_core::{AppError, AppResult};
use handlebars::Handlebars;
use serde_json::json;

/// Per-result content budget in the rendered prompt. Looser than the snippet
/// budget since the model sees the results instead of the user.
pub const RESULT_CONTENT_BUDGET: usize = 1000;

/// System instruction for answer synthesis.
const SYSTEM_INSTRUCTION: &str = "\
You are a helpful AI assistant that answers questions based on search results \
from Andhra Pradesh government websites and other sources.

Your task is to:
1. Analyze the provided search results and extract relevant information
2. Provide a clear, comprehensive answer that directly addresses the user's question
3. Focus on the most important and relevant details from the search results
4. Maintain accuracy and avoid speculation beyond what's provided in the search results
5. If information is insufficient, acknowledge the limitations
6. When information comes from AP government sources, mention that it's from official sources
7. Structure your response in a clear, easy-to-understand format
8. Provide step-by-step instructions when applicable";

/// Handlebars template for the user portion of the prompt.
const USER_TEMPLATE: &str = "\
User Query: {{query}}

Search Results:
{{#each results}}\
Result {{this.index}}:
Title: {{this.title}}
URL: {{this.url}}
Content: {{this.content}}

{{/each}}\
Please provide a comprehensive answer based on the above search results.";

/// The fixed system instruction for the LLM collaborator.
pub fn system_instruction() -> &'static str {
    SYSTEM_INSTRUCTION
}

/// Render the user prompt from the query and the curated result set.
pub fn build_synthesis_prompt(query: &str, results: &[RawResult]) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("synthesis", USER_TEMPLATE)
        .map_err(|e| AppError::AnswerGeneration(format!("Failed to register template: {}", e)))?;

    let blocks: Vec<serde_json::Value> = results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            json!({
                "index": i + 1,
                "title": if result.title.is_empty() { "No title" } else { &result.title },
                "url": if result.url.is_empty() { "No URL" } else { &result.url },
                "content": truncate_chars(&result.content, RESULT_CONTENT_BUDGET),
            })
        })
        .collect();

    let rendered = handlebars
        .render("synthesis", &json!({ "query": query, "results": blocks }))
        .map_err(|e| AppError::AnswerGeneration(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}
