//! LLM integration crate for the Apseva CLI.
//!
//! This crate provides a provider-agnostic abstraction for interacting with
//! Large Language Models (LLMs). It supports multiple providers through a
//! unified trait-based interface. The answer synthesizer uses it for the
//! optional rewrite of curated search snippets into a single answer.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - Future: OpenAI, Claude
//!
//! # Example
//! ```no_run
//! use apseva_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Hello, world!", "llama3");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::OllamaClient;
