//! Search command handler.
//!
//! The collaborator surface of the curation pipeline: wires up the registry,
//! the Tavily gateway, and (optionally) an LLM client, runs one request, and
//! prints the response.

use apseva_core::{config::AppConfig, config::ProviderConfig, AppError, AppResult};
use apseva_search::{
    run_search, DomainRegistry, SearchDepth, SearchRequest, SearchResponse, SearchScope,
    TavilyGateway,
};
use clap::Args;

/// Ask a government-services question
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// The question to search for
    pub query: String,

    /// Search depth (basic, advanced)
    #[arg(long, default_value = "advanced")]
    pub depth: String,

    /// Maximum number of provider results (1-10)
    #[arg(long, default_value_t = 5)]
    pub max_results: u8,

    /// Search scope (ap_gov_only, include_ap_gov, general)
    #[arg(long, default_value = "ap_gov_only")]
    pub scope: String,

    /// Rewrite the answer through the configured LLM
    #[arg(long)]
    pub llm: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");
        tracing::debug!("Search options: {:?}", self);

        let request = self.build_request()?;

        // Validation failures abort here, before anything reaches the gateway.
        request.validate()?;

        let registry = DomainRegistry::with_extra_domains(&config.extra_trusted_domains);
        tracing::debug!("Registry holds {} trusted domains", registry.len());

        let gateway = TavilyGateway::new(config.require_tavily_key()?, config.search_timeout_secs)?;

        let llm_client = if self.llm {
            Some(self.create_llm_client(config)?)
        } else {
            None
        };

        let result = run_search(
            &request,
            &registry,
            &gateway,
            llm_client.as_deref(),
            &config.model,
        )
        .await;

        match result {
            Ok(response) => {
                self.print_response(&response)?;
                Ok(())
            }
            Err(e @ AppError::Validation(_)) => Err(e),
            Err(e) => {
                // Boundary conversion: emit a degraded but well-formed body
                // carrying the internal error string, then fail the command.
                let body = serde_json::json!({
                    "error": format!("An error occurred: {}", e),
                    "response": "Sorry, could not find any relevant data",
                    "source_found": null,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
                Err(e)
            }
        }
    }

    /// Translate CLI flags into a pipeline request.
    fn build_request(&self) -> AppResult<SearchRequest> {
        let search_depth = SearchDepth::parse(&self.depth).ok_or_else(|| {
            AppError::Validation(format!(
                "Unknown search depth: {}. Supported: basic, advanced",
                self.depth
            ))
        })?;

        let scope = SearchScope::parse(&self.scope).ok_or_else(|| {
            AppError::Validation(format!(
                "Unknown search scope: {}. Supported: ap_gov_only, include_ap_gov, general",
                self.scope
            ))
        })?;

        let mut request = SearchRequest::new(self.query.clone());
        request.search_depth = search_depth;
        request.max_results = self.max_results;
        request.scope = scope;
        Ok(request)
    }

    /// Create the LLM client for the answer-rewrite path.
    fn create_llm_client(
        &self,
        config: &AppConfig,
    ) -> AppResult<std::sync::Arc<dyn apseva_llm::LlmClient>> {
        let provider_config = config.get_provider_config(&config.provider)?;

        let endpoint = if let Some(ref pc) = provider_config {
            match pc {
                ProviderConfig::Ollama { endpoint, .. } => Some(endpoint.as_str()),
                ProviderConfig::OpenAI { endpoint, .. } => endpoint.as_deref(),
                ProviderConfig::Claude { endpoint, .. } => endpoint.as_deref(),
            }
        } else {
            None
        };

        let api_key = config.resolve_api_key(&config.provider)?;

        apseva_llm::create_client(&config.provider, endpoint, api_key.as_deref())
            .map_err(AppError::Config)
    }

    /// Print the response in the requested format.
    fn print_response(&self, response: &SearchResponse) -> AppResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(response)?);
            return Ok(());
        }

        println!("{}", response.answer);

        if let Some(ref sources) = response.sources {
            println!();
            println!("Sources:");
            for source in sources {
                println!("  - {}", source);
            }
            println!();
            println!("Results used: {}", response.total_results);
        }

        Ok(())
    }
}
