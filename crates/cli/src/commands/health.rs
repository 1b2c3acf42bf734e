//! Health command handler.
//!
//! Liveness probe: process health plus the registry size. Informational only,
//! not part of the pipeline contract.

use apseva_core::{config::AppConfig, AppResult};
use apseva_search::DomainRegistry;
use clap::Args;

/// Show process health and registry size
#[derive(Args, Debug)]
pub struct HealthCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl HealthCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing health command");

        let registry = DomainRegistry::with_extra_domains(&config.extra_trusted_domains);

        if self.json {
            let output = serde_json::json!({
                "status": "healthy",
                "ap_domains_count": registry.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Status: healthy");
            println!("Trusted domains: {}", registry.len());
        }

        Ok(())
    }
}
