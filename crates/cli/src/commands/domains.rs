//! Domains command handler.
//!
//! Read-only listing of the trusted domain registry, for display only; it has
//! no effect on filtering.

use apseva_core::{config::AppConfig, AppResult};
use apseva_search::DomainRegistry;
use clap::Args;

/// List the trusted AP government domains
#[derive(Args, Debug)]
pub struct DomainsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl DomainsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing domains command");

        let registry = DomainRegistry::with_extra_domains(&config.extra_trusted_domains);

        if self.json {
            let output = serde_json::json!({
                "ap_government_domains": registry.domains(),
                "total_domains": registry.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            for domain in registry.domains() {
                println!("{}", domain);
            }
            println!();
            println!("Total domains: {}", registry.len());
        }

        Ok(())
    }
}
