//! Command handlers for the Apseva CLI.

mod domains;
mod health;
mod search;

pub use domains::DomainsCommand;
pub use health::HealthCommand;
pub use search::SearchCommand;
