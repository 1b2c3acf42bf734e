//! Result-curation pipeline for AP government-services search.
//!
//! Turns a raw set of heterogeneous web-search hits into a trustworthy,
//! scoped, summarized answer with cited sources. The pipeline stages run
//! sequentially per request:
//!
//! formulate → gateway → confidence filter → trust filter → synthesize → assemble
//!
//! Every invocation is a pure function of its [`SearchRequest`] plus the live
//! gateway reply; the only shared state is the read-only [`DomainRegistry`].

pub mod answer;
pub mod filter;
pub mod gateway;
pub mod pipeline;
pub mod prompt;
pub mod query;
pub mod registry;
pub mod response;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use gateway::{GatewayQuery, GatewayReply, SearchGateway, TavilyGateway};
pub use pipeline::run_search;
pub use registry::DomainRegistry;
pub use types::{RawResult, SearchDepth, SearchRequest, SearchResponse, SearchScope};
