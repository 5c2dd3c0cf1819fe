//! Gateway API data models
//!
//! Defines the query endpoint request and response structures

use serde::{Deserialize, Serialize};

/// Inbound query request
///
/// `query` and `priceLimit` are declared optional so that their absence is
/// reported as a validation failure instead of a body parse failure.
/// `priceLimit` stays a raw JSON value for the same reason: a non-numeric
/// limit must surface as a validation error, not a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    /// User query text
    #[serde(default)]
    pub query: Option<String>,
    /// Deep search mode flag
    #[serde(default)]
    pub deep_search: bool,
    /// Maximum spend the caller accepts, in USD
    #[serde(default)]
    pub price_limit: Option<serde_json::Value>,
    /// Model override (optional)
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful query response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Model reply text
    pub response: String,
    /// Simulated charge summary
    pub charge_info: String,
}

/// Deterministic cost estimate for a single query
///
/// Recomputed per request, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Heuristic token count of the query text
    pub token_count: u32,
    /// Token count plus the deep search surcharge
    pub total_tokens: u32,
    /// Estimated cost in USD
    pub estimated_cost: f64,
}

impl CostEstimate {
    /// Format the simulated charge summary returned to the caller
    pub fn charge_summary(&self) -> String {
        format!("Charged ${:.2} for {} tokens.", self.estimated_cost, self.total_tokens)
    }
}
