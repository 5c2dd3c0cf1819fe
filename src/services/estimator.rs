//! Cost estimation and budget gating service
//!
//! Estimates a monetary cost for a query from a crude token heuristic and
//! rejects requests whose estimate exceeds the caller-supplied price limit

use crate::config::settings::PricingConfig;
use crate::models::query::CostEstimate;
use crate::utils::error::{AppError, AppResult};
use tracing::debug;

/// Heuristic character-per-token ratio; not a real tokenizer
const CHARS_PER_TOKEN: u32 = 4;

/// Cost estimator and budget gate
#[derive(Debug, Clone)]
pub struct CostEstimator {
    pricing: PricingConfig,
}

impl CostEstimator {
    /// Create a new estimator instance
    pub fn new(pricing: PricingConfig) -> Self {
        Self { pricing }
    }

    /// Compute the deterministic cost estimate for a query
    ///
    /// token_count = ceil(chars / 4); deep search adds a fixed surcharge.
    pub fn quote(&self, query: &str, deep_search: bool) -> CostEstimate {
        let chars = query.chars().count() as u32;
        let token_count = (chars + CHARS_PER_TOKEN - 1) / CHARS_PER_TOKEN;

        let extra_tokens = if deep_search {
            self.pricing.deep_search_extra_tokens
        } else {
            0
        };
        let total_tokens = token_count + extra_tokens;

        CostEstimate {
            token_count,
            total_tokens,
            estimated_cost: f64::from(total_tokens) * self.pricing.cost_per_token,
        }
    }

    /// Estimate and gate against the caller's price limit
    ///
    /// Returns the approved estimate, or `BudgetExceeded` when the estimated
    /// cost is over the limit. Pure; no side effects.
    pub fn estimate(&self, query: &str, deep_search: bool, price_limit: f64) -> AppResult<CostEstimate> {
        let estimate = self.quote(query, deep_search);

        debug!(
            "Cost estimate: {} tokens (${:.5}) against limit ${:.2}",
            estimate.total_tokens, estimate.estimated_cost, price_limit
        );

        if estimate.estimated_cost > price_limit {
            return Err(AppError::BudgetExceeded {
                estimated: estimate.estimated_cost,
                limit: price_limit,
            });
        }

        Ok(estimate)
    }
}
