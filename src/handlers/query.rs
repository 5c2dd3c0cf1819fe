//! Query endpoint handlers
//!
//! Gates each query against the caller's budget before forwarding it to the
//! OpenAI API and recording the simulated charge

use crate::handlers::AppState;
use crate::models::query::{QueryRequest, QueryResponse};
use crate::services::UsageEntry;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_query_log_summary;
use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handle gated query requests
///
/// POST /v1/query
///
/// Pipeline: parse -> validate -> estimate/gate -> forward -> record -> respond.
/// A rejected request never reaches the downstream API or the ledger.
pub async fn handle_query(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<QueryResponse>> {
    // The body is parsed by hand so a malformed payload surfaces through the
    // application error path instead of the extractor's rejection
    let request: QueryRequest = serde_json::from_slice(&body)?;

    if let Ok(summary_json) = serde_json::to_string(&create_query_log_summary(&request)) {
        debug!("Received query request: {}", summary_json);
    }

    let (query, price_limit) = validate_query_request(&request)?;

    let estimate = state
        .estimator
        .estimate(&query, request.deep_search, price_limit)?;

    let model = request
        .model
        .as_deref()
        .unwrap_or(&state.settings.openai.default_model);

    let reply = state
        .openai_client
        .complete_query(&query, request.deep_search, model)
        .await?;

    let entry = UsageEntry::new(query, &estimate);
    state.ledger.record(&entry).await?;

    info!(
        "Query accepted: {} tokens, estimated ${:.5}, model {}",
        estimate.total_tokens, estimate.estimated_cost, model
    );

    Ok(Json(QueryResponse {
        response: reply,
        charge_info: estimate.charge_summary(),
    }))
}

/// Fallback for non-POST verbs on the query endpoint
///
/// Answers 405 with a plain-text body.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Validate a query request, returning the query text and price limit
fn validate_query_request(request: &QueryRequest) -> AppResult<(String, f64)> {
    let query = match &request.query {
        Some(query) if !query.is_empty() => query.clone(),
        _ => {
            warn!("Query request rejected: missing query");
            return Err(AppError::Validation("Query missing".to_string()));
        }
    };

    let price_limit = match &request.price_limit {
        None => {
            return Err(AppError::Validation("priceLimit missing".to_string()));
        }
        Some(value) => value.as_f64().ok_or_else(|| {
            AppError::Validation("priceLimit must be a number".to_string())
        })?,
    };

    if !price_limit.is_finite() || price_limit < 0.0 {
        return Err(AppError::Validation(
            "priceLimit must be a non-negative number".to_string(),
        ));
    }

    Ok((query, price_limit))
}
