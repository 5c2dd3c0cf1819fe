//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod query;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::{CostEstimator, FileLedger, OpenAIClient, UsageRecorder};
use anyhow::Result;
use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state
pub struct AppState {
    pub settings: Settings,
    pub estimator: CostEstimator,
    pub openai_client: OpenAIClient,
    pub ledger: Arc<dyn UsageRecorder>,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    // Create OpenAI client
    let openai_client = OpenAIClient::new(settings.clone())?;

    // Create cost estimator
    let estimator = CostEstimator::new(settings.pricing.clone());

    // Create usage ledger
    let ledger: Arc<dyn UsageRecorder> = Arc::new(FileLedger::new(settings.ledger.path.clone()));

    // Create application state
    let app_state = Arc::new(AppState {
        settings,
        estimator,
        openai_client,
        ledger,
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::middleware::from_fn(request_logging_middleware));

    // Create routes; non-POST verbs on the query endpoint answer 405
    let router = Router::new()
        .route(
            "/v1/query",
            post(query::handle_query).fallback(query::method_not_allowed),
        )
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}
