//! Health check handlers
//!
//! Provides application health status check endpoints

use crate::handlers::AppState;
use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Version information
    pub version: String,
    /// Timestamp
    pub timestamp: String,
    /// Details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HealthDetails>,
}

/// Check result
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthDetails {
    /// Whether an OpenAI credential is configured
    pub credential: String,
    /// Configuration status
    pub config: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Basic health check
///
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing health check");

    let credential = if state.settings.openai.api_key.is_some() {
        "configured".to_string()
    } else {
        "missing".to_string()
    };

    let response = HealthResponse {
        status: "healthy".to_string(),
        service: "querygate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            credential,
            config: "valid".to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    };

    Json(response)
}

/// Liveness check
///
/// GET /health/live
/// Confirms the service is running; does not check external dependencies
pub async fn liveness_check(State(_state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Executing liveness check");

    let response = HealthResponse {
        status: "alive".to_string(),
        service: "querygate".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        details: Some(HealthDetails {
            credential: "not_checked".to_string(),
            config: "valid".to_string(),
            uptime_seconds: get_uptime_seconds(),
        }),
    };

    Json(response)
}

/// Get service uptime in seconds
fn get_uptime_seconds() -> u64 {
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static START_TIME: OnceLock<u64> = OnceLock::new();

    let start_time = *START_TIME.get_or_init(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });

    let current_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    current_time.saturating_sub(start_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uptime_calculation() {
        let uptime1 = get_uptime_seconds();
        let uptime2 = get_uptime_seconds();

        assert!(uptime2 >= uptime1);
    }
}
