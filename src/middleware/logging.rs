//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderMap, Method, Uri},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Request logging middleware
///
/// Records detailed information for each HTTP request
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    // Request span; entered per log statement so the future stays Send
    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    // Log request start
    span.in_scope(|| {
        info!(
            "Request started: {} {} - User-Agent: {}",
            method,
            uri,
            headers
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
        );
    });

    // Execute request
    let response = next.run(request).await;

    // Calculate processing time
    let duration = start_time.elapsed();
    let status = response.status();

    span.in_scope(|| {
        // Log response
        if status.is_success() {
            info!(
                "Request completed: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        } else if status.is_client_error() {
            warn!(
                "Client error: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        } else {
            warn!(
                "Server error: {} - Duration: {:.2}ms",
                status,
                duration.as_secs_f64() * 1000.0
            );
        }

        // Log slow requests; the downstream completion call is the usual culprit
        if duration.as_secs() > 5 {
            warn!(
                "Slow request detected: {} {} - Duration: {:.2}s",
                method,
                uri,
                duration.as_secs_f64()
            );
        }
    });

    response
}
